//! Error types for the osu! API client.
//!
//! # Design
//! Parameter problems are split three ways so callers can tell a wrong type
//! (`ParameterType`) from a value outside its domain (`InvalidValue`) and from
//! a parameter used without its co-dependency (`InvalidCombination`). All
//! three are raised before any network call is made.
//!
//! A server-reported application error (a body carrying an `error` key) is
//! *not* an `ApiError`; sessions surface it as `Ok(None)`.

use std::fmt;

/// Errors returned by request builders, the token lifecycle, and sessions.
#[derive(Debug)]
pub enum ApiError {
    /// A supplied argument has the wrong type.
    ParameterType {
        param: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The argument's type is right but its value is outside the domain.
    InvalidValue { param: String, reason: String },

    /// A parameter was supplied without the parameter value it depends on.
    InvalidCombination {
        param: &'static str,
        requires: &'static str,
    },

    /// The token endpoint reported an error.
    Authentication(String),

    /// The operation needs a token the session does not hold.
    InvalidState(String),

    /// The response body could not be mapped onto `shape`.
    Decoding { shape: &'static str, message: String },

    /// The server returned a non-2xx status with no error indicator in the body.
    HttpError { status: u16, body: String },

    /// The transport failed before a response was received.
    Transport(TransportError),

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

/// Failures reported by a transport backend.
#[derive(Debug)]
pub enum TransportError {
    Timeout,
    Connection(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ParameterType {
                param,
                expected,
                actual,
            } => write!(f, "param:{param} must be type<{expected}> not type<{actual}>"),
            ApiError::InvalidValue { param, reason } => {
                write!(f, "param:{param} {reason}")
            }
            ApiError::InvalidCombination { param, requires } => {
                write!(f, "param:{param} requires {requires}")
            }
            ApiError::Authentication(msg) => write!(f, "authentication failed: {msg}"),
            ApiError::InvalidState(msg) => write!(f, "invalid state: {msg}"),
            ApiError::Decoding { shape, message } => {
                write!(f, "failed to decode {shape}: {message}")
            }
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::Transport(err) => write!(f, "transport error: {err}"),
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Timeout => write!(f, "request timed out"),
            TransportError::Connection(msg) => write!(f, "connection failed: {msg}"),
            TransportError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl std::error::Error for TransportError {}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Transport(err)
    }
}
