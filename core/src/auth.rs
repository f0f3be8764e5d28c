//! OAuth client-credentials token lifecycle.
//!
//! # Design
//! Like the endpoint builders, the token exchange is split into a
//! `build_*` step producing an `HttpRequest` and a `parse_*` step consuming
//! the `HttpResponse`; sessions own the I/O in between. `TokenState` is the
//! only mutable state a session carries and is checked lazily before each
//! operation against an injectable [`Clock`].

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::http::{with_auth_headers, HttpMethod, HttpRequest, HttpResponse};

/// OAuth client credentials.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: u64,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: u64, client_secret: impl Into<String>) -> Self {
        Self {
            client_id,
            client_secret: client_secret.into(),
        }
    }

    /// Read `OSU_CLIENT_ID` and `OSU_CLIENT_SECRET`.
    pub fn from_env() -> Result<Self, ApiError> {
        let id = std::env::var("OSU_CLIENT_ID")
            .map_err(|_| ApiError::InvalidState("OSU_CLIENT_ID is not set".to_string()))?;
        let client_id = id.trim().parse().map_err(|_| ApiError::ParameterType {
            param: "OSU_CLIENT_ID".to_string(),
            expected: "int",
            actual: "str",
        })?;
        let secret = std::env::var("OSU_CLIENT_SECRET")
            .map_err(|_| ApiError::InvalidState("OSU_CLIENT_SECRET is not set".to_string()))?;
        Ok(Self::new(client_id, secret))
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// A bearer token with its expiry instant.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: String,
    pub bearer: String,
    pub expires_at: DateTime<Utc>,
}

impl Token {
    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.kind, self.bearer)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("kind", &self.kind)
            .field("bearer", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Observable lifecycle stage of a session's token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Unauthenticated,
    Active,
    Expired,
}

/// The token slot owned by a session.
#[derive(Debug, Default)]
pub struct TokenState {
    token: Option<Token>,
}

impl TokenState {
    pub fn status(&self, now: DateTime<Utc>) -> TokenStatus {
        match &self.token {
            None => TokenStatus::Unauthenticated,
            Some(t) if t.is_expired(now) => TokenStatus::Expired,
            Some(_) => TokenStatus::Active,
        }
    }

    /// The held token if it is still valid at `now`.
    pub fn valid(&self, now: DateTime<Utc>) -> Option<&Token> {
        self.token.as_ref().filter(|t| !t.is_expired(now))
    }

    pub fn current(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn replace(&mut self, token: Token) {
        self.token = Some(token);
    }

    pub fn clear(&mut self) -> Option<Token> {
        self.token.take()
    }
}

/// Wall-clock source for expiry checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Credentials-grant request against `token_url`.
pub fn build_token_request(
    token_url: &str,
    credentials: &Credentials,
) -> Result<HttpRequest, ApiError> {
    let body = json!({
        "client_id": credentials.client_id,
        "client_secret": credentials.client_secret,
        "grant_type": "client_credentials",
        "scope": "public",
    });
    let mut request = HttpRequest::new(HttpMethod::Post, token_url.to_string());
    request.body =
        Some(serde_json::to_string(&body).map_err(|e| ApiError::Serialization(e.to_string()))?);
    Ok(request)
}

#[derive(Deserialize)]
struct TokenResponse {
    token_type: String,
    access_token: String,
    expires_in: i64,
}

/// Turn a token endpoint response into a [`Token`] acquired at `now`.
pub fn parse_token_response(
    response: &HttpResponse,
    now: DateTime<Utc>,
) -> Result<Token, ApiError> {
    let value: Value = match serde_json::from_str(&response.body) {
        Ok(value) => value,
        Err(_) if !response.is_success() => {
            return Err(ApiError::HttpError {
                status: response.status,
                body: response.body.clone(),
            })
        }
        Err(e) => {
            return Err(ApiError::Decoding {
                shape: "TokenResponse",
                message: e.to_string(),
            })
        }
    };

    if let Some(error) = value.get("error") {
        return Err(ApiError::Authentication(describe_error(&value, error)));
    }
    if !response.is_success() {
        return Err(ApiError::HttpError {
            status: response.status,
            body: response.body.clone(),
        });
    }

    let parsed: TokenResponse =
        serde_json::from_value(value).map_err(|e| ApiError::Decoding {
            shape: "TokenResponse",
            message: e.to_string(),
        })?;
    let expires_at = Duration::try_seconds(parsed.expires_in)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| ApiError::Decoding {
            shape: "TokenResponse",
            message: format!("expires_in out of range: {}", parsed.expires_in),
        })?;
    Ok(Token {
        kind: parsed.token_type,
        bearer: parsed.access_token,
        expires_at,
    })
}

fn describe_error(body: &Value, error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        _ => body
            .get("error_description")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
    }
}

/// Revoke the current token: `DELETE {api_root}/oauth/tokens/current`.
pub fn build_revoke_request(api_root: &str, token: &Token) -> HttpRequest {
    let request = HttpRequest::new(
        HttpMethod::Delete,
        format!("{api_root}/oauth/tokens/current"),
    );
    with_auth_headers(request, token)
}
