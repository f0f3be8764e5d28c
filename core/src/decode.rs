//! Response decoding policy.
//!
//! A body carrying a top-level `error` key is the service's way of saying
//! "nothing here" (unknown beatmap, restricted user) and becomes
//! [`Decoded::Absent`], even on a 404. In strict mode a top-level
//! `authentication` key is reported separately so the session can drop the
//! token it just used. Anything else must decode into the declared shape.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::models::{UserBeatmaps, UserBeatmapsShape};

#[derive(Debug, PartialEq)]
pub enum Decoded<T> {
    Value(T),
    /// The body carried an `error` indicator.
    Absent,
    /// Strict mode only: the body carried an `authentication` indicator.
    Unauthenticated,
}

impl<T> Decoded<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Decoded::Value(v) => Some(v),
            Decoded::Absent | Decoded::Unauthenticated => None,
        }
    }

    fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        match self {
            Decoded::Value(v) => Decoded::Value(f(v)),
            Decoded::Absent => Decoded::Absent,
            Decoded::Unauthenticated => Decoded::Unauthenticated,
        }
    }
}

/// Decode `response` into `T`, naming `shape` in decoding errors.
pub fn decode<T: DeserializeOwned>(
    response: &HttpResponse,
    shape: &'static str,
    strict_auth: bool,
) -> Result<Decoded<T>, ApiError> {
    let value = match inspect(response, shape, strict_auth)? {
        Decoded::Value(value) => value,
        Decoded::Absent => return Ok(Decoded::Absent),
        Decoded::Unauthenticated => return Ok(Decoded::Unauthenticated),
    };
    serde_json::from_value(value)
        .map(Decoded::Value)
        .map_err(|e| ApiError::Decoding {
            shape,
            message: e.to_string(),
        })
}

/// Decode the user-beatmaps body into the variant the builder declared.
pub fn decode_user_beatmaps(
    response: &HttpResponse,
    shape: UserBeatmapsShape,
    strict_auth: bool,
) -> Result<Decoded<UserBeatmaps>, ApiError> {
    Ok(match shape {
        UserBeatmapsShape::MostPlayed => {
            decode(response, shape.name(), strict_auth)?.map(UserBeatmaps::MostPlayed)
        }
        UserBeatmapsShape::Beatmapsets => {
            decode(response, shape.name(), strict_auth)?.map(UserBeatmaps::Beatmapsets)
        }
    })
}

fn inspect(
    response: &HttpResponse,
    shape: &'static str,
    strict_auth: bool,
) -> Result<Decoded<Value>, ApiError> {
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
                shape,
                message: e.to_string(),
            })
        }
    };

    if let Some(object) = value.as_object() {
        if object.contains_key("error") {
            return Ok(Decoded::Absent);
        }
        if strict_auth && object.contains_key("authentication") {
            return Ok(Decoded::Unauthenticated);
        }
    }
    if !response.is_success() {
        return Err(ApiError::HttpError {
            status: response.status,
            body: response.body.clone(),
        });
    }
    Ok(Decoded::Value(value))
}
