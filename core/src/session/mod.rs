//! Client sessions: build → ensure token → authorize → dispatch → decode.
//!
//! # Design
//! Requests are built before the token is checked, so a parameter error
//! never costs a network round trip, token acquisition included. The token
//! lives behind a lock held across renewal: concurrent callers on one
//! session wait for a single acquisition instead of racing their own.
//!
//! [`OsuClient`] blocks the calling thread; [`AsyncOsuClient`] suspends only
//! at transport calls. Both share [`SessionCore`] and decode identically.
//!
//! Dropping a session performs no I/O. Call `close()` to revoke the token;
//! a session dropped with a live token logs a warning.

mod blocking;
mod nonblocking;

pub use blocking::OsuClient;
pub use nonblocking::AsyncOsuClient;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::auth::{Clock, Credentials, Token, TokenState};
use crate::builder::RequestBuilder;
use crate::config::ClientBuilder;
use crate::decode::Decoded;

/// Everything a session needs besides its transport and token slot.
pub(crate) struct SessionCore {
    pub(crate) builder: RequestBuilder,
    pub(crate) credentials: Credentials,
    pub(crate) token_url: String,
    pub(crate) strict_auth: bool,
    pub(crate) clock: Arc<dyn Clock>,
}

impl SessionCore {
    pub(crate) fn new(parts: ClientBuilder) -> Self {
        Self {
            builder: RequestBuilder::new(&parts.config.api_root),
            credentials: parts.credentials,
            token_url: parts.config.token_url,
            strict_auth: parts.config.strict_auth,
            clock: parts.clock,
        }
    }

    /// Log the outcome of a token (re)acquisition.
    pub(crate) fn record_acquired(&self, renewed: bool, token: &Token) {
        info!(
            client_id = self.credentials.client_id,
            expires_at = %token.expires_at,
            renewed,
            "acquired access token"
        );
    }
}

/// Collapse a decode outcome into the caller-facing `Option`, dropping
/// `used` from `state` when the server rejected it.
pub(crate) fn settle<R>(state: &mut TokenState, decoded: Decoded<R>, used: &Token) -> Option<R> {
    if let Decoded::Unauthenticated = decoded {
        if state.current() == Some(used) {
            warn!("server rejected the access token, clearing it");
            state.clear();
        }
    }
    decoded.into_option()
}

/// Warn when a session is dropped while still holding a token the server
/// considers live. Returns whether it warned.
pub(crate) fn warn_unrevoked(state: &TokenState, now: DateTime<Utc>) -> bool {
    if state.valid(now).is_none() {
        return false;
    }
    warn!("session dropped without close(), access token was not revoked");
    true
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn unrevoked_warning_only_for_live_tokens() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut state = TokenState::default();
        assert!(!warn_unrevoked(&state, now));

        state.replace(Token {
            kind: "Bearer".to_string(),
            bearer: "abc".to_string(),
            expires_at: now + Duration::seconds(60),
        });
        assert!(warn_unrevoked(&state, now));
        assert!(!warn_unrevoked(&state, now + Duration::seconds(60)));

        state.clear();
        assert!(!warn_unrevoked(&state, now));
    }
}
