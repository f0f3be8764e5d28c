//! Session configuration and construction.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{Clock, Credentials, SystemClock};
use crate::builder::DEFAULT_API_ROOT;
use crate::session::{AsyncOsuClient, OsuClient};
use crate::transport::{AsyncTransport, BlockingTransport};

pub const DEFAULT_TOKEN_URL: &str = "https://osu.ppy.sh/oauth/token";

/// Endpoint and behavior settings for a session.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Versioned API root, e.g. `https://osu.ppy.sh/api/v2`.
    pub api_root: String,
    pub token_url: String,
    /// Used by the bundled transports.
    pub timeout: Duration,
    /// Treat an `authentication` body as "no result" and drop the token.
    pub strict_auth: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            timeout: Duration::from_secs(30),
            strict_auth: false,
        }
    }
}

impl ClientConfig {
    /// Point both the API root and the token endpoint at `base_url`
    /// (`{base_url}/api/v2`, `{base_url}/oauth/token`).
    pub fn for_host(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            api_root: format!("{base}/api/v2"),
            token_url: format!("{base}/oauth/token"),
            ..Self::default()
        }
    }
}

/// Builder for [`OsuClient`] and [`AsyncOsuClient`].
pub struct ClientBuilder {
    pub(crate) credentials: Credentials,
    pub(crate) config: ClientConfig,
    pub(crate) clock: Arc<dyn Clock>,
}

impl ClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            config: ClientConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn api_root(mut self, api_root: impl Into<String>) -> Self {
        self.config.api_root = api_root.into();
        self
    }

    pub fn token_url(mut self, token_url: impl Into<String>) -> Self {
        self.config.token_url = token_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn strict_auth(mut self, strict: bool) -> Self {
        self.config.strict_auth = strict;
        self
    }

    /// Replace the wall clock used for token expiry.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn build_blocking<T: BlockingTransport>(self, transport: T) -> OsuClient<T> {
        OsuClient::from_parts(self, transport)
    }

    pub fn build_async<T: AsyncTransport>(self, transport: T) -> AsyncOsuClient<T> {
        AsyncOsuClient::from_parts(self, transport)
    }

    #[cfg(feature = "ureq-client")]
    pub fn connect_blocking(self) -> OsuClient<crate::backends::UreqTransport> {
        let transport = crate::backends::UreqTransport::new(self.config.timeout);
        self.build_blocking(transport)
    }

    #[cfg(feature = "reqwest-client")]
    pub fn connect_async(self) -> AsyncOsuClient<crate::backends::ReqwestTransport> {
        let transport = crate::backends::ReqwestTransport::new(self.config.timeout);
        self.build_async(transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_public_service() {
        let config = ClientConfig::default();
        assert_eq!(config.api_root, "https://osu.ppy.sh/api/v2");
        assert_eq!(config.token_url, "https://osu.ppy.sh/oauth/token");
        assert!(!config.strict_auth);
    }

    #[test]
    fn for_host_derives_both_endpoints() {
        let config = ClientConfig::for_host("http://127.0.0.1:4000/");
        assert_eq!(config.api_root, "http://127.0.0.1:4000/api/v2");
        assert_eq!(config.token_url, "http://127.0.0.1:4000/oauth/token");
    }
}
