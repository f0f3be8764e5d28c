//! Typed client for the osu! API v2.
//!
//! # Overview
//! Client-credentials OAuth, one request builder per endpoint, and decoding
//! of JSON bodies into typed models. Two sessions expose the same
//! operations: [`OsuClient`] blocks, [`AsyncOsuClient`] is async.
//!
//! # Design
//! - Builders are pure: they validate parameters and produce an
//!   [`HttpRequest`] as plain data. Nothing touches the network until a
//!   session hands the request to a transport.
//! - Transports are traits ([`BlockingTransport`], [`AsyncTransport`]) with
//!   ureq and reqwest implementations behind the `ureq-client` and
//!   `reqwest-client` features.
//! - A body carrying an `error` key decodes to `Ok(None)`. Every other
//!   failure is an [`ApiError`].
//! - Models are defined independently from the mock-server crate;
//!   integration tests catch schema drift.
//!
//! ```no_run
//! # #[cfg(feature = "ureq-client")]
//! # fn main() -> Result<(), osu_core::ApiError> {
//! use osu_core::{ClientBuilder, Credentials, UserParams};
//!
//! let client = ClientBuilder::new(Credentials::from_env()?).connect_blocking();
//! if let Some(user) = client.user(&UserParams::new("peppy").mode("osu"))? {
//!     println!("{} joined {}", user.compact.username, user.join_date);
//! }
//! client.close()?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "ureq-client"))]
//! # fn main() {}
//! ```

pub mod auth;
pub mod backends;
pub mod builder;
pub mod config;
pub mod decode;
pub mod enums;
pub mod error;
pub mod http;
pub mod models;
pub mod params;
pub mod session;
pub mod transport;
pub mod value;

pub use auth::{Clock, Credentials, SystemClock, Token, TokenState, TokenStatus};
pub use builder::{RequestBuilder, DEFAULT_API_ROOT};
pub use config::{ClientBuilder, ClientConfig, DEFAULT_TOKEN_URL};
pub use decode::Decoded;
pub use enums::{
    BeatmapType, Choice, GameMode, GameModeInt, RankingFilter, RankingType, ScoreType, UserKey,
    Variant,
};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use params::{
    BeatmapAttributesParams, BeatmapScoresParams, LookupBeatmapParams, Page, RankingsParams,
    UserBeatmapScoreParams, UserBeatmapScoresParams, UserBeatmapsParams, UserParams,
    UserScoresParams,
};
pub use session::{AsyncOsuClient, OsuClient};
pub use transport::{AsyncTransport, BlockingTransport};
pub use value::ParamValue;
