//! In-process mock of the osu! API v2.
//!
//! # Design
//! Serves the client-credentials token endpoint, token revocation and a
//! representative set of read endpoints backed by fixture bodies from
//! `test-vectors/bodies/`. Every `/api/v2` route sits behind a bearer check
//! that answers `401 {"authentication":"basic"}` for unknown tokens, the
//! same shape the live service uses. Unknown resources answer
//! `404 {"error":null}`.

use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const USER_BODY: &str = include_str!("../../test-vectors/bodies/user.json");
pub const BEATMAP_BODY: &str = include_str!("../../test-vectors/bodies/beatmap.json");
pub const RANKINGS_BODY: &str = include_str!("../../test-vectors/bodies/rankings.json");
pub const SPOTLIGHTS_BODY: &str = include_str!("../../test-vectors/bodies/spotlights.json");
pub const KUDOSU_BODY: &str = include_str!("../../test-vectors/bodies/kudosu.json");

/// The one user and one beatmap the mock knows about.
pub const KNOWN_USER_ID: u64 = 2;
pub const KNOWN_USERNAME: &str = "peppy";
pub const KNOWN_BEATMAP_ID: u64 = 75;

#[derive(Clone, Debug)]
pub struct MockConfig {
    pub client_id: u64,
    pub client_secret: String,
    /// `expires_in` for issued tokens, in seconds.
    pub token_ttl: i64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            client_id: 1,
            client_secret: "secret".to_string(),
            token_ttl: 86_400,
        }
    }
}

#[derive(Default)]
struct Registry {
    tokens: HashSet<String>,
    token_requests: usize,
}

/// Shared server state; clone it before handing it to [`router`] to observe
/// token traffic from a test.
#[derive(Clone)]
pub struct AppState {
    config: Arc<MockConfig>,
    registry: Arc<RwLock<Registry>>,
}

impl AppState {
    pub fn new(config: MockConfig) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(RwLock::new(Registry::default())),
        }
    }

    /// Number of requests received by the token endpoint.
    pub async fn token_requests(&self) -> usize {
        self.registry.read().await.token_requests
    }

    /// Number of issued, unrevoked tokens.
    pub async fn active_tokens(&self) -> usize {
        self.registry.read().await.tokens.len()
    }
}

#[derive(Deserialize)]
pub struct TokenRequest {
    pub client_id: u64,
    pub client_secret: String,
    pub grant_type: String,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct TokenResponse {
    pub token_type: String,
    pub expires_in: i64,
    pub access_token: String,
}

pub fn app() -> Router {
    router(AppState::new(MockConfig::default()))
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/oauth/tokens/current", delete(revoke_token))
        .route("/beatmaps", get(list_beatmaps))
        .route("/beatmaps/lookup", get(lookup_beatmap))
        .route("/beatmaps/{id}", get(get_beatmap))
        .route("/users", get(list_users))
        .route("/users/{user}", get(get_user))
        .route("/users/{user}/kudosu", get(user_kudosu))
        .route("/users/{user}/{mode}", get(get_user_in_mode))
        .route("/users/{user}/beatmapsets/{kind}", get(user_beatmaps))
        .route("/rankings/{mode}/{kind}", get(rankings))
        .route("/spotlights", get(spotlights))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/oauth/token", post(issue_token))
        .nest("/api/v2", api)
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, AppState::new(MockConfig::default())).await
}

pub async fn run_with(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock osu! API listening");
    }
    axum::serve(listener, router(state)).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fixture(body: &'static str) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": null }))).into_response()
}

fn fixture_value(body: &'static str) -> Result<Value, Response> {
    serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "fixture body is not valid JSON");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Every value for `key` in a query that may repeat keys (`ids[]=1&ids[]=2`).
fn repeated(query: &[(String, String)], key: &str) -> Vec<String> {
    query
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .collect()
}

fn is_known_user(user: &str) -> bool {
    user == KNOWN_USERNAME || user == KNOWN_USER_ID.to_string()
}

// ---------------------------------------------------------------------------
// OAuth
// ---------------------------------------------------------------------------

async fn issue_token(State(state): State<AppState>, Json(input): Json<TokenRequest>) -> Response {
    let mut registry = state.registry.write().await;
    registry.token_requests += 1;

    if input.grant_type != "client_credentials" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "unsupported_grant_type",
                "error_description": "The authorization grant type is not supported by the authorization server.",
            })),
        )
            .into_response();
    }
    if input.client_id != state.config.client_id || input.client_secret != state.config.client_secret {
        warn!(client_id = input.client_id, "rejected client credentials");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid_client",
                "error_description": "Client authentication failed",
            })),
        )
            .into_response();
    }

    let access_token = Uuid::new_v4().simple().to_string();
    registry.tokens.insert(access_token.clone());
    debug!(scope = ?input.scope, "issued token");
    Json(TokenResponse {
        token_type: "Bearer".to_string(),
        expires_in: state.config.token_ttl,
        access_token,
    })
    .into_response()
}

async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let known = match bearer(request.headers()) {
        Some(token) => state.registry.read().await.tokens.contains(token),
        None => false,
    };
    if !known {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "authentication": "basic" })),
        )
            .into_response();
    }
    next.run(request).await
}

async fn revoke_token(State(state): State<AppState>, headers: HeaderMap) -> StatusCode {
    if let Some(token) = bearer(&headers) {
        state.registry.write().await.tokens.remove(token);
    }
    StatusCode::NO_CONTENT
}

// ---------------------------------------------------------------------------
// Beatmaps
// ---------------------------------------------------------------------------

async fn get_beatmap(Path(id): Path<String>) -> Response {
    if id == KNOWN_BEATMAP_ID.to_string() {
        fixture(BEATMAP_BODY)
    } else {
        not_found()
    }
}

async fn lookup_beatmap(Query(query): Query<Vec<(String, String)>>) -> Response {
    match repeated(&query, "id").first() {
        Some(id) if *id == KNOWN_BEATMAP_ID.to_string() => fixture(BEATMAP_BODY),
        _ => not_found(),
    }
}

async fn list_beatmaps(Query(query): Query<Vec<(String, String)>>) -> Response {
    let beatmap = match fixture_value(BEATMAP_BODY) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let beatmaps: Vec<Value> = repeated(&query, "ids[]")
        .iter()
        .filter(|id| **id == KNOWN_BEATMAP_ID.to_string())
        .map(|_| beatmap.clone())
        .collect();
    Json(json!({ "beatmaps": beatmaps })).into_response()
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

async fn get_user(Path(user): Path<String>) -> Response {
    if is_known_user(&user) {
        fixture(USER_BODY)
    } else {
        not_found()
    }
}

async fn get_user_in_mode(Path((user, mode)): Path<(String, String)>) -> Response {
    if !matches!(mode.as_str(), "osu" | "taiko" | "fruits" | "mania") {
        return not_found();
    }
    get_user(Path(user)).await
}

async fn list_users(Query(query): Query<Vec<(String, String)>>) -> Response {
    let user = match fixture_value(USER_BODY) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let users: Vec<Value> = repeated(&query, "ids[]")
        .iter()
        .filter(|id| is_known_user(id))
        .map(|_| user.clone())
        .collect();
    Json(json!({ "users": users })).into_response()
}

async fn user_kudosu(Path(user): Path<String>) -> Response {
    if is_known_user(&user) {
        fixture(KUDOSU_BODY)
    } else {
        not_found()
    }
}

async fn user_beatmaps(Path((user, kind)): Path<(String, String)>) -> Response {
    if !is_known_user(&user) {
        return not_found();
    }
    if kind == "most_played" {
        return Json(json!([{ "beatmap_id": KNOWN_BEATMAP_ID, "count": 42 }])).into_response();
    }
    Json(json!([])).into_response()
}

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

async fn rankings(
    Path((mode, kind)): Path<(String, String)>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    debug!(%mode, %kind, ?query, "rankings");
    match kind.as_str() {
        "performance" | "score" | "country" | "charts" => fixture(RANKINGS_BODY),
        _ => not_found(),
    }
}

async fn spotlights() -> Response {
    fixture(SPOTLIGHTS_BODY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_are_valid_json() {
        for body in [USER_BODY, BEATMAP_BODY, RANKINGS_BODY, SPOTLIGHTS_BODY, KUDOSU_BODY] {
            assert!(fixture_value(body).is_ok());
        }
    }

    #[test]
    fn bearer_requires_scheme_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(bearer(&headers), Some("abc"));
        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer(&headers), None);
    }

    #[test]
    fn repeated_collects_every_value() {
        let query = vec![
            ("ids[]".to_string(), "1".to_string()),
            ("mode".to_string(), "osu".to_string()),
            ("ids[]".to_string(), "2".to_string()),
        ];
        assert_eq!(repeated(&query, "ids[]"), vec!["1", "2"]);
        assert!(repeated(&query, "limit").is_empty());
    }

    #[test]
    fn token_request_scope_is_optional() {
        let input: TokenRequest = serde_json::from_str(
            r#"{"client_id":1,"client_secret":"s","grant_type":"client_credentials"}"#,
        )
        .unwrap();
        assert!(input.scope.is_none());
    }
}
