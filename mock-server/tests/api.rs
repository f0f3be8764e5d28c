use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, router, AppState, MockConfig, TokenResponse};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn token_request(client_id: u64, secret: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/oauth/token")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(format!(
            r#"{{"client_id":{client_id},"client_secret":"{secret}","grant_type":"client_credentials","scope":"public"}}"#
        ))
        .unwrap()
}

fn authorized(method: &str, uri: &str, token: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(String::new())
        .unwrap()
}

async fn issue(app: &Router) -> String {
    let resp = app.clone().oneshot(token_request(1, "secret")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let token: TokenResponse = body_json(resp).await;
    token.access_token
}

// --- oauth ---

#[tokio::test]
async fn token_endpoint_issues_bearer_tokens() {
    let state = AppState::new(MockConfig {
        token_ttl: 60,
        ..MockConfig::default()
    });
    let app = router(state.clone());
    let resp = app.oneshot(token_request(1, "secret")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let token: TokenResponse = body_json(resp).await;
    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.expires_in, 60);
    assert!(!token.access_token.is_empty());
    assert_eq!(state.token_requests().await, 1);
    assert_eq!(state.active_tokens().await, 1);
}

#[tokio::test]
async fn token_endpoint_rejects_bad_credentials() {
    let resp = app().oneshot(token_request(1, "wrong")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "invalid_client");
}

#[tokio::test]
async fn api_requires_known_bearer() {
    let resp = app()
        .oneshot(authorized("GET", "/api/v2/spotlights", "nope"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["authentication"], "basic");
}

#[tokio::test]
async fn revoked_token_is_rejected() {
    let state = AppState::new(MockConfig::default());
    let app = router(state.clone());
    let token = issue(&app).await;

    let resp = app
        .clone()
        .oneshot(authorized("DELETE", "/api/v2/oauth/tokens/current", &token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
    assert_eq!(state.active_tokens().await, 0);

    let resp = app
        .oneshot(authorized("GET", "/api/v2/spotlights", &token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- users ---

#[tokio::test]
async fn user_by_name_and_mode() {
    let app = app();
    let token = issue(&app).await;

    let resp = app
        .clone()
        .oneshot(authorized("GET", "/api/v2/users/peppy/osu", &token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["username"], "peppy");

    let resp = app
        .oneshot(authorized("GET", "/api/v2/users/2", &token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_user_is_error_body() {
    let app = app();
    let token = issue(&app).await;
    let resp = app
        .oneshot(authorized("GET", "/api/v2/users/nobody", &token))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert!(body.as_object().unwrap().contains_key("error"));
}

#[tokio::test]
async fn users_filters_repeated_ids() {
    let app = app();
    let token = issue(&app).await;
    let resp = app
        .oneshot(authorized("GET", "/api/v2/users?ids%5B%5D=2&ids%5B%5D=3", &token))
        .await
        .unwrap();

    let body: Value = body_json(resp).await;
    assert_eq!(body["users"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn user_kudosu_routes_before_mode() {
    let app = app();
    let token = issue(&app).await;
    let resp = app
        .oneshot(authorized("GET", "/api/v2/users/2/kudosu?limit=5", &token))
        .await
        .unwrap();

    let body: Value = body_json(resp).await;
    assert_eq!(body[0]["action"], "vote.give");
}

#[tokio::test]
async fn most_played_is_playcount_list() {
    let app = app();
    let token = issue(&app).await;
    let resp = app
        .oneshot(authorized("GET", "/api/v2/users/2/beatmapsets/most_played", &token))
        .await
        .unwrap();

    let body: Value = body_json(resp).await;
    assert_eq!(body[0]["count"], 42);
}

// --- beatmaps ---

#[tokio::test]
async fn beatmap_lookup_and_get() {
    let app = app();
    let token = issue(&app).await;

    let resp = app
        .clone()
        .oneshot(authorized("GET", "/api/v2/beatmaps/lookup?id=75", &token))
        .await
        .unwrap();
    let body: Value = body_json(resp).await;
    assert_eq!(body["id"], 75);

    let resp = app
        .oneshot(authorized("GET", "/api/v2/beatmaps/76", &token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- rankings ---

#[tokio::test]
async fn rankings_and_spotlights() {
    let app = app();
    let token = issue(&app).await;

    let resp = app
        .clone()
        .oneshot(authorized(
            "GET",
            "/api/v2/rankings/osu/performance?filter=all&country=36",
            &token,
        ))
        .await
        .unwrap();
    let body: Value = body_json(resp).await;
    assert_eq!(body["cursor"]["page"], 2);

    let resp = app
        .oneshot(authorized("GET", "/api/v2/spotlights", &token))
        .await
        .unwrap();
    let body: Value = body_json(resp).await;
    assert_eq!(body["spotlights"].as_array().unwrap().len(), 2);
}
