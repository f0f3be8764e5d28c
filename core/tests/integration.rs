//! End-to-end sessions against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the blocking session
//! over ureq and the async session over reqwest. Validates token handling,
//! request building and decoding together against real HTTP.

use mock_server::{AppState, MockConfig};
use osu_core::{
    ApiError, BeatmapType, ClientBuilder, ClientConfig, Credentials, GameMode,
    LookupBeatmapParams, Page, RankingType, RankingsParams, TokenStatus, UserBeatmapsParams,
    UserParams,
};
use osu_core::models::UserBeatmaps;

/// Start the mock server on its own runtime thread and return its base URL.
fn spawn_server(state: AppState) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, state).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

#[test]
fn blocking_session_lifecycle() {
    let state = AppState::new(MockConfig::default());
    let base = spawn_server(state.clone());
    let client = ClientBuilder::new(Credentials::new(1, "secret"))
        .config(ClientConfig::for_host(&base))
        .connect_blocking();

    // Step 1: first call acquires a token.
    let user = client
        .user(&UserParams::new("peppy").mode(GameMode::Osu))
        .unwrap()
        .expect("peppy exists");
    assert_eq!(user.compact.id, 2);
    assert_eq!(user.playmode, GameMode::Osu);
    assert_eq!(client.token_status(), TokenStatus::Active);

    // Step 2: an error body is "no result", not a failure.
    assert!(client.user(&UserParams::new("nobody")).unwrap().is_none());

    // Step 3: beatmap endpoints.
    let beatmap = client.beatmap(75).unwrap().unwrap();
    assert_eq!(beatmap.compact.version, "Normal");
    let looked_up = client
        .lookup_beatmap(&LookupBeatmapParams::new(75))
        .unwrap()
        .unwrap();
    assert_eq!(looked_up, beatmap);
    let beatmaps = client.beatmaps(vec![75u32, 76]).unwrap().unwrap();
    assert_eq!(beatmaps.beatmaps.len(), 1);
    assert!(client.beatmap(76).unwrap().is_none());

    // Step 4: user feeds.
    let kudosu = client
        .user_kudosu(2, &Page::default().limit(5))
        .unwrap()
        .unwrap();
    assert_eq!(kudosu[0].amount, 1);
    let most_played = client
        .user_beatmaps(&UserBeatmapsParams::new(2, BeatmapType::MostPlayed))
        .unwrap()
        .unwrap();
    assert!(matches!(most_played, UserBeatmaps::MostPlayed(ref v) if v[0].count == 42));
    let users = client.users(vec![2u32, 3]).unwrap().unwrap();
    assert_eq!(users.users[0].username, "peppy");

    // Step 5: rankings.
    let rankings = client
        .rankings(&RankingsParams::new(GameMode::Osu, RankingType::Performance).country(36))
        .unwrap()
        .unwrap();
    assert_eq!(rankings.cursor.unwrap().page, 2);
    let spotlights = client.spotlights().unwrap().unwrap();
    assert_eq!(spotlights.spotlights.len(), 2);

    // Step 6: every call above shared one token.
    assert_eq!(block_on(state.token_requests()), 1);

    // Step 7: close revokes server-side.
    client.close().unwrap();
    assert_eq!(block_on(state.active_tokens()), 0);
}

#[test]
fn blocking_session_rejects_bad_credentials() {
    let base = spawn_server(AppState::new(MockConfig::default()));
    let client = ClientBuilder::new(Credentials::new(1, "wrong"))
        .config(ClientConfig::for_host(&base))
        .connect_blocking();

    let err = client.spotlights().unwrap_err();
    assert!(matches!(err, ApiError::Authentication(ref m) if m == "invalid_client"));
    assert_eq!(client.token_status(), TokenStatus::Unauthenticated);
}

#[test]
fn blocking_session_reports_connection_failure() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = ClientBuilder::new(Credentials::new(1, "secret"))
        .config(ClientConfig::for_host(&format!("http://{addr}")))
        .connect_blocking();

    assert!(matches!(client.ensure_valid(), Err(ApiError::Transport(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn async_session_lifecycle() {
    let state = AppState::new(MockConfig::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(mock_server::run_with(listener, state.clone()));

    let client = ClientBuilder::new(Credentials::new(1, "secret"))
        .config(ClientConfig::for_host(&base))
        .connect_async();

    let user = client
        .user(&UserParams::new(2).key("id"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.compact.username, "peppy");

    let (beatmap, spotlights) = tokio::join!(client.beatmap(75), client.spotlights());
    assert_eq!(beatmap.unwrap().unwrap().compact.id, 75);
    assert_eq!(spotlights.unwrap().unwrap().spotlights[1].id, 270);
    assert_eq!(state.token_requests().await, 1);

    client.revoke().await.unwrap();
    assert_eq!(client.token_status().await, TokenStatus::Unauthenticated);
    assert!(client.spotlights().await.unwrap().is_some());
    assert_eq!(state.token_requests().await, 2);
}
