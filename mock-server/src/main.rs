use mock_server::{AppState, MockConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mock_server=info")),
        )
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let mut config = MockConfig::default();
    if let Some(ttl) = std::env::var("TOKEN_TTL").ok().and_then(|v| v.parse().ok()) {
        config.token_ttl = ttl;
    }
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    mock_server::run_with(listener, AppState::new(config)).await
}
