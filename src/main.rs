use anyhow::Context;
use dotenvy::dotenv;
use learnpath_backend::{app, config::settings::AppConfig, state::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting server...");

    let config = AppConfig::new().context("Missing required configuration (is YOUTUBE_API_KEY set?)")?;
    let port = config.server_port;
    let state = AppState::from_config(config).await?;
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}
