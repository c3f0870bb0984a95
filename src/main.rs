mod aggregator;
mod config;
mod duration;
mod error;
mod kaltura;
mod routes;
mod state;

use config::Config;
use state::AppState;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.kaltura_timeout_secs))
        .build()
        .expect("Failed to build HTTP client");

    let state = AppState::new(config.clone(), http);

    let mut titles = state.aggregator.subscribe();
    tokio::spawn(async move {
        while titles.changed().await.is_ok() {
            let count = titles.borrow_and_update().len();
            tracing::debug!("[titles] Display records replaced ({} entries)", count);
        }
    });

    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");
    tracing::info!(
        "Server running on http://localhost:{} (Kaltura partner {})",
        config.port,
        config.kaltura_partner_id
    );
    axum::serve(listener, app).await.expect("Server error");
}
