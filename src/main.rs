//! Textlytics Service - Main Entry Point
//!
//! HTTP service for readability, sentiment and word-frequency analytics.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use textlytics::api::{self, AppState};
use textlytics::types::AnalyticsConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "textlytics=info,tower_http=debug".into()),
    );
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Load configuration
    let config = AnalyticsConfig::load()?;

    info!("Starting Textlytics Service v{}", env!("CARGO_PKG_VERSION"));
    info!(
        max_batch_texts = config.max_batch_texts,
        history_capacity = config.history_capacity,
        top_words = config.top_words,
        "Configuration loaded"
    );

    let addr = config.bind_address();
    let state = Arc::new(AppState::new(config));
    let app = api::router(state);

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
