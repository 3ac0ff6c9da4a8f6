//! Reputation Pulse API server
//!
//! HTTP API serving the news sentiment dashboard: runs keyword analyses and
//! returns parsed records plus aggregates.

mod routes;

use axum::{
    http::{header, Method},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use pulse_news::NewsApiClient;
use pulse_sentiment::GeminiClient;
use pulse_services::{AnalysisCache, SentimentService};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Analysis service (requires NEWS_API_KEY and GEMINI_API_KEY)
    pub sentiment_service: Option<Arc<SentimentService>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,pulse_api=debug")),
        )
        .init();

    info!("Starting Reputation Pulse API");

    let sentiment_service = match build_sentiment_service() {
        Ok(service) => {
            info!("Sentiment service initialized");
            Some(Arc::new(service))
        }
        Err(e) => {
            info!(
                "Sentiment service not available: {}. Set NEWS_API_KEY and GEMINI_API_KEY to enable.",
                e
            );
            None
        }
    };

    let state = AppState { sentiment_service };

    // Configure CORS for the dashboard frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Build router
    let app = Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .with_state(state);

    // Start server
    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Wire up the analysis pipeline from environment configuration
fn build_sentiment_service() -> anyhow::Result<SentimentService> {
    let news_api_key = std::env::var("NEWS_API_KEY")
        .map_err(|_| anyhow::anyhow!("NEWS_API_KEY not set"))?;
    let gemini_api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY not set"))?;

    let cache_db_path =
        std::env::var("CACHE_DB_PATH").unwrap_or_else(|_| "data/analysis.db".to_string());
    info!("Initializing analysis cache at: {}", cache_db_path);

    let news = NewsApiClient::new(news_api_key);
    let model = Arc::new(GeminiClient::new(gemini_api_key)?);
    let cache = AnalysisCache::new(&cache_db_path)?;

    Ok(SentimentService::new(news, model, cache))
}
