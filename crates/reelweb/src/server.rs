//! HTTP server exposing the reel extraction endpoint.
//!
//! Routes:
//! - `POST /api/extract-reel`: `{"url": "..."}` → direct video URL
//! - `GET /health`: liveness probe

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use reelcore::{Config, ReelResolver, ResolveError};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ReelResolver>,
}

impl AppState {
    pub fn new(resolver: ReelResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractResponse {
    pub success: bool,
    pub video_url: String,
    pub shortcode: String,
    /// Unix seconds at which the URL was resolved
    pub timestamp: i64,
}

/// Build the router with CORS and request tracing.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/extract-reel", post(extract_reel_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind to `config.server` and serve until the process is stopped.
pub async fn start_server(config: &Config, resolver: ReelResolver) -> anyhow::Result<()> {
    let addr = config.server.bind_addr();
    let app = create_router(AppState::new(resolver));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Starting web server on http://{}", listener.local_addr()?);
    tracing::info!("  POST /api/extract-reel - Resolve a reel/post URL");
    tracing::info!("  GET  /health           - Health check");

    axum::serve(listener, app).await?;
    Ok(())
}

/// POST /api/extract-reel
///
/// A missing or malformed body is treated like a missing `url`.
async fn extract_reel_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let url = match payload {
        Ok(Json(ExtractRequest { url: Some(url) })) if !url.is_empty() => url,
        Ok(_) => return Err(ResolveError::MissingUrl.into()),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable extract request body");
            return Err(ResolveError::MissingUrl.into());
        }
    };

    let resolution = state.resolver.resolve(&url).await?;

    Ok(Json(ExtractResponse {
        success: true,
        video_url: resolution.video_url,
        shortcode: resolution.shortcode.into_inner(),
        timestamp: chrono::Utc::now().timestamp(),
    }))
}

/// GET /health
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
