//! HTTP/WebSocket API for the bingo host.
//!
//! Two endpoints: a health check for monitoring, and the WebSocket every
//! controller connects through. All game traffic flows over the socket as
//! integer-tagged JSON frames; the handlers translate between socket
//! frames and host actor commands.

pub mod websocket;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
};
use party_bingo::HostHandle;
use serde_json::json;
use tower_http::cors::CorsLayer;

/// Application state shared across handlers and WebSocket connections.
#[derive(Clone)]
pub struct AppState {
    pub host: HostHandle,
}

/// Create the API router.
///
/// ```text
/// GET  /health   - Health check
/// GET  /ws       - Controller WebSocket
/// ```
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(websocket::websocket_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring.
async fn health_check() -> impl IntoResponse {
    let response = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    (StatusCode::OK, Json(response))
}
