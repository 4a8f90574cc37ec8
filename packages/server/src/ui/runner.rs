//! Router construction and server startup.

use std::sync::Arc;

use axum::{Router, routing::get};
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{
    handler::{get_room_detail, get_rooms, health_check, liveness, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Relay server configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "sketchroom-server", version, about = "Room relay for the Sketchroom whiteboard")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Build the application router.
///
/// - `GET /` liveness string
/// - `GET /ws` WebSocket relay
/// - `GET /api/health`, `GET /api/rooms`, `GET /api/rooms/{room_id}`
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .route("/api/rooms/{room_id}", get(get_room_detail))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the relay until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let app = build_router(AppState::default());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Relay listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}
