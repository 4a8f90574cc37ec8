//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Static liveness string served at `/`
pub const LIVENESS_MESSAGE: &str = "Sketchroom relay is running";

/// Liveness endpoint
pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms that currently have members
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.repository.list_rooms().await;

    Json(rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Get room detail by ID
///
/// Empty rooms do not exist, so they answer 404 like unknown ones.
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room_id = RoomId::new(room_id).map_err(|_| StatusCode::NOT_FOUND)?;
    let room = state
        .repository
        .get_room(&room_id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(RoomDetailDto::from(&room)))
}
