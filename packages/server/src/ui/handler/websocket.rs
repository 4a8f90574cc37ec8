//! WebSocket connection handlers.
//!
//! Each connection gets a server-assigned id and an unbounded outbound
//! queue. Incoming frames are handled one at a time in arrival order, so the
//! events of one sender reach every recipient in the order they were sent.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{BoardEvent, ConnectionId, ConnectionIdFactory, RoomId},
    infrastructure::dto::websocket::{ClientMessage, DrawPayload, FullImagePayload, ServerMessage},
    ui::state::AppState,
    usecase::{ConnectClientUseCase, DisconnectClientUseCase, JoinRoomUseCase, RelayEventUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = ConnectionIdFactory::generate();
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    // Create a channel for this client to receive relayed messages
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let connect_usecase = ConnectClientUseCase::new(state.repository.clone());
    if let Err(e) = connect_usecase.execute(connection_id, tx).await {
        tracing::warn!("Rejecting connection '{}': {}", connection_id, e);
        return;
    }
    tracing::info!("Client '{}' connected", connection_id);

    let (mut sender, mut receiver) = socket.split();
    let state_clone = state.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_client_message(&state_clone, &connection_id, text.as_str()).await;
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // Spawn a task to forward relayed events to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let disconnect_usecase = DisconnectClientUseCase::new(state.repository.clone());
    match disconnect_usecase.execute(&connection_id).await {
        Ok(rooms) => {
            tracing::info!(
                "Client '{}' disconnected, left {} room(s)",
                connection_id,
                rooms.len()
            );
        }
        Err(e) => {
            tracing::warn!("Failed to disconnect client '{}': {}", connection_id, e);
        }
    }
}

/// Handle one text frame from a client.
///
/// Malformed frames are logged and dropped; nothing is sent back.
async fn handle_client_message(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Dropping malformed message from '{}': {}", connection_id, e);
            return;
        }
    };

    match message {
        ClientMessage::JoinRoom(room_id) => {
            let join_usecase = JoinRoomUseCase::new(state.repository.clone());
            match join_usecase.execute(*connection_id, room_id.clone()).await {
                Ok(true) => tracing::info!("Client '{}' joined room '{}'", connection_id, room_id),
                Ok(false) => {
                    tracing::debug!("Client '{}' already in room '{}'", connection_id, room_id)
                }
                Err(e) => tracing::warn!("Join failed: {}", e),
            }
        }
        ClientMessage::Draw(DrawPayload { room_id, line }) => {
            relay(state, connection_id, room_id, BoardEvent::Segment(line)).await;
        }
        ClientMessage::ClearBoard(room_id) => {
            relay(state, connection_id, room_id, BoardEvent::Clear).await;
        }
        ClientMessage::FullImage(FullImagePayload { room_id, data_url }) => {
            relay(state, connection_id, room_id, BoardEvent::Snapshot(data_url)).await;
        }
    }
}

async fn relay(state: &AppState, connection_id: &ConnectionId, room_id: RoomId, event: BoardEvent) {
    let kind = event.kind();
    let payload = match serde_json::to_string(&ServerMessage::from(event)) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("Failed to serialize {} event: {}", kind, e);
            return;
        }
    };

    let relay_usecase = RelayEventUseCase::new(state.repository.clone());
    match relay_usecase.execute(connection_id, &room_id, &payload).await {
        Ok(delivered) => tracing::debug!(
            "Relayed {} from '{}' in room '{}' to {} member(s)",
            kind,
            connection_id,
            room_id,
            delivered.len()
        ),
        Err(e) => tracing::warn!("Dropped {} event: {}", kind, e),
    }
}
