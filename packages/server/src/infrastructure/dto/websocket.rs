//! WebSocket message DTOs for the whiteboard protocol.
//!
//! Every frame is a JSON text message `{"event": <name>, "data": <payload>}`.
//! `clear-board` sent by the server carries no `data`.

use serde::{Deserialize, Serialize};

use crate::domain::{BoardEvent, RoomId, Segment, Snapshot};

/// Messages sent from a drawing client to the relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Add the sender to a room
    JoinRoom(RoomId),
    /// Propose a segment
    Draw(DrawPayload),
    /// Propose a clear
    ClearBoard(RoomId),
    /// Propose a snapshot
    FullImage(FullImagePayload),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawPayload {
    pub room_id: RoomId,
    pub line: Segment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullImagePayload {
    pub room_id: RoomId,
    pub data_url: Snapshot,
}

impl ClientMessage {
    /// Build the message proposing `event` to `room_id`.
    pub fn board_event(room_id: RoomId, event: BoardEvent) -> Self {
        match event {
            BoardEvent::Segment(line) => ClientMessage::Draw(DrawPayload { room_id, line }),
            BoardEvent::Clear => ClientMessage::ClearBoard(room_id),
            BoardEvent::Snapshot(data_url) => {
                ClientMessage::FullImage(FullImagePayload { room_id, data_url })
            }
        }
    }
}

/// Messages relayed from the server to the other members of a room.
///
/// The room id is stripped: a connection only receives events for rooms it
/// joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    Draw(Segment),
    ClearBoard,
    FullImage(Snapshot),
}

impl From<BoardEvent> for ServerMessage {
    fn from(event: BoardEvent) -> Self {
        match event {
            BoardEvent::Segment(segment) => ServerMessage::Draw(segment),
            BoardEvent::Clear => ServerMessage::ClearBoard,
            BoardEvent::Snapshot(snapshot) => ServerMessage::FullImage(snapshot),
        }
    }
}

impl From<ServerMessage> for BoardEvent {
    fn from(message: ServerMessage) -> Self {
        match message {
            ServerMessage::Draw(segment) => BoardEvent::Segment(segment),
            ServerMessage::ClearBoard => BoardEvent::Clear,
            ServerMessage::FullImage(snapshot) => BoardEvent::Snapshot(snapshot),
        }
    }
}
