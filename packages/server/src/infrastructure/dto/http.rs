//! Read-only inspection DTOs served under `/api/rooms`.
//!
//! Timestamps are rendered as RFC 3339 in JST.

use serde::{Deserialize, Serialize};
use sketchroom_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::{Member, Room};

/// One entry of `GET /api/rooms`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    /// Connection ids of the current members, in join order
    pub members: Vec<String>,
    pub member_count: usize,
    pub created_at: String,
}

/// Body of `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub members: Vec<MemberDetailDto>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDetailDto {
    pub connection_id: String,
    pub joined_at: String,
}

impl From<&Room> for RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.to_string(),
            members: room
                .members
                .iter()
                .map(|m| m.connection_id.to_string())
                .collect(),
            member_count: room.members.len(),
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        }
    }
}

impl From<&Member> for MemberDetailDto {
    fn from(member: &Member) -> Self {
        Self {
            connection_id: member.connection_id.to_string(),
            joined_at: timestamp_to_jst_rfc3339(member.joined_at.value()),
        }
    }
}

impl From<&Room> for RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.to_string(),
            members: room.members.iter().map(MemberDetailDto::from).collect(),
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        }
    }
}
