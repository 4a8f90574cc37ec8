//! Core domain models for the relay.

use super::value_object::{ConnectionId, RoomId, Timestamp};

/// A connection currently joined to a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Connection identifier
    pub connection_id: ConnectionId,
    /// Timestamp when the connection joined the room
    pub joined_at: Timestamp,
}

impl Member {
    pub fn new(connection_id: ConnectionId, joined_at: Timestamp) -> Self {
        Self {
            connection_id,
            joined_at,
        }
    }
}

/// A named broadcast domain.
///
/// A room only exists while it has members: the repository drops it as soon
/// as the last member leaves and the next join creates a fresh one.
#[derive(Debug, Clone)]
pub struct Room {
    /// Room identifier
    pub id: RoomId,
    /// Members in join order
    pub members: Vec<Member>,
    /// Timestamp when the room was (re)created by its first join
    pub created_at: Timestamp,
}

impl Room {
    /// Create a new empty room with the given ID and creation timestamp
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            members: Vec::new(),
            created_at,
        }
    }

    /// Add a member. Returns `false` without changes if it already joined.
    pub fn join(&mut self, member: Member) -> bool {
        if self.is_member(&member.connection_id) {
            return false;
        }
        self.members.push(member);
        true
    }

    /// Remove a member. Returns `true` if it was present.
    pub fn leave(&mut self, connection_id: &ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| &m.connection_id != connection_id);
        self.members.len() != before
    }

    pub fn is_member(&self, connection_id: &ConnectionId) -> bool {
        self.members.iter().any(|m| &m.connection_id == connection_id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Every member except `exclude`, in join order
    pub fn members_except(&self, exclude: &ConnectionId) -> Vec<ConnectionId> {
        self.members
            .iter()
            .map(|m| m.connection_id)
            .filter(|id| id != exclude)
            .collect()
    }
}
