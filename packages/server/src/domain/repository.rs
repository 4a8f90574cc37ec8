//! Repository trait for room membership.
//!
//! The domain layer owns the abstraction; the infrastructure layer provides
//! the implementation (dependency inversion).

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{
    entity::Room,
    error::RepositoryError,
    value_object::{ConnectionId, RoomId, Timestamp},
};

/// Storage for live connections and the rooms they joined.
///
/// Implementations must be safe to call from many connection tasks at once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Register a connection and its outbound message channel.
    async fn register_connection(
        &self,
        connection_id: ConnectionId,
        sender: UnboundedSender<String>,
        connected_at: Timestamp,
    ) -> Result<(), RepositoryError>;

    /// Forget a connection and remove it from every room it joined.
    ///
    /// Rooms left empty are dropped. Returns the rooms the connection left.
    async fn unregister_connection(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Vec<RoomId>, RepositoryError>;

    /// Add a connection to a room, creating the room if needed.
    ///
    /// Returns `false` if the connection was already a member.
    async fn join_room(
        &self,
        room_id: RoomId,
        connection_id: ConnectionId,
        joined_at: Timestamp,
    ) -> Result<bool, RepositoryError>;

    /// Members of `room_id` other than `sender`.
    ///
    /// Fails with [`RepositoryError::NotAMember`] if `sender` is not currently
    /// in the room. The membership check and the snapshot of targets happen
    /// atomically.
    async fn broadcast_targets(
        &self,
        room_id: &RoomId,
        sender: &ConnectionId,
    ) -> Result<Vec<ConnectionId>, RepositoryError>;

    /// Outbound channel of a connection
    async fn get_sender(&self, connection_id: &ConnectionId) -> Option<UnboundedSender<String>>;

    async fn get_room(&self, room_id: &RoomId) -> Option<Room>;

    /// All non-empty rooms, sorted by id
    async fn list_rooms(&self) -> Vec<Room>;

    async fn count_connections(&self) -> usize;
}
