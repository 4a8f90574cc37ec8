//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! 接続とルームは一つの Mutex で保護されます。メンバーシップの確認と
//! 配信対象の取得は同じクリティカルセクション内で行われます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::domain::{
    ConnectionId, Member, RepositoryError, Room, RoomId, RoomRepository, Timestamp,
};

/// 接続中のクライアント情報
struct ConnectionInfo {
    /// Message sender channel
    sender: UnboundedSender<String>,
    /// Unix timestamp when connected (in JST, milliseconds)
    connected_at: Timestamp,
}

#[derive(Default)]
struct Registry {
    connections: HashMap<ConnectionId, ConnectionInfo>,
    rooms: HashMap<RoomId, Room>,
}

/// インメモリ Room Repository 実装
///
/// ドメイン層の RoomRepository trait を実装します（依存性の逆転）。
#[derive(Default)]
pub struct InMemoryRoomRepository {
    registry: Mutex<Registry>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn register_connection(
        &self,
        connection_id: ConnectionId,
        sender: UnboundedSender<String>,
        connected_at: Timestamp,
    ) -> Result<(), RepositoryError> {
        let mut registry = self.registry.lock().await;
        if registry.connections.contains_key(&connection_id) {
            return Err(RepositoryError::DuplicateConnection(
                connection_id.to_string(),
            ));
        }
        registry.connections.insert(
            connection_id,
            ConnectionInfo {
                sender,
                connected_at,
            },
        );
        Ok(())
    }

    async fn unregister_connection(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Vec<RoomId>, RepositoryError> {
        let mut registry = self.registry.lock().await;
        let info = registry
            .connections
            .remove(connection_id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(connection_id.to_string()))?;
        tracing::debug!(
            "Connection '{}' unregistered (connected at {})",
            connection_id,
            info.connected_at
        );

        let mut left = Vec::new();
        for room in registry.rooms.values_mut() {
            if room.leave(connection_id) {
                left.push(room.id.clone());
            }
        }
        // 空になったルームは消滅する
        registry.rooms.retain(|_, room| !room.is_empty());
        left.sort();

        Ok(left)
    }

    async fn join_room(
        &self,
        room_id: RoomId,
        connection_id: ConnectionId,
        joined_at: Timestamp,
    ) -> Result<bool, RepositoryError> {
        let mut registry = self.registry.lock().await;
        if !registry.connections.contains_key(&connection_id) {
            return Err(RepositoryError::ConnectionNotFound(
                connection_id.to_string(),
            ));
        }
        let room = registry
            .rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id, joined_at));
        Ok(room.join(Member::new(connection_id, joined_at)))
    }

    async fn broadcast_targets(
        &self,
        room_id: &RoomId,
        sender: &ConnectionId,
    ) -> Result<Vec<ConnectionId>, RepositoryError> {
        let registry = self.registry.lock().await;
        match registry.rooms.get(room_id) {
            Some(room) if room.is_member(sender) => Ok(room.members_except(sender)),
            _ => Err(RepositoryError::NotAMember {
                connection_id: sender.to_string(),
                room_id: room_id.to_string(),
            }),
        }
    }

    async fn get_sender(&self, connection_id: &ConnectionId) -> Option<UnboundedSender<String>> {
        let registry = self.registry.lock().await;
        registry
            .connections
            .get(connection_id)
            .map(|info| info.sender.clone())
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<Room> {
        let registry = self.registry.lock().await;
        registry.rooms.get(room_id).cloned()
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let registry = self.registry.lock().await;
        let mut rooms: Vec<Room> = registry.rooms.values().cloned().collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        rooms
    }

    async fn count_connections(&self) -> usize {
        let registry = self.registry.lock().await;
        registry.connections.len()
    }
}
