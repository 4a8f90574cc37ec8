//! Server state shared by all handlers.

use std::sync::Arc;

use crate::{domain::RoomRepository, infrastructure::repository::InMemoryRoomRepository};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn RoomRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryRoomRepository::new()))
    }
}
