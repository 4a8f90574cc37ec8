//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルームのオンデマンド作成と冪等な参加
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ルームへの参加、既存ルームへの参加
//! - エッジケース：同じルームへの二重参加（何もしない）
//! - 異常系：登録されていない接続からの参加

use std::sync::Arc;

use crate::domain::{ConnectionId, RepositoryError, RoomId, RoomRepository, Timestamp};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルームに参加する
    ///
    /// 参加後、この接続から `room_id` 宛てに送られたイベントは他のメンバーへ中継されます。
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 新たに参加した
    /// * `Ok(false)` - すでに参加済み（何もしない）
    /// * `Err(JoinRoomError)` - 接続が登録されていない
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_id: RoomId,
    ) -> Result<bool, JoinRoomError> {
        self.repository
            .join_room(room_id, connection_id, Timestamp::now())
            .await
            .map_err(|e| match e {
                RepositoryError::ConnectionNotFound(id) => JoinRoomError::ConnectionNotFound(id),
                other => JoinRoomError::Repository(other),
            })
    }
}
