//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - 切断時に参加中の全ルームから退出すること
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数ルームに参加中の接続の切断
//! - エッジケース：最後のメンバーの切断（ルームが消滅する）
//! - 異常系：存在しない接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, RepositoryError, RoomId, RoomRepository};

use super::error::DisconnectError;

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<RoomId>)` - 退出したルームのリスト
    /// * `Err(DisconnectError)` - 接続が登録されていない
    pub async fn execute(&self, connection_id: &ConnectionId) -> Result<Vec<RoomId>, DisconnectError> {
        self.repository
            .unregister_connection(connection_id)
            .await
            .map_err(|e| match e {
                RepositoryError::ConnectionNotFound(id) => DisconnectError::ConnectionNotFound(id),
                other => DisconnectError::Repository(other),
            })
    }
}
