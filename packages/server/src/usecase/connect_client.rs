//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - 接続の登録（送信チャンネルの保持、重複チェック）
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続の登録
//! - 異常系：同じ接続 ID の二重登録

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::domain::{ConnectionId, RepositoryError, RoomRepository, Timestamp};

use super::error::ConnectError;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 接続を登録する
    ///
    /// 登録直後の接続はどのルームにも属していません。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 接続 ID
    /// * `sender` - この接続へのメッセージ送信チャンネル
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: UnboundedSender<String>,
    ) -> Result<(), ConnectError> {
        self.repository
            .register_connection(connection_id, sender, Timestamp::now())
            .await
            .map_err(|e| match e {
                RepositoryError::DuplicateConnection(id) => ConnectError::DuplicateConnection(id),
                other => ConnectError::Repository(other),
            })
    }
}
