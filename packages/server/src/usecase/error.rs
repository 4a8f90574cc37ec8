//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::RepositoryError;

/// 接続処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// 切断処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisconnectError {
    #[error("Connection '{0}' is not registered")]
    ConnectionNotFound(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// ルーム参加のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinRoomError {
    #[error("Connection '{0}' is not registered")]
    ConnectionNotFound(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// 中継処理のエラー
///
/// 送信者にも受信者にも通知されず、ログに残るだけです。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("Connection '{connection_id}' is not a member of room '{room_id}'")]
    NotAMember {
        connection_id: String,
        room_id: String,
    },

    #[error(transparent)]
    Repository(RepositoryError),
}
