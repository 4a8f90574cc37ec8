//! UseCase 層
//!
//! 中継ロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod join_room;
pub mod relay_event;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, DisconnectError, JoinRoomError, RelayError};
pub use join_room::JoinRoomUseCase;
pub use relay_event::RelayEventUseCase;
