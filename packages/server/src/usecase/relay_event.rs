//! UseCase: イベント中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayEventUseCase::execute() メソッド
//! - 同じルームの送信者以外の全メンバーへの配信
//!
//! ### なぜこのテストが必要か
//! - 送信者に自分のイベントが折り返されないことを保証
//! - ルームに参加していない送信者のイベントが黙って破棄されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数メンバーへの配信
//! - エッジケース：送信者しかいないルーム（配信対象なし）
//! - 異常系：非メンバーからの送信

use std::sync::Arc;

use crate::domain::{ConnectionId, RepositoryError, RoomId, RoomRepository};

use super::error::RelayError;

/// イベント中継のユースケース
///
/// ペイロードは解釈せず、そのまま各メンバーの送信キューに積みます。
/// 各受信者のキューは FIFO なので、送信者ごとの順序は受信者ごとに保たれます。
pub struct RelayEventUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl RelayEventUseCase {
    /// 新しい RelayEventUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// イベントを中継する
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信元の接続 ID
    /// * `room_id` - 宛先ルーム
    /// * `payload` - 配信するシリアライズ済みメッセージ
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 配信できた接続のリスト
    /// * `Err(RelayError::NotAMember)` - 送信者がルームのメンバーではない（破棄）
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        room_id: &RoomId,
        payload: &str,
    ) -> Result<Vec<ConnectionId>, RelayError> {
        let targets = self
            .repository
            .broadcast_targets(room_id, sender)
            .await
            .map_err(|e| match e {
                RepositoryError::NotAMember {
                    connection_id,
                    room_id,
                } => RelayError::NotAMember {
                    connection_id,
                    room_id,
                },
                other => RelayError::Repository(other),
            })?;

        let mut delivered = Vec::with_capacity(targets.len());
        for target in targets {
            match self.repository.get_sender(&target).await {
                // 送信失敗は相手が切断済みということ。再送はしない
                Some(channel) if channel.send(payload.to_string()).is_ok() => {
                    delivered.push(target);
                }
                _ => {
                    tracing::debug!("Dropped relay to disconnected connection '{}'", target);
                }
            }
        }

        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionIdFactory, MockRoomRepository, Timestamp},
        infrastructure::repository::InMemoryRoomRepository,
    };
    use tokio::sync::mpsc;

    fn room_id(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    async fn create_member(
        repository: &Arc<InMemoryRoomRepository>,
        room: &str,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let id = ConnectionIdFactory::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        repository
            .register_connection(id, tx, Timestamp::new(0))
            .await
            .unwrap();
        repository
            .join_room(room_id(room), id, Timestamp::new(0))
            .await
            .unwrap();
        (id, rx)
    }

    #[tokio::test]
    async fn test_relay_to_other_members() {
        // テスト項目: 同じルームの送信者以外の全員に配信される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = RelayEventUseCase::new(repository.clone());
        let (alice, mut alice_rx) = create_member(&repository, "r1").await;
        let (bob, mut bob_rx) = create_member(&repository, "r1").await;
        let (carol, mut carol_rx) = create_member(&repository, "r1").await;
        let (_dave, mut dave_rx) = create_member(&repository, "r2").await;

        // when (操作): alice が r1 に送信
        let result = usecase.execute(&alice, &room_id("r1"), "payload").await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![bob, carol]));
        assert_eq!(bob_rx.try_recv().unwrap(), "payload");
        assert_eq!(carol_rx.try_recv().unwrap(), "payload");
        // 送信者と他ルームのメンバーには届かない
        assert!(alice_rx.try_recv().is_err());
        assert!(dave_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_relay_preserves_sender_order() {
        // テスト項目: 同じ送信者からのイベントは送信順に届く
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = RelayEventUseCase::new(repository.clone());
        let (alice, _alice_rx) = create_member(&repository, "r1").await;
        let (_bob, mut bob_rx) = create_member(&repository, "r1").await;

        // when (操作):
        for i in 0..5 {
            usecase
                .execute(&alice, &room_id("r1"), &format!("event-{i}"))
                .await
                .unwrap();
        }

        // then (期待する結果):
        for i in 0..5 {
            assert_eq!(bob_rx.try_recv().unwrap(), format!("event-{i}"));
        }
    }

    #[tokio::test]
    async fn test_relay_alone_in_room() {
        // テスト項目: 送信者しかいないルームでは配信対象がない
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = RelayEventUseCase::new(repository.clone());
        let (alice, mut alice_rx) = create_member(&repository, "r1").await;

        // when (操作):
        let result = usecase.execute(&alice, &room_id("r1"), "payload").await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![]));
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_relay_from_non_member_is_dropped() {
        // テスト項目: ルームに参加していない送信者のイベントは誰にも届かない
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = RelayEventUseCase::new(repository.clone());
        let (_alice, mut alice_rx) = create_member(&repository, "r1").await;
        let (mallory, _mallory_rx) = create_member(&repository, "r2").await;

        // when (操作): r2 のメンバーが r1 宛てに送信
        let result = usecase.execute(&mallory, &room_id("r1"), "payload").await;

        // then (期待する結果):
        assert!(matches!(result, Err(RelayError::NotAMember { .. })));
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_relay_skips_closed_channels() {
        // テスト項目: 受信側のチャンネルが閉じていても他のメンバーへの配信は続く
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = RelayEventUseCase::new(repository.clone());
        let (alice, _alice_rx) = create_member(&repository, "r1").await;
        let (_bob, bob_rx) = create_member(&repository, "r1").await;
        let (carol, mut carol_rx) = create_member(&repository, "r1").await;
        drop(bob_rx);

        // when (操作):
        let result = usecase.execute(&alice, &room_id("r1"), "payload").await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![carol]));
        assert_eq!(carol_rx.try_recv().unwrap(), "payload");
    }

    #[tokio::test]
    async fn test_relay_does_not_look_up_senders_for_non_member() {
        // テスト項目: メンバーシップ確認に失敗した場合は送信チャンネルを参照しない
        // given (前提条件):
        let mut repository = MockRoomRepository::new();
        repository
            .expect_broadcast_targets()
            .times(1)
            .returning(|room_id, sender| {
                Err(RepositoryError::NotAMember {
                    connection_id: sender.to_string(),
                    room_id: room_id.to_string(),
                })
            });
        repository.expect_get_sender().times(0);
        let usecase = RelayEventUseCase::new(Arc::new(repository));
        let sender = ConnectionIdFactory::generate();

        // when (操作):
        let result = usecase.execute(&sender, &room_id("r1"), "payload").await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RelayError::NotAMember {
                connection_id: sender.to_string(),
                room_id: "r1".to_string(),
            })
        );
    }
}
