//! UseCase: 収束プッシュ（sync-code）の中継
//!
//! サーバーはドキュメントを持たない。既存の参加者が JOINED を見て、自分の
//! バッファを新規参加者宛てに送り返し、サーバーはそれを宛先 1 人にだけ
//! CODE_CHANGE として届ける。
//!
//! k 人の既存参加者がいれば新規参加者には最大 k 通の CODE_CHANGE が順不同で届き、
//! 最後に適用されたものが残る（後勝ち）。既存参加者同士のバッファが食い違っていると
//! 結果もどれか 1 つになるが、これは受け入れている整合性の隙間であり、
//! ここで順序付けや調停は行わない。

use std::sync::Arc;

use crate::domain::{ConnectionId, OutboundMessage, RoomMembership};

use super::error::SyncCodeError;

/// 収束プッシュ中継のユースケース
pub struct SyncCodeUseCase {
    /// RoomMembership（グループ宛て配送の抽象化）
    membership: Arc<dyn RoomMembership>,
}

impl SyncCodeUseCase {
    /// 新しい SyncCodeUseCase を作成
    pub fn new(membership: Arc<dyn RoomMembership>) -> Self {
        Self { membership }
    }

    /// 収束プッシュを宛先へ中継する
    ///
    /// # Arguments
    ///
    /// * `sender` - バッファを送ってきた既存参加者
    /// * `target` - 新規参加者
    /// * `code` - 送信者のバッファ全体
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 宛先のチャネルに積んだ
    /// * `Err(SyncCodeError)` - 宛先がもういない（送信者には通知しない）
    pub async fn execute(
        &self,
        sender: ConnectionId,
        target: ConnectionId,
        code: String,
    ) -> Result<(), SyncCodeError> {
        let bytes = code.len();
        self.membership
            .send_to(target, &OutboundMessage::CodeChange { code })
            .await?;

        tracing::debug!(
            "Relayed sync-code from '{}' to '{}' ({} bytes)",
            sender,
            target,
            bytes
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeliveryError, MockRoomMembership};

    #[tokio::test]
    async fn test_sync_code_is_unicast_to_target() {
        // テスト項目: sync-code は宛先 1 人にだけ CODE_CHANGE として届く（ブロードキャストしない）
        // given (前提条件):
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        let mut membership = MockRoomMembership::new();
        membership
            .expect_send_to()
            .withf(move |target, message| {
                *target == bob
                    && *message
                        == OutboundMessage::CodeChange {
                            code: "let x=1;".to_string(),
                        }
            })
            .times(1)
            .returning(|_, _| Ok(()));
        membership.expect_broadcast_to().never();
        let usecase = SyncCodeUseCase::new(Arc::new(membership));

        // when (操作):
        let result = usecase.execute(alice, bob, "let x=1;".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_sync_code_to_departed_target() {
        // テスト項目: 宛先がすでにいない場合はエラーになる（呼び出し側で吸収する）
        // given (前提条件):
        let ghost = ConnectionId::generate();
        let mut membership = MockRoomMembership::new();
        membership
            .expect_send_to()
            .returning(|id, _| Err(DeliveryError::ConnectionNotFound(id.to_string())));
        let usecase = SyncCodeUseCase::new(Arc::new(membership));

        // when (操作):
        let result = usecase
            .execute(ConnectionId::generate(), ghost, "x".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SyncCodeError::TargetUnreachable(
                DeliveryError::ConnectionNotFound(ghost.to_string())
            ))
        );
    }
}
