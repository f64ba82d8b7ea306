//! UseCase: 接続開始処理
//!
//! トランスポートのセッションが開いたときに、送信チャネルを登録し、
//! サーバーが払い出した接続 ID を本人に知らせる。

use std::sync::Arc;

use crate::domain::{ConnectionId, OutboundMessage, PusherChannel, RoomMembership};

/// 接続開始のユースケース
pub struct OpenConnectionUseCase {
    /// RoomMembership（グループ宛て配送の抽象化）
    membership: Arc<dyn RoomMembership>,
}

impl OpenConnectionUseCase {
    /// 新しい OpenConnectionUseCase を作成
    pub fn new(membership: Arc<dyn RoomMembership>) -> Self {
        Self { membership }
    }

    /// 接続開始を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 払い出した接続 ID
    /// * `channel` - この接続へのメッセージ送信用チャネル
    pub async fn execute(&self, connection_id: ConnectionId, channel: PusherChannel) {
        self.membership.register(connection_id, channel).await;

        let greeting = OutboundMessage::Connected { connection_id };
        if let Err(e) = self.membership.send_to(connection_id, &greeting).await {
            tracing::warn!("Failed to greet connection '{}': {}", connection_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{
        dto::websocket::ServerMessage, membership::WebSocketRoomMembership,
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_open_connection_greets_with_connection_id() {
        // テスト項目: 接続直後に本人へ接続 ID が送られる
        // given (前提条件):
        let membership = Arc::new(WebSocketRoomMembership::new());
        let usecase = OpenConnectionUseCase::new(membership.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let connection_id = ConnectionId::generate();

        // when (操作):
        usecase.execute(connection_id, tx).await;

        // then (期待する結果):
        let received: ServerMessage = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(
            received,
            ServerMessage::Connected {
                connection_id: connection_id.to_string()
            }
        );
    }
}
