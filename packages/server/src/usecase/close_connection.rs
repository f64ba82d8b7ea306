//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CloseConnectionUseCase::execute() メソッド
//! - 所属していた全ルームへの DISCONNECTED の通知、ディレクトリからの削除
//!
//! ### なぜこのテストが必要か
//! - 複数ルームに所属していた接続が去ったとき、各ルームにちょうど 1 回ずつ通知されることを保証
//! - ディレクトリの登録が残り続けないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 つのルームに所属する接続の切断
//! - エッジケース：JOIN する前に切断（通知対象なし）
//! - エッジケース：ディレクトリに登録がない（空の表示名で通知する）

use std::sync::Arc;

use crate::domain::{
    ConnectionDirectory, ConnectionId, DisplayName, OutboundMessage, RoomId, RoomMembership,
};

/// 切断のユースケース
pub struct CloseConnectionUseCase {
    /// ConnectionDirectory（接続 ID → 表示名）
    directory: Arc<dyn ConnectionDirectory>,
    /// RoomMembership（グループ宛て配送の抽象化）
    membership: Arc<dyn RoomMembership>,
}

impl CloseConnectionUseCase {
    /// 新しい CloseConnectionUseCase を作成
    pub fn new(
        directory: Arc<dyn ConnectionDirectory>,
        membership: Arc<dyn RoomMembership>,
    ) -> Self {
        Self {
            directory,
            membership,
        }
    }

    /// 切断を実行
    ///
    /// 表示名が引けなくても通知は省略しない（空の表示名で送る）。
    ///
    /// # Returns
    ///
    /// DISCONNECTED を通知したルームの一覧
    pub async fn execute(&self, connection_id: ConnectionId) -> Vec<RoomId> {
        // 1. 全ルームから外す
        let rooms = self.membership.on_disconnect(connection_id).await;

        // 2. 各ルームの残りのメンバーに通知
        let display_name = self
            .directory
            .lookup(&connection_id)
            .await
            .unwrap_or_else(DisplayName::blank);
        let left = OutboundMessage::Disconnected {
            connection_id,
            display_name,
        };
        for room_id in &rooms {
            let targets = self
                .membership
                .broadcast_to(room_id, &left, Some(connection_id))
                .await;
            tracing::info!(
                "Broadcasted disconnected for '{}' to {} member(s) of room '{}'",
                connection_id,
                targets.len(),
                room_id
            );
        }

        // 3. ディレクトリから削除
        self.directory.remove(&connection_id).await;
        tracing::debug!(
            "{} connection(s) remain in the directory",
            self.directory.count_entries().await
        );

        rooms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockConnectionDirectory, MockRoomMembership},
        infrastructure::{
            dto::websocket::ServerMessage, membership::WebSocketRoomMembership,
            repository::InMemoryConnectionDirectory,
        },
        usecase::JoinRoomUseCase,
    };
    use tokio::sync::mpsc;

    fn room(name: &str) -> RoomId {
        RoomId::new(name.to_string()).unwrap()
    }

    async fn connect(
        membership: &WebSocketRoomMembership,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = ConnectionId::generate();
        membership.register(id, tx).await;
        (id, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerMessage> {
        let mut messages = Vec::new();
        while let Ok(raw) = rx.try_recv() {
            messages.push(serde_json::from_str(&raw).unwrap());
        }
        messages
    }

    fn disconnected_count(messages: &[ServerMessage], who: ConnectionId) -> usize {
        messages
            .iter()
            .filter(|m| {
                matches!(m, ServerMessage::Disconnected { connection_id, .. }
                    if *connection_id == who.to_string())
            })
            .count()
    }

    #[tokio::test]
    async fn test_disconnect_notifies_each_room_once() {
        // テスト項目: R1, R2 に所属する D が切断すると、各ルームの残りのメンバーに 1 回ずつ通知される
        // given (前提条件):
        let directory = Arc::new(InMemoryConnectionDirectory::new());
        let membership = Arc::new(WebSocketRoomMembership::new());
        let join = JoinRoomUseCase::new(directory.clone(), membership.clone());
        let usecase = CloseConnectionUseCase::new(directory.clone(), membership.clone());

        let (d, _d_rx) = connect(&membership).await;
        let (r1_member, mut r1_rx) = connect(&membership).await;
        let (r2_member, mut r2_rx) = connect(&membership).await;
        join.execute(d, room("R1"), "dave".into()).await;
        join.execute(d, room("R2"), "dave".into()).await;
        join.execute(r1_member, room("R1"), "erin".into()).await;
        join.execute(r2_member, room("R2"), "fay".into()).await;
        drain(&mut r1_rx);
        drain(&mut r2_rx);

        // when (操作):
        let rooms = usecase.execute(d).await;

        // then (期待する結果):
        assert_eq!(rooms, vec![room("R1"), room("R2")]);
        let r1_messages = drain(&mut r1_rx);
        let r2_messages = drain(&mut r2_rx);
        assert_eq!(disconnected_count(&r1_messages, d), 1);
        assert_eq!(disconnected_count(&r2_messages, d), 1);
        assert_eq!(
            r1_messages[0],
            ServerMessage::Disconnected {
                connection_id: d.to_string(),
                display_name: "dave".to_string(),
            }
        );
        assert_eq!(directory.lookup(&d).await, None);
    }

    #[tokio::test]
    async fn test_disconnect_before_join_notifies_nobody() {
        // テスト項目: JOIN する前に切断した場合、通知先はなくディレクトリも空のまま
        // given (前提条件):
        let directory = Arc::new(InMemoryConnectionDirectory::new());
        let membership = Arc::new(WebSocketRoomMembership::new());
        let usecase = CloseConnectionUseCase::new(directory.clone(), membership.clone());
        let (lurker, _rx) = connect(&membership).await;

        // when (操作):
        let rooms = usecase.execute(lurker).await;

        // then (期待する結果):
        assert!(rooms.is_empty());
        assert_eq!(directory.count_entries().await, 0);
    }

    #[tokio::test]
    async fn test_missing_name_does_not_suppress_notification() {
        // テスト項目: ディレクトリに表示名がなくても、空の表示名で通知される
        // given (前提条件):
        let ghost = ConnectionId::generate();
        let mut directory = MockConnectionDirectory::new();
        directory.expect_lookup().returning(|_| None);
        directory.expect_remove().times(1).returning(|_| ());
        directory.expect_count_entries().returning(|| 0);

        let mut membership = MockRoomMembership::new();
        membership
            .expect_on_disconnect()
            .returning(|_| vec![RoomId::new("r1".to_string()).unwrap()]);
        membership
            .expect_broadcast_to()
            .withf(move |room_id, message, excluding| {
                room_id.as_str() == "r1"
                    && *excluding == Some(ghost)
                    && *message
                        == OutboundMessage::Disconnected {
                            connection_id: ghost,
                            display_name: DisplayName::blank(),
                        }
            })
            .times(1)
            .returning(|_, _, _| Vec::new());

        let usecase = CloseConnectionUseCase::new(Arc::new(directory), Arc::new(membership));

        // when (操作):
        let rooms = usecase.execute(ghost).await;

        // then (期待する結果):
        assert_eq!(rooms.len(), 1);
    }
}
