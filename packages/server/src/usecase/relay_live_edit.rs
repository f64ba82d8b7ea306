//! UseCase: 編集イベントの中継
//!
//! CODE_CHANGE / CURSOR_ACTIVITY / TEXT_HIGHLIGHT を、送信者を除くルームの全員へ
//! そのまま転送する。バッファリング、重複排除、間引きは行わない。
//! メンバーシップとディレクトリは読むだけで、変更しない。

use std::sync::Arc;

use crate::domain::{
    ConnectionDirectory, ConnectionId, DisplayName, LiveEdit, OutboundMessage, RoomId,
    RoomMembership,
};

/// 編集イベント中継のユースケース
pub struct RelayLiveEditUseCase {
    /// ConnectionDirectory（カーソル表示名の補完にのみ使う）
    directory: Arc<dyn ConnectionDirectory>,
    /// RoomMembership（グループ宛て配送の抽象化）
    membership: Arc<dyn RoomMembership>,
}

impl RelayLiveEditUseCase {
    /// 新しい RelayLiveEditUseCase を作成
    pub fn new(
        directory: Arc<dyn ConnectionDirectory>,
        membership: Arc<dyn RoomMembership>,
    ) -> Self {
        Self {
            directory,
            membership,
        }
    }

    /// 編集イベントを中継する
    ///
    /// # Returns
    ///
    /// 送信を試みた宛先（送信者以外のルームメンバー）
    pub async fn execute(
        &self,
        sender: ConnectionId,
        room_id: RoomId,
        edit: LiveEdit,
    ) -> Vec<ConnectionId> {
        let kind = edit.kind();
        let message = match edit {
            LiveEdit::CodeChange { code } => OutboundMessage::CodeChange { code },
            LiveEdit::CursorActivity { name, position } => {
                let name = match name {
                    Some(name) => name,
                    None => self
                        .directory
                        .lookup(&sender)
                        .await
                        .unwrap_or_else(DisplayName::blank),
                };
                OutboundMessage::CursorActivity { name, position }
            }
            LiveEdit::TextHighlight { range } => OutboundMessage::TextHighlight { range },
        };

        let targets = self
            .membership
            .broadcast_to(&room_id, &message, Some(sender))
            .await;
        tracing::debug!(
            "Relayed {} from '{}' to {} member(s) of room '{}'",
            kind,
            sender,
            targets.len(),
            room_id
        );
        targets
    }
}
