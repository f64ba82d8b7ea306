//! リレーが送受信するメッセージのドメイン表現
//!
//! ワイヤ上の表現（JSON）は `infrastructure::dto::websocket` が担当する。

use super::{
    entity::Roster,
    value_object::{ConnectionId, DisplayName, OpaquePayload, RoomId},
};

/// 接続から届いたメッセージ（トランスポート境界で検証済み）
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    /// ルームへの参加要求
    Join {
        room_id: RoomId,
        display_name: DisplayName,
    },
    /// 新規参加者へ自分のバッファを届ける（収束プロトコル）
    SyncCode { target: ConnectionId, code: String },
    /// ルームの他の参加者へ中継する編集イベント
    LiveEdit { room_id: RoomId, edit: LiveEdit },
}

/// サーバーから接続へ送るメッセージ
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundMessage {
    /// 接続直後に本人へ接続 ID を知らせる
    Connected { connection_id: ConnectionId },
    /// ルームの参加者が変わった（参加者本人を含む全員に送る）
    Joined {
        roster: Roster,
        new_id: ConnectionId,
        new_name: DisplayName,
    },
    /// 参加者が去った
    Disconnected {
        connection_id: ConnectionId,
        display_name: DisplayName,
    },
    /// バッファ全体の置き換え
    CodeChange { code: String },
    /// カーソル位置（ベストエフォート）
    CursorActivity {
        name: DisplayName,
        position: OpaquePayload,
    },
    /// 選択範囲のハイライト（ベストエフォート）
    TextHighlight { range: OpaquePayload },
}

/// ルーム内の他の参加者へ中継する編集イベント
#[derive(Debug, Clone, PartialEq)]
pub enum LiveEdit {
    CodeChange {
        code: String,
    },
    /// `name` が省略された場合はディレクトリの表示名で補う
    CursorActivity {
        name: Option<DisplayName>,
        position: OpaquePayload,
    },
    TextHighlight {
        range: OpaquePayload,
    },
}

impl LiveEdit {
    /// ログ用の種別名
    pub fn kind(&self) -> &'static str {
        match self {
            LiveEdit::CodeChange { .. } => "code-change",
            LiveEdit::CursorActivity { .. } => "cursor-activity",
            LiveEdit::TextHighlight { .. } => "text-highlight",
        }
    }
}
