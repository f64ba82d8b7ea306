//! ルームメンバーシップ（グループ宛て pub/sub）のインターフェース
//!
//! 接続のルーム参加と、「ルーム全員」「送信者以外のルーム全員」「特定の接続」
//! 宛ての配送を抽象化します。実装は Infrastructure 層（WebSocket）が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, DeliveryError, OutboundMessage, RoomId};

/// 接続ごとの送信チャネル（エンコード済みのテキストフレーム）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomMembership: Send + Sync {
    /// 新しいトランスポートセッションの送信チャネルを登録する
    async fn register(&self, connection_id: ConnectionId, channel: PusherChannel);

    /// ルームに参加する（同じルームへの二重参加は重複しない）
    async fn join(&self, connection_id: ConnectionId, room_id: RoomId);

    /// ルームのメンバー（参加順）
    async fn members_of(&self, room_id: &RoomId) -> Vec<ConnectionId>;

    /// メンバーが 1 人以上いるルームの一覧
    async fn rooms(&self) -> Vec<RoomId>;

    /// 特定の接続へ送る
    async fn send_to(
        &self,
        connection_id: ConnectionId,
        message: &OutboundMessage,
    ) -> Result<(), DeliveryError>;

    /// ルームの全員（`excluding` を除く）へ送る
    ///
    /// 個々の宛先への配送失敗は許容し、送信を試みた宛先の一覧を返す。
    async fn broadcast_to(
        &self,
        room_id: &RoomId,
        message: &OutboundMessage,
        excluding: Option<ConnectionId>,
    ) -> Vec<ConnectionId>;

    /// 切断処理：全ルームから外し、送信チャネルを破棄する
    ///
    /// 所属していたルームを参加順に返す。メンバーが 0 人になったルームは消える。
    async fn on_disconnect(&self, connection_id: ConnectionId) -> Vec<RoomId>;
}
