//! WebSocket を使った RoomMembership 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - ルームごとのメンバー（参加順）と、接続ごとの所属ルームの管理
//! - ドメインのメッセージを JSON にエンコードして送信（send_to, broadcast_to）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! ルームは明示的に作成・削除せず、最初の join で現れ、メンバーが 0 人になると消えます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, DeliveryError, OutboundMessage, PusherChannel, RoomId, RoomMembership},
    infrastructure::dto::websocket::ServerMessage,
};

/// メンバーシップの索引
///
/// 3 つのマップは常にまとめて更新するため、1 つの Mutex で保護する。
#[derive(Default)]
struct MembershipIndex {
    /// 接続中の WebSocket sender
    channels: HashMap<ConnectionId, PusherChannel>,
    /// ルームごとのメンバー（参加順）
    rooms: HashMap<RoomId, Vec<ConnectionId>>,
    /// 接続ごとの所属ルーム（参加順）
    joined: HashMap<ConnectionId, Vec<RoomId>>,
}

/// WebSocket を使った RoomMembership 実装
#[derive(Default)]
pub struct WebSocketRoomMembership {
    index: Mutex<MembershipIndex>,
}

impl WebSocketRoomMembership {
    /// 新しい WebSocketRoomMembership を作成
    pub fn new() -> Self {
        Self::default()
    }

    fn encode(message: &OutboundMessage) -> Result<String, DeliveryError> {
        serde_json::to_string(&ServerMessage::from(message))
            .map_err(|e| DeliveryError::Encode(e.to_string()))
    }
}

#[async_trait]
impl RoomMembership for WebSocketRoomMembership {
    async fn register(&self, connection_id: ConnectionId, channel: PusherChannel) {
        let mut index = self.index.lock().await;
        index.channels.insert(connection_id, channel);
        tracing::debug!("Connection '{}' registered to membership", connection_id);
    }

    async fn join(&self, connection_id: ConnectionId, room_id: RoomId) {
        let mut index = self.index.lock().await;

        let members = index.rooms.entry(room_id.clone()).or_default();
        if members.contains(&connection_id) {
            tracing::debug!(
                "Connection '{}' is already a member of room '{}'",
                connection_id,
                room_id
            );
            return;
        }
        members.push(connection_id);
        index.joined.entry(connection_id).or_default().push(room_id);
    }

    async fn members_of(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        let index = self.index.lock().await;
        index.rooms.get(room_id).cloned().unwrap_or_default()
    }

    async fn rooms(&self) -> Vec<RoomId> {
        let index = self.index.lock().await;
        let mut rooms: Vec<RoomId> = index.rooms.keys().cloned().collect();
        rooms.sort();
        rooms
    }

    async fn send_to(
        &self,
        connection_id: ConnectionId,
        message: &OutboundMessage,
    ) -> Result<(), DeliveryError> {
        let content = Self::encode(message)?;
        let index = self.index.lock().await;

        let sender = index
            .channels
            .get(&connection_id)
            .ok_or_else(|| DeliveryError::ConnectionNotFound(connection_id.to_string()))?;
        sender
            .send(content)
            .map_err(|_| DeliveryError::ChannelClosed(connection_id.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast_to(
        &self,
        room_id: &RoomId,
        message: &OutboundMessage,
        excluding: Option<ConnectionId>,
    ) -> Vec<ConnectionId> {
        let content = match Self::encode(message) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Dropping broadcast to room '{}': {}", room_id, e);
                return Vec::new();
            }
        };
        let index = self.index.lock().await;

        let targets: Vec<ConnectionId> = index
            .rooms
            .get(room_id)
            .map(|members| {
                members
                    .iter()
                    .copied()
                    .filter(|id| Some(*id) != excluding)
                    .collect()
            })
            .unwrap_or_default();

        for target in &targets {
            match index.channels.get(target) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => {
                    if sender.send(content.clone()).is_err() {
                        tracing::warn!(
                            "Failed to push message to connection '{}' in room '{}'",
                            target,
                            room_id
                        );
                    }
                }
                None => {
                    tracing::warn!(
                        "Connection '{}' not found during broadcast to room '{}', skipping",
                        target,
                        room_id
                    );
                }
            }
        }

        targets
    }

    async fn on_disconnect(&self, connection_id: ConnectionId) -> Vec<RoomId> {
        let mut index = self.index.lock().await;

        index.channels.remove(&connection_id);
        let rooms = index.joined.remove(&connection_id).unwrap_or_default();
        for room_id in &rooms {
            let now_empty = match index.rooms.get_mut(room_id) {
                Some(members) => {
                    members.retain(|id| id != &connection_id);
                    members.is_empty()
                }
                None => false,
            };
            if now_empty {
                index.rooms.remove(room_id);
                tracing::debug!("Room '{}' is empty and has been dropped", room_id);
            }
        }

        tracing::debug!(
            "Connection '{}' unregistered from membership ({} room(s))",
            connection_id,
            rooms.len()
        );
        rooms
    }
}
