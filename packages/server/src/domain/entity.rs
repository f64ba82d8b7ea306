//! エンティティ

use serde::Serialize;

use super::value_object::{ConnectionId, DisplayName, RoomId};

/// ロスターの 1 行（接続 ID と表示名）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub connection_id: ConnectionId,
    pub display_name: DisplayName,
}

impl RosterEntry {
    pub fn new(connection_id: ConnectionId, display_name: DisplayName) -> Self {
        Self {
            connection_id,
            display_name,
        }
    }
}

/// ルームの参加者一覧
///
/// 参加順に並ぶ。キャッシュせず、必要になるたびにメンバーシップから組み立てる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster(Vec<RosterEntry>);

impl Roster {
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.0.iter().any(|entry| &entry.connection_id == connection_id)
    }

    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.0.iter().map(|entry| entry.connection_id).collect()
    }

    pub fn display_names(&self) -> Vec<&str> {
        self.0
            .iter()
            .map(|entry| entry.display_name.as_str())
            .collect()
    }
}

/// ある時点のルームの様子（HTTP API 向け）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub roster: Roster,
}
