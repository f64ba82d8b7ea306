//! UseCase: ルーム一覧取得
//!
//! メンバーが 1 人以上いるルームのロスターを ID 順に返す。

use std::sync::Arc;

use crate::domain::{ConnectionDirectory, RoomMembership, RoomSnapshot};

use super::roster::resolve_roster;

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    directory: Arc<dyn ConnectionDirectory>,
    membership: Arc<dyn RoomMembership>,
}

impl GetRoomsUseCase {
    pub fn new(
        directory: Arc<dyn ConnectionDirectory>,
        membership: Arc<dyn RoomMembership>,
    ) -> Self {
        Self {
            directory,
            membership,
        }
    }

    pub async fn execute(&self) -> Vec<RoomSnapshot> {
        let mut snapshots = Vec::new();
        for room_id in self.membership.rooms().await {
            let roster =
                resolve_roster(self.directory.as_ref(), self.membership.as_ref(), &room_id).await;
            // 一覧取得と組み立ての間に空になったルームは出さない
            if roster.is_empty() {
                continue;
            }
            snapshots.push(RoomSnapshot { room_id, roster });
        }
        snapshots
    }
}
