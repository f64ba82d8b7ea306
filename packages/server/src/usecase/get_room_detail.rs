//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{ConnectionDirectory, RoomId, RoomMembership, RoomSnapshot};

use super::{error::GetRoomDetailError, roster::resolve_roster};

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    directory: Arc<dyn ConnectionDirectory>,
    membership: Arc<dyn RoomMembership>,
}

impl GetRoomDetailUseCase {
    pub fn new(
        directory: Arc<dyn ConnectionDirectory>,
        membership: Arc<dyn RoomMembership>,
    ) -> Self {
        Self {
            directory,
            membership,
        }
    }

    /// ルームのロスターを取得する
    ///
    /// ルームは最初の参加で現れ、最後の退出で消える。メンバーのいない ID は
    /// （空文字列も含めて）存在しないルームとして扱う。
    pub async fn execute(&self, room_id: String) -> Result<RoomSnapshot, GetRoomDetailError> {
        let room_id = RoomId::new(room_id).map_err(|_| GetRoomDetailError::RoomNotFound)?;

        let roster =
            resolve_roster(self.directory.as_ref(), self.membership.as_ref(), &room_id).await;
        if roster.is_empty() {
            return Err(GetRoomDetailError::RoomNotFound);
        }

        Ok(RoomSnapshot { room_id, roster })
    }
}
