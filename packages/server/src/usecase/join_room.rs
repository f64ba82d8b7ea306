//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ディレクトリへの登録、ルーム参加、ロスターの組み立て、JOINED のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 新規参加者を含むルームの全員が、同じロスターを受け取ることを保証
//! - 既存の参加者は JOINED を受け取って初めて収束プッシュ（sync-code）を行う
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のルームへの参加、既存メンバーのいるルームへの参加
//! - エッジケース：同じルームへの二重参加（メンバーは重複しないが通知は再送される）
//! - エッジケース：最後のメンバーが去った後の再参加

use std::sync::Arc;

use crate::domain::{
    ConnectionDirectory, ConnectionId, DisplayName, OutboundMessage, RoomId, RoomMembership,
    Roster,
};

use super::roster::resolve_roster;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// ConnectionDirectory（接続 ID → 表示名）
    directory: Arc<dyn ConnectionDirectory>,
    /// RoomMembership（グループ宛て配送の抽象化）
    membership: Arc<dyn RoomMembership>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        directory: Arc<dyn ConnectionDirectory>,
        membership: Arc<dyn RoomMembership>,
    ) -> Self {
        Self {
            directory,
            membership,
        }
    }

    /// ルーム参加を実行
    ///
    /// JOINED は新規参加者本人を含むルームの全員に送られる。受信側は `new_id` を
    /// 自分の接続 ID と比べて「自分の参加」かどうかを判断する。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID
    /// * `room_id` - 参加先のルーム
    /// * `display_name` - 表示名（検証しない）
    ///
    /// # Returns
    ///
    /// ブロードキャストしたロスター（参加順）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_id: RoomId,
        display_name: DisplayName,
    ) -> Roster {
        // 1. ディレクトリに表示名を登録
        self.directory
            .record(connection_id, display_name.clone())
            .await;

        // 2. ルームに参加
        self.membership.join(connection_id, room_id.clone()).await;

        // 3. ロスターを組み立てる
        let roster =
            resolve_roster(self.directory.as_ref(), self.membership.as_ref(), &room_id).await;

        // 4. 本人を含む全員にブロードキャスト
        let joined = OutboundMessage::Joined {
            roster: roster.clone(),
            new_id: connection_id,
            new_name: display_name,
        };
        let targets = self.membership.broadcast_to(&room_id, &joined, None).await;
        tracing::info!(
            "Broadcasted joined for '{}' to {} member(s) of room '{}'",
            connection_id,
            targets.len(),
            room_id
        );

        roster
    }
}
