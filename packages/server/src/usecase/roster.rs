//! ロスターの組み立て
//!
//! ロスターはキャッシュしない。メンバーシップの索引を参加順にたどり、
//! ディレクトリで表示名に解決する。ディレクトリに登録がなければ空の表示名を使う。

use crate::domain::{ConnectionDirectory, DisplayName, RoomId, RoomMembership, Roster, RosterEntry};

pub(crate) async fn resolve_roster(
    directory: &dyn ConnectionDirectory,
    membership: &dyn RoomMembership,
    room_id: &RoomId,
) -> Roster {
    let members = membership.members_of(room_id).await;

    let mut entries = Vec::with_capacity(members.len());
    for connection_id in members {
        let display_name = directory
            .lookup(&connection_id)
            .await
            .unwrap_or_else(DisplayName::blank);
        entries.push(RosterEntry::new(connection_id, display_name));
    }

    Roster::new(entries)
}
