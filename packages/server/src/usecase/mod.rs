//! UseCase 層
//!
//! リレーの各操作（接続、参加、収束、編集中継、切断）と、HTTP API 向けの
//! 参照系ユースケースを定義します。リレー系のユースケースは `hub` の単一タスクから
//! 1 件ずつ順番に実行されます。

mod close_connection;
mod error;
mod execute_code;
mod get_room_detail;
mod get_rooms;
mod hub;
mod join_room;
mod open_connection;
mod relay_live_edit;
mod roster;
mod sync_code;

pub use close_connection::CloseConnectionUseCase;
pub use error::{ExecuteCodeError, GetRoomDetailError, SyncCodeError};
pub use execute_code::ExecuteCodeUseCase;
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use hub::{RelayCommand, RelayHandle, RelayHub};
pub use join_room::JoinRoomUseCase;
pub use open_connection::OpenConnectionUseCase;
pub use relay_live_edit::RelayLiveEditUseCase;
pub use sync_code::SyncCodeUseCase;
