//! Shared application state.

use std::sync::Arc;

use crate::usecase::{ExecuteCodeUseCase, GetRoomDetailUseCase, GetRoomsUseCase, RelayHandle};

/// Shared application state
pub struct AppState {
    /// RelayHandle（リレーハブへのイベント送信口）
    pub relay: RelayHandle,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// ExecuteCodeUseCase（コード実行プロキシのユースケース）
    pub execute_code_usecase: Arc<ExecuteCodeUseCase>,
}
