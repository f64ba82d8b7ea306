//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{ExecuteRequestDto, ExecuteResponseDto, RoomSummaryDto},
    ui::state::AppState,
    usecase::{ExecuteCodeError, GetRoomDetailError},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms with at least one member
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.into_iter().map(RoomSummaryDto::from).collect())
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomSummaryDto>, StatusCode> {
    match state.get_room_detail_usecase.execute(room_id).await {
        Ok(snapshot) => Ok(Json(RoomSummaryDto::from(snapshot))),
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
    }
}

/// Forward code to the execution service
///
/// The outcome goes back to the caller only; it is never broadcast to the room.
pub async fn execute_code(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExecuteRequestDto>,
) -> Result<Json<ExecuteResponseDto>, (StatusCode, Json<ExecuteResponseDto>)> {
    match state
        .execute_code_usecase
        .execute(request.code, request.compiler)
        .await
    {
        Ok(outcome) => Ok(Json(ExecuteResponseDto::from(outcome))),
        Err(ExecuteCodeError::MalformedResponse(body)) => {
            tracing::warn!("Execution service returned a non-JSON response");
            Err((StatusCode::BAD_REQUEST, Json(failure(body))))
        }
        Err(e @ ExecuteCodeError::ServiceUnavailable(_)) => {
            tracing::warn!("{}", e);
            Err((StatusCode::BAD_GATEWAY, Json(failure(e.to_string()))))
        }
    }
}

fn failure(diagnostic: String) -> ExecuteResponseDto {
    ExecuteResponseDto {
        success: false,
        stdout: String::new(),
        stderr: String::new(),
        diagnostic: Some(diagnostic),
    }
}
