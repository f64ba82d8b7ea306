//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::RosterEntryDto;

/// Room as listed by `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub room_id: String,
    pub member_count: usize,
    pub roster: Vec<RosterEntryDto>,
}

/// Body of `POST /api/execute`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteRequestDto {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler: Option<String>,
}

/// Response of `POST /api/execute`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteResponseDto {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub diagnostic: Option<String>,
}
