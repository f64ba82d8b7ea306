//! Conversion logic between DTOs and domain types.

use crate::domain::{
    ConnectionId, DisplayName, ExecutionOutcome, InboundMessage, LiveEdit, OpaquePayload,
    OutboundMessage, RoomId, RoomSnapshot, RosterEntry, ValueObjectError,
};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::ClientMessage> for InboundMessage {
    type Error = ValueObjectError;

    fn try_from(dto: dto::ClientMessage) -> Result<Self, Self::Error> {
        let message = match dto {
            dto::ClientMessage::Join {
                room_id,
                display_name,
            } => InboundMessage::Join {
                room_id: RoomId::new(room_id)?,
                display_name: display_name.map(DisplayName::new).unwrap_or_default(),
            },
            dto::ClientMessage::SyncCode {
                target_connection_id,
                code,
            } => InboundMessage::SyncCode {
                target: ConnectionId::try_from(target_connection_id.as_str())?,
                code,
            },
            dto::ClientMessage::CodeChange { room_id, code } => InboundMessage::LiveEdit {
                room_id: RoomId::new(room_id)?,
                edit: LiveEdit::CodeChange { code },
            },
            dto::ClientMessage::CursorActivity {
                room_id,
                name,
                position,
            } => InboundMessage::LiveEdit {
                room_id: RoomId::new(room_id)?,
                edit: LiveEdit::CursorActivity {
                    name: name.map(DisplayName::new),
                    position: OpaquePayload::new(position),
                },
            },
            dto::ClientMessage::TextHighlight { room_id, range } => InboundMessage::LiveEdit {
                room_id: RoomId::new(room_id)?,
                edit: LiveEdit::TextHighlight {
                    range: OpaquePayload::new(range),
                },
            },
        };
        Ok(message)
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&RosterEntry> for dto::RosterEntryDto {
    fn from(entry: &RosterEntry) -> Self {
        Self {
            connection_id: entry.connection_id.to_string(),
            display_name: entry.display_name.as_str().to_string(),
        }
    }
}

impl From<&OutboundMessage> for dto::ServerMessage {
    fn from(message: &OutboundMessage) -> Self {
        match message {
            OutboundMessage::Connected { connection_id } => Self::Connected {
                connection_id: connection_id.to_string(),
            },
            OutboundMessage::Joined {
                roster,
                new_id,
                new_name,
            } => Self::Joined {
                roster: roster.entries().iter().map(dto::RosterEntryDto::from).collect(),
                new_id: new_id.to_string(),
                new_name: new_name.as_str().to_string(),
            },
            OutboundMessage::Disconnected {
                connection_id,
                display_name,
            } => Self::Disconnected {
                connection_id: connection_id.to_string(),
                display_name: display_name.as_str().to_string(),
            },
            OutboundMessage::CodeChange { code } => Self::CodeChange { code: code.clone() },
            OutboundMessage::CursorActivity { name, position } => Self::CursorActivity {
                name: name.as_str().to_string(),
                position: position.as_value().clone(),
            },
            OutboundMessage::TextHighlight { range } => Self::TextHighlight {
                range: range.as_value().clone(),
            },
        }
    }
}

impl From<RoomSnapshot> for http::RoomSummaryDto {
    fn from(snapshot: RoomSnapshot) -> Self {
        Self {
            room_id: snapshot.room_id.into_string(),
            member_count: snapshot.roster.len(),
            roster: snapshot
                .roster
                .entries()
                .iter()
                .map(dto::RosterEntryDto::from)
                .collect(),
        }
    }
}

impl From<ExecutionOutcome> for http::ExecuteResponseDto {
    fn from(outcome: ExecutionOutcome) -> Self {
        Self {
            success: outcome.success,
            stdout: outcome.stdout,
            stderr: outcome.stderr,
            diagnostic: outcome.diagnostic,
        }
    }
}
