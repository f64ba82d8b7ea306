//! WebSocket message DTOs.
//!
//! Every frame is a JSON object tagged by `"type"`. Decoding into these enums is
//! the only place where untyped input is accepted; anything that does not fit is
//! dropped before it reaches the relay.

use serde::{Deserialize, Serialize};

/// Roster row as sent on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntryDto {
    pub connection_id: String,
    pub display_name: String,
}

/// Messages sent by a participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    Join {
        room_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
    },
    CodeChange {
        room_id: String,
        code: String,
    },
    SyncCode {
        target_connection_id: String,
        code: String,
    },
    CursorActivity {
        room_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default)]
        position: serde_json::Value,
    },
    TextHighlight {
        room_id: String,
        #[serde(default)]
        range: serde_json::Value,
    },
}

/// Messages sent by the relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    Connected {
        connection_id: String,
    },
    Joined {
        roster: Vec<RosterEntryDto>,
        new_id: String,
        new_name: String,
    },
    Disconnected {
        connection_id: String,
        display_name: String,
    },
    CodeChange {
        code: String,
    },
    CursorActivity {
        name: String,
        position: serde_json::Value,
    },
    TextHighlight {
        range: serde_json::Value,
    },
}
