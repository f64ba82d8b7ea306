//! Participant-side protocol state.
//!
//! Keeps the local buffer, the roster and the own connection id, and decides what
//! to send back for every relay message. Kept free of I/O so the protocol can be
//! tested without a socket.

use serde_json::json;
use tandem_server::infrastructure::dto::websocket::{ClientMessage, RosterEntryDto, ServerMessage};

use crate::{buffer::Buffer, command::Position};

/// Something worth showing to the user
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Connected {
        connection_id: String,
    },
    /// Own JOIN acknowledged
    Entered {
        roster: Vec<RosterEntryDto>,
    },
    /// Someone else joined; the local buffer was pushed to them
    PeerJoined {
        name: String,
    },
    PeerLeft {
        name: String,
    },
    BufferReplaced,
    Cursor {
        name: String,
        position: serde_json::Value,
    },
    Highlight {
        range: serde_json::Value,
    },
}

/// What the client does in response to one relay message
#[derive(Debug, Default, PartialEq)]
pub struct Reaction {
    /// `None` when nothing changed (e.g., a duplicate code change)
    pub event: Option<SessionEvent>,
    pub replies: Vec<ClientMessage>,
}

/// Protocol state of one participant
#[derive(Debug, Clone)]
pub struct ParticipantState {
    room_id: String,
    display_name: String,
    connection_id: Option<String>,
    roster: Vec<RosterEntryDto>,
    buffer: Buffer,
}

impl ParticipantState {
    pub fn new(room_id: String, display_name: String) -> Self {
        Self {
            room_id,
            display_name,
            connection_id: None,
            roster: Vec::new(),
            buffer: Buffer::default(),
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn roster(&self) -> &[RosterEntryDto] {
        &self.roster
    }

    pub fn connection_id(&self) -> Option<&str> {
        self.connection_id.as_deref()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Forget everything tied to the previous connection
    ///
    /// The buffer is kept; peers overwrite it after the next JOIN anyway.
    pub fn reset_connection(&mut self) {
        self.connection_id = None;
        self.roster.clear();
    }

    pub fn join_message(&self) -> ClientMessage {
        ClientMessage::Join {
            room_id: self.room_id.clone(),
            display_name: Some(self.display_name.clone()),
        }
    }

    /// React to one message from the relay
    pub fn handle(&mut self, message: ServerMessage) -> Reaction {
        match message {
            ServerMessage::Connected { connection_id } => {
                self.connection_id = Some(connection_id.clone());
                Reaction {
                    event: Some(SessionEvent::Connected { connection_id }),
                    replies: Vec::new(),
                }
            }
            ServerMessage::Joined {
                roster,
                new_id,
                new_name,
            } => {
                self.roster = roster;
                if self.connection_id.as_deref() == Some(new_id.as_str()) {
                    return Reaction {
                        event: Some(SessionEvent::Entered {
                            roster: self.roster.clone(),
                        }),
                        replies: Vec::new(),
                    };
                }
                // 新規参加者に自分のバッファを届ける
                Reaction {
                    event: Some(SessionEvent::PeerJoined { name: new_name }),
                    replies: vec![ClientMessage::SyncCode {
                        target_connection_id: new_id,
                        code: self.buffer.as_str().to_string(),
                    }],
                }
            }
            ServerMessage::Disconnected {
                connection_id,
                display_name,
            } => {
                self.roster
                    .retain(|entry| entry.connection_id != connection_id);
                Reaction {
                    event: Some(SessionEvent::PeerLeft { name: display_name }),
                    replies: Vec::new(),
                }
            }
            ServerMessage::CodeChange { code } => Reaction {
                event: self
                    .buffer
                    .apply_remote(&code)
                    .then_some(SessionEvent::BufferReplaced),
                replies: Vec::new(),
            },
            ServerMessage::CursorActivity { name, position } => Reaction {
                event: Some(SessionEvent::Cursor { name, position }),
                replies: Vec::new(),
            },
            ServerMessage::TextHighlight { range } => Reaction {
                event: Some(SessionEvent::Highlight { range }),
                replies: Vec::new(),
            },
        }
    }

    /// Append a line locally and produce the change to broadcast
    pub fn append_line(&mut self, line: &str) -> ClientMessage {
        self.buffer.append_line(line);
        self.code_change()
    }

    /// Replace the buffer locally and produce the change to broadcast
    pub fn replace(&mut self, text: String) -> ClientMessage {
        self.buffer.set(text);
        self.code_change()
    }

    pub fn cursor(&self, (line, ch): Position) -> ClientMessage {
        ClientMessage::CursorActivity {
            room_id: self.room_id.clone(),
            name: Some(self.display_name.clone()),
            position: json!({"line": line, "ch": ch}),
        }
    }

    pub fn highlight(&self, from: Position, to: Position) -> ClientMessage {
        ClientMessage::TextHighlight {
            room_id: self.room_id.clone(),
            range: json!({
                "from": {"line": from.0, "ch": from.1},
                "to": {"line": to.0, "ch": to.1},
            }),
        }
    }

    fn code_change(&self) -> ClientMessage {
        ClientMessage::CodeChange {
            room_id: self.room_id.clone(),
            code: self.buffer.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str) -> RosterEntryDto {
        RosterEntryDto {
            connection_id: id.to_string(),
            display_name: name.to_string(),
        }
    }

    fn connected(name: &str, id: &str) -> ParticipantState {
        let mut state = ParticipantState::new("r1".to_string(), name.to_string());
        state.handle(ServerMessage::Connected {
            connection_id: id.to_string(),
        });
        state
    }

    #[test]
    fn test_own_join_does_not_push_buffer() {
        // テスト項目: 自分の JOINED ではロスターを置き換えるだけで sync-code を送らない
        // given (前提条件):
        let mut alice = connected("alice", "a");

        // when (操作):
        let reaction = alice.handle(ServerMessage::Joined {
            roster: vec![entry("a", "alice")],
            new_id: "a".to_string(),
            new_name: "alice".to_string(),
        });

        // then (期待する結果):
        assert!(reaction.replies.is_empty());
        assert_eq!(alice.roster(), &[entry("a", "alice")]);
        assert!(matches!(reaction.event, Some(SessionEvent::Entered { .. })));
    }

    #[test]
    fn test_peer_join_pushes_buffer_to_newcomer() {
        // テスト項目: 他人の JOINED には自分のバッファを sync-code で返す
        // given (前提条件):
        let mut alice = connected("alice", "a");
        alice.replace("let x=1;".to_string());

        // when (操作):
        let reaction = alice.handle(ServerMessage::Joined {
            roster: vec![entry("a", "alice"), entry("b", "bob")],
            new_id: "b".to_string(),
            new_name: "bob".to_string(),
        });

        // then (期待する結果):
        assert_eq!(
            reaction.replies,
            vec![ClientMessage::SyncCode {
                target_connection_id: "b".to_string(),
                code: "let x=1;".to_string(),
            }]
        );
        assert_eq!(alice.roster().len(), 2);
    }

    #[test]
    fn test_duplicate_code_change_is_silent() {
        // テスト項目: 同じ内容の CODE_CHANGE は 2 回目以降イベントにならない
        // given (前提条件):
        let mut bob = connected("bob", "b");

        // when (操作):
        let first = bob.handle(ServerMessage::CodeChange {
            code: "x".to_string(),
        });
        let second = bob.handle(ServerMessage::CodeChange {
            code: "x".to_string(),
        });

        // then (期待する結果):
        assert_eq!(first.event, Some(SessionEvent::BufferReplaced));
        assert_eq!(second.event, None);
        assert_eq!(bob.buffer().as_str(), "x");
    }

    #[test]
    fn test_newcomer_converges_on_last_push() {
        // テスト項目: 新規参加者は届いた収束プッシュのうち最後のものに収束する
        // given (前提条件):
        let mut carol = connected("carol", "c");
        carol.handle(ServerMessage::Joined {
            roster: vec![entry("a", "alice"), entry("b", "bob"), entry("c", "carol")],
            new_id: "c".to_string(),
            new_name: "carol".to_string(),
        });

        // when (操作):
        carol.handle(ServerMessage::CodeChange {
            code: "foo".to_string(),
        });
        carol.handle(ServerMessage::CodeChange {
            code: "bar".to_string(),
        });

        // then (期待する結果):
        assert_eq!(carol.buffer().as_str(), "bar");
    }

    #[test]
    fn test_disconnected_removes_roster_entry() {
        // テスト項目: DISCONNECTED で該当の接続がロスターから消える
        // given (前提条件):
        let mut alice = connected("alice", "a");
        alice.handle(ServerMessage::Joined {
            roster: vec![entry("a", "alice"), entry("b", "bob")],
            new_id: "b".to_string(),
            new_name: "bob".to_string(),
        });

        // when (操作):
        let reaction = alice.handle(ServerMessage::Disconnected {
            connection_id: "b".to_string(),
            display_name: "bob".to_string(),
        });

        // then (期待する結果):
        assert_eq!(alice.roster(), &[entry("a", "alice")]);
        assert_eq!(
            reaction.event,
            Some(SessionEvent::PeerLeft {
                name: "bob".to_string()
            })
        );
    }

    #[test]
    fn test_local_edits_produce_code_change() {
        // テスト項目: ローカルの編集はバッファ全体を載せた CODE_CHANGE になる
        // given (前提条件):
        let mut alice = connected("alice", "a");

        // when (操作):
        alice.append_line("a");
        let message = alice.append_line("b");

        // then (期待する結果):
        assert_eq!(
            message,
            ClientMessage::CodeChange {
                room_id: "r1".to_string(),
                code: "a\nb".to_string(),
            }
        );
    }

    #[test]
    fn test_reset_connection_keeps_buffer() {
        // テスト項目: 再接続の準備では接続 ID とロスターだけを忘れる
        // given (前提条件):
        let mut alice = connected("alice", "a");
        alice.replace("keep me".to_string());

        // when (操作):
        alice.reset_connection();

        // then (期待する結果):
        assert_eq!(alice.connection_id(), None);
        assert!(alice.roster().is_empty());
        assert_eq!(alice.buffer().as_str(), "keep me");
    }
}
