//! Message formatting utilities for client display.

use tandem_server::infrastructure::dto::{http::ExecuteResponseDto, websocket::RosterEntryDto};
use tandem_shared::time::{Clock, timestamp_to_local_clock};

use crate::session::SessionEvent;

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a relay event, stamped with the clock's current time
    pub fn format_event(event: &SessionEvent, self_id: Option<&str>, clock: &dyn Clock) -> String {
        let stamp = timestamp_to_local_clock(clock.now_millis());
        match event {
            SessionEvent::Connected { connection_id } => {
                format!("\n[{}] connected as {}\n", stamp, connection_id)
            }
            SessionEvent::Entered { roster } => {
                format!("\n[{}] joined the room{}", stamp, Self::format_roster(roster, self_id))
            }
            SessionEvent::PeerJoined { name } => {
                format!("\n[{}] + {} joined (sent them the buffer)\n", stamp, display(name))
            }
            SessionEvent::PeerLeft { name } => {
                format!("\n[{}] - {} left\n", stamp, display(name))
            }
            SessionEvent::BufferReplaced => format!("\n[{}] buffer updated (:show)\n", stamp),
            SessionEvent::Cursor { name, position } => {
                format!("\n[{}] {} moved cursor to {}\n", stamp, display(name), position)
            }
            SessionEvent::Highlight { range } => {
                format!("\n[{}] highlight {}\n", stamp, range)
            }
        }
    }

    /// Format the roster, marking the current connection
    pub fn format_roster(roster: &[RosterEntryDto], self_id: Option<&str>) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\nParticipants:\n", RULE));

        if roster.is_empty() {
            output.push_str("(No participants)\n");
        } else {
            for entry in roster {
                let is_me = Some(entry.connection_id.as_str()) == self_id;
                let me_suffix = if is_me { " (me)" } else { "" };
                output.push_str(&format!(
                    "{}{} [{}]\n",
                    display(&entry.display_name),
                    me_suffix,
                    entry.connection_id
                ));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format the buffer with line numbers
    pub fn format_buffer(code: &str) -> String {
        if code.is_empty() {
            return "(empty buffer)\n".to_string();
        }
        code.lines()
            .enumerate()
            .map(|(index, line)| format!("{:>4} | {}\n", index, line))
            .collect()
    }

    /// Format the result of `:run`
    pub fn format_outcome(outcome: &ExecuteResponseDto) -> String {
        let mut output = String::new();
        let status = if outcome.success { "ok" } else { "failed" };
        output.push_str(&format!("\n---- run: {} ----\n", status));
        if !outcome.stdout.is_empty() {
            output.push_str(&outcome.stdout);
            if !outcome.stdout.ends_with('\n') {
                output.push('\n');
            }
        }
        if !outcome.stderr.is_empty() {
            output.push_str(&format!("stderr:\n{}\n", outcome.stderr.trim_end()));
        }
        if let Some(diagnostic) = &outcome.diagnostic {
            output.push_str(&format!("diagnostic:\n{}\n", diagnostic.trim_end()));
        }
        output.push_str("----------------\n");
        output
    }

    pub fn format_help() -> String {
        "\n<text>                         append a line to the buffer\n\
         :set <text>                    replace the whole buffer\n\
         :show                          print the buffer\n\
         :who                           print the participants\n\
         :cursor <line> <ch>            share your cursor\n\
         :highlight <l1> <c1> <l2> <c2> share a selection\n\
         :run [compiler]                execute the buffer\n\
         :quit                          leave\n"
            .to_string()
    }
}

fn display(name: &str) -> &str {
    if name.is_empty() { "(anonymous)" } else { name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_shared::time::FixedClock;

    fn entry(id: &str, name: &str) -> RosterEntryDto {
        RosterEntryDto {
            connection_id: id.to_string(),
            display_name: name.to_string(),
        }
    }

    #[test]
    fn test_format_roster_marks_self() {
        // テスト項目: ロスターの表示で自分に印が付き、空の表示名は匿名として出る
        // given (前提条件):
        let roster = vec![entry("a", "alice"), entry("b", "")];

        // when (操作):
        let result = MessageFormatter::format_roster(&roster, Some("a"));

        // then (期待する結果):
        assert!(result.contains("alice (me) [a]"));
        assert!(result.contains("(anonymous) [b]"));
        assert!(result.contains("Participants:"));
    }

    #[test]
    fn test_format_empty_roster() {
        // テスト項目: 参加者が空の場合、適切なメッセージが表示される
        // given (前提条件):
        let roster = vec![];

        // when (操作):
        let result = MessageFormatter::format_roster(&roster, None);

        // then (期待する結果):
        assert!(result.contains("(No participants)"));
    }

    #[test]
    fn test_format_buffer_numbers_lines() {
        // テスト項目: バッファは行番号付きで表示される
        // given (前提条件):
        let code = "a\nb";

        // when (操作):
        let result = MessageFormatter::format_buffer(code);

        // then (期待する結果):
        assert_eq!(result, "   0 | a\n   1 | b\n");
        assert_eq!(MessageFormatter::format_buffer(""), "(empty buffer)\n");
    }

    #[test]
    fn test_format_peer_left() {
        // テスト項目: 退出通知に表示名が含まれる
        // given (前提条件):
        let event = SessionEvent::PeerLeft {
            name: "bob".to_string(),
        };

        // when (操作):
        let result = MessageFormatter::format_event(&event, None, &FixedClock::new(1672498800000));

        // then (期待する結果):
        assert!(result.contains("- bob left"));
    }

    #[test]
    fn test_format_failed_outcome() {
        // テスト項目: 失敗した実行結果は診断メッセージ付きで表示される
        // given (前提条件):
        let outcome = ExecuteResponseDto {
            success: false,
            stdout: String::new(),
            stderr: String::new(),
            diagnostic: Some("SyntaxError: Unexpected token".to_string()),
        };

        // when (操作):
        let result = MessageFormatter::format_outcome(&outcome);

        // then (期待する結果):
        assert!(result.contains("run: failed"));
        assert!(result.contains("SyntaxError: Unexpected token"));
    }
}
