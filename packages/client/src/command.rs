//! Input line parsing.
//!
//! Lines starting with `:` are commands; anything else is appended to the buffer.

use crate::error::ClientError;

/// Position in the buffer as `(line, ch)`, both 0-indexed
pub type Position = (u32, u32);

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append the line to the buffer
    Append(String),
    /// `:set <text>`
    Set(String),
    /// `:show`
    Show,
    /// `:who`
    Who,
    /// `:cursor <line> <ch>`
    Cursor(Position),
    /// `:highlight <l1> <c1> <l2> <c2>`
    Highlight { from: Position, to: Position },
    /// `:run [compiler]`
    Run(Option<String>),
    /// `:help`
    Help,
    /// `:quit`
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ClientError> {
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Command::Append(line.to_string()));
        };

        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        match name {
            "set" => Ok(Command::Set(args.to_string())),
            "show" => Ok(Command::Show),
            "who" => Ok(Command::Who),
            "cursor" => match numbers(args)?.as_slice() {
                [line, ch] => Ok(Command::Cursor((*line, *ch))),
                _ => Err(usage("cursor <line> <ch>")),
            },
            "highlight" => match numbers(args)?.as_slice() {
                [l1, c1, l2, c2] => Ok(Command::Highlight {
                    from: (*l1, *c1),
                    to: (*l2, *c2),
                }),
                _ => Err(usage("highlight <l1> <c1> <l2> <c2>")),
            },
            "run" => Ok(Command::Run(
                (!args.is_empty()).then(|| args.to_string()),
            )),
            "help" => Ok(Command::Help),
            "quit" | "q" => Ok(Command::Quit),
            other => Err(ClientError::InvalidCommand(format!(
                "unknown command ':{}' (try :help)",
                other
            ))),
        }
    }
}

fn numbers(args: &str) -> Result<Vec<u32>, ClientError> {
    args.split_whitespace()
        .map(|arg| {
            arg.parse::<u32>()
                .map_err(|_| ClientError::InvalidCommand(format!("'{}' is not a number", arg)))
        })
        .collect()
}

fn usage(form: &str) -> ClientError {
    ClientError::InvalidCommand(format!("usage: :{}", form))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_is_append() {
        // テスト項目: コロンで始まらない行はバッファへの追加になる
        // given (前提条件):
        let line = "let x = 1;";

        // when (操作):
        let command = Command::parse(line).unwrap();

        // then (期待する結果):
        assert_eq!(command, Command::Append("let x = 1;".to_string()));
    }

    #[test]
    fn test_set_keeps_inner_spaces() {
        // テスト項目: :set は残りのテキストをそのまま使う
        // given (前提条件):
        let line = ":set fn main() { }";

        // when (操作):
        let command = Command::parse(line).unwrap();

        // then (期待する結果):
        assert_eq!(command, Command::Set("fn main() { }".to_string()));
    }

    #[test]
    fn test_cursor_and_highlight() {
        // テスト項目: 位置を取るコマンドが数値を解釈する
        // given (前提条件):
        let cursor = ":cursor 3 14";
        let highlight = ":highlight 0 0 1 5";

        // when (操作):
        let cursor = Command::parse(cursor).unwrap();
        let highlight = Command::parse(highlight).unwrap();

        // then (期待する結果):
        assert_eq!(cursor, Command::Cursor((3, 14)));
        assert_eq!(
            highlight,
            Command::Highlight {
                from: (0, 0),
                to: (1, 5)
            }
        );
    }

    #[test]
    fn test_run_with_optional_compiler() {
        // テスト項目: :run はコンパイラ指定を省略できる
        // given (前提条件):
        let bare = ":run";
        let named = ":run cpython-3.12.7";

        // when (操作):
        let bare = Command::parse(bare).unwrap();
        let named = Command::parse(named).unwrap();

        // then (期待する結果):
        assert_eq!(bare, Command::Run(None));
        assert_eq!(named, Command::Run(Some("cpython-3.12.7".to_string())));
    }

    #[test]
    fn test_invalid_commands() {
        // テスト項目: 未知のコマンドや引数の誤りはエラーになる
        // given (前提条件):
        let inputs = [":frobnicate", ":cursor 1", ":cursor a b", ":highlight 1 2 3"];

        // when (操作):
        let results: Vec<_> = inputs.iter().map(|line| Command::parse(line)).collect();

        // then (期待する結果):
        for result in results {
            assert!(matches!(result, Err(ClientError::InvalidCommand(_))));
        }
    }
}
