//! Local copy of the shared document.
//!
//! The relay never stores the document, so every participant keeps the whole
//! text and replaces it wholesale when a change arrives.

/// Whole-text buffer with last-applied-wins replacement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    text: String,
}

impl Buffer {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Replace the text with a remote version
    ///
    /// Returns `false` when the text is already identical, so applying the
    /// same change twice is a no-op.
    pub fn apply_remote(&mut self, code: &str) -> bool {
        if self.text == code {
            return false;
        }
        self.text = code.to_string();
        true
    }

    /// Replace the text with a local edit
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Append one line at the end of the text
    pub fn append_line(&mut self, line: &str) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push_str(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_remote_twice_is_idempotent() {
        // テスト項目: 同じ CODE_CHANGE を 2 回適用しても結果は変わらない
        // given (前提条件):
        let mut buffer = Buffer::default();

        // when (操作):
        let first = buffer.apply_remote("x");
        let second = buffer.apply_remote("x");

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(buffer.as_str(), "x");
    }

    #[test]
    fn test_last_applied_wins() {
        // テスト項目: 複数の変更が届いた場合、最後に適用したものが残る
        // given (前提条件):
        let mut buffer = Buffer::default();
        buffer.set("mine");

        // when (操作):
        buffer.apply_remote("foo");
        buffer.apply_remote("bar");

        // then (期待する結果):
        assert_eq!(buffer.as_str(), "bar");
    }

    #[test]
    fn test_append_line() {
        // テスト項目: 行の追加は既存の末尾に改行を挟んで連結する
        // given (前提条件):
        let mut buffer = Buffer::default();

        // when (操作):
        buffer.append_line("let x = 1;");
        buffer.append_line("let y = 2;");

        // then (期待する結果):
        assert_eq!(buffer.as_str(), "let x = 1;\nlet y = 2;");
    }
}
