//! 値オブジェクト

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// 接続 ID
///
/// トランスポートのセッション 1 本に対してサーバーが払い出す識別子。
/// セッションが終了すると二度と使われない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい接続 ID を払い出す
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<&str> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| ValueObjectError::InvalidConnectionId(value.to_string()))
    }
}

/// ルーム ID
///
/// クライアントが指定する不透明な文字列。空文字列のみ拒否する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyRoomId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 表示名
///
/// 一意性も内容も検証しない。空文字列も、他の接続と同じ名前も許容する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// ディレクトリに登録がない接続に使う空の表示名
    pub fn blank() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DisplayName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DisplayName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// リレーが中身を解釈せずに転送するペイロード（カーソル位置、ハイライト範囲）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpaquePayload(serde_json::Value);

impl OpaquePayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_connection_ids_are_unique() {
        // テスト項目: 払い出した接続 ID が重複しない
        // given (前提条件):

        // when (操作):
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(a, b);
    }

    #[test]
    fn test_connection_id_parses_its_own_display_form() {
        // テスト項目: 文字列表現から同じ接続 ID に戻せる
        // given (前提条件):
        let id = ConnectionId::generate();

        // when (操作):
        let parsed = ConnectionId::try_from(id.to_string().as_str());

        // then (期待する結果):
        assert_eq!(parsed, Ok(id));
    }

    #[test]
    fn test_connection_id_rejects_garbage() {
        // テスト項目: UUID でない文字列は接続 ID として拒否される
        // given (前提条件):
        let raw = "not-a-connection";

        // when (操作):
        let result = ConnectionId::try_from(raw);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::InvalidConnectionId(raw.to_string()))
        );
    }

    #[test]
    fn test_room_id_rejects_empty_string() {
        // テスト項目: 空文字列のルーム ID は拒否される
        // given (前提条件):

        // when (操作):
        let result = RoomId::new(String::new());

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyRoomId));
    }

    #[test]
    fn test_room_id_keeps_value_verbatim() {
        // テスト項目: ルーム ID は空白を含めてそのまま保持される
        // given (前提条件):
        let raw = " r1 ".to_string();

        // when (操作):
        let room_id = RoomId::new(raw.clone()).unwrap();

        // then (期待する結果):
        assert_eq!(room_id.as_str(), raw);
    }

    #[test]
    fn test_room_id_deserialization_rejects_empty_string() {
        // テスト項目: JSON から読み込む場合も空文字列のルーム ID は拒否される
        // given (前提条件):
        let empty = "\"\"";
        let filled = "\"r1\"";

        // when (操作):
        let rejected = serde_json::from_str::<RoomId>(empty);
        let accepted = serde_json::from_str::<RoomId>(filled);

        // then (期待する結果):
        assert!(rejected.is_err());
        assert_eq!(accepted.unwrap(), RoomId::new("r1".to_string()).unwrap());
    }

    #[test]
    fn test_display_name_allows_empty_string() {
        // テスト項目: 表示名は空文字列でも作成できる
        // given (前提条件):

        // when (操作):
        let name = DisplayName::new(String::new());

        // then (期待する結果):
        assert_eq!(name, DisplayName::blank());
    }
}
