//! InMemory Connection Directory 実装
//!
//! ドメイン層が定義する ConnectionDirectory trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! 書き込みはリレーハブのタスクからのみ行われます。Mutex は HTTP API など
//! 別タスクからの読み取りのためにあります。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionDirectory, ConnectionId, DisplayName};

/// インメモリ接続ディレクトリ
#[derive(Default)]
pub struct InMemoryConnectionDirectory {
    /// Key: 接続 ID, Value: 表示名
    entries: Mutex<HashMap<ConnectionId, DisplayName>>,
}

impl InMemoryConnectionDirectory {
    /// 新しい InMemoryConnectionDirectory を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionDirectory for InMemoryConnectionDirectory {
    async fn record(&self, connection_id: ConnectionId, display_name: DisplayName) {
        let mut entries = self.entries.lock().await;
        if let Some(previous) = entries.insert(connection_id, display_name) {
            tracing::debug!(
                "Directory entry for '{}' overwritten (was '{}')",
                connection_id,
                previous.as_str()
            );
        }
    }

    async fn lookup(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let entries = self.entries.lock().await;
        entries.get(connection_id).cloned()
    }

    async fn remove(&self, connection_id: &ConnectionId) {
        let mut entries = self.entries.lock().await;
        entries.remove(connection_id);
    }

    async fn count_entries(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - record / lookup / remove の基本操作
    // - 上書き、空の表示名、重複した表示名の扱い
    // - remove の冪等性
    //
    // 【なぜこのテストが必要か】
    // - ディレクトリは「この接続は誰か」の唯一の情報源
    // - 切断時に必ず削除されないと、マップが際限なく成長する
    // ========================================

    #[tokio::test]
    async fn test_record_and_lookup() {
        // テスト項目: 登録した表示名を引ける
        // given (前提条件):
        let directory = InMemoryConnectionDirectory::new();
        let alice = ConnectionId::generate();

        // when (操作):
        directory.record(alice, "alice".into()).await;

        // then (期待する結果):
        assert_eq!(directory.lookup(&alice).await, Some("alice".into()));
        assert_eq!(directory.count_entries().await, 1);
    }

    #[tokio::test]
    async fn test_record_overwrites_existing_entry() {
        // テスト項目: 同じ接続で再登録すると表示名が上書きされる
        // given (前提条件):
        let directory = InMemoryConnectionDirectory::new();
        let alice = ConnectionId::generate();
        directory.record(alice, "alice".into()).await;

        // when (操作):
        directory.record(alice, "alicia".into()).await;

        // then (期待する結果):
        assert_eq!(directory.lookup(&alice).await, Some("alicia".into()));
        assert_eq!(directory.count_entries().await, 1);
    }

    #[tokio::test]
    async fn test_empty_and_duplicate_names_are_accepted() {
        // テスト項目: 空の表示名も、他の接続と同じ表示名も登録できる
        // given (前提条件):
        let directory = InMemoryConnectionDirectory::new();
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();
        let third = ConnectionId::generate();

        // when (操作):
        directory.record(first, "sam".into()).await;
        directory.record(second, "sam".into()).await;
        directory.record(third, DisplayName::blank()).await;

        // then (期待する結果):
        assert_eq!(directory.lookup(&first).await, Some("sam".into()));
        assert_eq!(directory.lookup(&second).await, Some("sam".into()));
        assert_eq!(directory.lookup(&third).await, Some(DisplayName::blank()));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        // テスト項目: 存在しない接続を削除しても問題なく処理される（冪等性）
        // given (前提条件):
        let directory = InMemoryConnectionDirectory::new();
        let alice = ConnectionId::generate();
        directory.record(alice, "alice".into()).await;

        // when (操作):
        directory.remove(&alice).await;
        directory.remove(&alice).await;
        directory.remove(&ConnectionId::generate()).await;

        // then (期待する結果):
        assert_eq!(directory.lookup(&alice).await, None);
        assert_eq!(directory.count_entries().await, 0);
    }
}
