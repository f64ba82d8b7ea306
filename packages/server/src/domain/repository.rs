//! Repository trait 定義
//!
//! ドメイン層が必要とする接続ディレクトリへのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, DisplayName};

/// 接続ディレクトリ
///
/// 接続 ID から表示名を引くための、プロセス全体で 1 つのマップ。
/// エラー条件はなく、容量の上限もない。切断時に必ず `remove` を呼ぶこと。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionDirectory: Send + Sync {
    /// 表示名を登録する（既存の登録は上書き）
    async fn record(&self, connection_id: ConnectionId, display_name: DisplayName);

    /// 表示名を引く
    async fn lookup(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// 登録を削除する（存在しなくても何もしない）
    async fn remove(&self, connection_id: &ConnectionId);

    /// 登録されている接続の数
    async fn count_entries(&self) -> usize;
}
