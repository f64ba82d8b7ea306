//! コード実行プロキシのインターフェース
//!
//! 各参加者が個別に呼び出す外部サービス。結果はルームへブロードキャストしない。

use async_trait::async_trait;

use super::ExecutionError;

/// 実行結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    /// コンパイルエラーやサービス側のメッセージ
    pub diagnostic: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeExecutor: Send + Sync {
    async fn execute(
        &self,
        code: &str,
        compiler: &str,
    ) -> Result<ExecutionOutcome, ExecutionError>;
}
