//! UseCase: コード実行プロキシ
//!
//! 参加者ごとの独立したリクエスト。結果をルームへ配ることはしない。

use std::sync::Arc;

use crate::domain::{CodeExecutor, ExecutionOutcome};

use super::error::ExecuteCodeError;

/// コード実行のユースケース
pub struct ExecuteCodeUseCase {
    /// CodeExecutor（外部の実行サービス）
    executor: Arc<dyn CodeExecutor>,
    /// コンパイラ指定がないときに使うもの
    default_compiler: String,
}

impl ExecuteCodeUseCase {
    pub fn new(executor: Arc<dyn CodeExecutor>, default_compiler: String) -> Self {
        Self {
            executor,
            default_compiler,
        }
    }

    /// コードを実行サービスへ転送する
    ///
    /// # Arguments
    ///
    /// * `code` - 実行するソース
    /// * `compiler` - 実行サービスのコンパイラ名（空・省略時は既定値）
    pub async fn execute(
        &self,
        code: String,
        compiler: Option<String>,
    ) -> Result<ExecutionOutcome, ExecuteCodeError> {
        let compiler = compiler
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.default_compiler.clone());

        tracing::debug!("Executing {} bytes with '{}'", code.len(), compiler);
        let outcome = self.executor.execute(&code, &compiler).await?;
        tracing::debug!("Execution finished (success: {})", outcome.success);

        Ok(outcome)
    }
}
