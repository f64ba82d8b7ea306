//! UseCase 層のエラー

use thiserror::Error;

use crate::domain::{DeliveryError, ExecutionError};

/// 収束プッシュ（sync-code）のエラー
///
/// 送信者には通知せず、ハブがログに残すだけ。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncCodeError {
    #[error("sync target is unreachable: {0}")]
    TargetUnreachable(#[from] DeliveryError),
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    /// メンバーのいないルーム（＝存在しないルーム）
    #[error("room not found")]
    RoomNotFound,
}

/// コード実行のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecuteCodeError {
    #[error("execution service unavailable: {0}")]
    ServiceUnavailable(String),

    /// 実行サービスの応答が JSON でなかった（本文を保持）
    #[error("execution service returned a malformed response")]
    MalformedResponse(String),
}

impl From<ExecutionError> for ExecuteCodeError {
    fn from(error: ExecutionError) -> Self {
        match error {
            ExecutionError::Unavailable(reason) => Self::ServiceUnavailable(reason),
            ExecutionError::MalformedResponse(body) => Self::MalformedResponse(body),
        }
    }
}
