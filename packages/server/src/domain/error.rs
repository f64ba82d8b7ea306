//! ドメインエラー

use thiserror::Error;

/// 値オブジェクトの生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("'{0}' is not a valid connection id")]
    InvalidConnectionId(String),
}

/// メッセージ配送エラー
///
/// 宛先がすでにいない、または送信チャネルが閉じている場合に返される。
/// 呼び出し側はログに残して吸収する（送信者には通知しない）。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    #[error("channel of connection '{0}' is closed")]
    ChannelClosed(String),

    #[error("failed to encode message: {0}")]
    Encode(String),
}

/// コード実行プロキシのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// 実行サービスに到達できない、または応答を読めなかった
    #[error("execution service unavailable: {0}")]
    Unavailable(String),

    /// 実行サービスが JSON 以外を返した（本文をそのまま保持する）
    #[error("execution service returned a malformed response")]
    MalformedResponse(String),
}
