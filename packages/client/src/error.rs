//! Error types for the Tandem client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The relay URL cannot be used at all
    #[error("Invalid relay URL: {0}")]
    InvalidUrl(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The relay went away during the session
    #[error("Connection lost")]
    ConnectionLost,

    /// Input line that is not a known command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// The execution endpoint failed
    #[error("Execution failed: {0}")]
    ExecutionError(String),
}
