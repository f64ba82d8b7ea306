//! Reconnect policy.
//!
//! Counts consecutive failed sessions. A session that reached the relay and then
//! lost the connection starts a new streak, so a flapping link keeps retrying while
//! a relay that never answers gives up after `max_attempts`.

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectPolicy {
    max_attempts: u32,
    consecutive_failures: u32,
}

impl ReconnectPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            consecutive_failures: 0,
        }
    }

    /// Failed sessions in the current streak (the next attempt is this + 1)
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Record a failed session and decide whether to try again
    pub fn record_failure(&mut self, error: &ClientError) -> bool {
        match error {
            // 何度やり直しても同じ URL では繋がらない
            ClientError::InvalidUrl(_) => return false,
            ClientError::ConnectionLost => self.consecutive_failures = 1,
            _ => self.consecutive_failures += 1,
        }
        self.consecutive_failures < self.max_attempts
    }
}
