//! Remote target errors.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum TargetError {
    #[error("No active target: {0}")]
    NoActiveTarget(String),

    #[error("No listener on target: {0}")]
    NoListener(String),

    #[error("Handler injection failed: {0}")]
    Injection(String),

    #[error("Target rejected {action}: {status}")]
    Rejected { action: String, status: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl TargetError {
    /// Whether the message never reached a handler on the target.
    pub fn is_delivery_failure(&self) -> bool {
        matches!(self, TargetError::NoListener(_) | TargetError::Transport(_))
    }
}

impl From<serde_json::Error> for TargetError {
    fn from(e: serde_json::Error) -> Self {
        TargetError::InvalidResponse(e.to_string())
    }
}
