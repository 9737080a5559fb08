//! Scroll session errors.

use sidescroll_protocols::TargetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrollError {
    #[error("No active tab: {0}")]
    NoActiveTarget(String),

    #[error("Unable to connect to the page: {0}")]
    Overlay(String),

    #[error("Scroll operation failed after {completed} scrolls: {reason}")]
    ScrollFailed { completed: u32, reason: String },

    #[error(transparent)]
    Target(TargetError),
}

impl From<TargetError> for ScrollError {
    fn from(e: TargetError) -> Self {
        match e {
            TargetError::NoActiveTarget(msg) => ScrollError::NoActiveTarget(msg),
            other => ScrollError::Target(other),
        }
    }
}
