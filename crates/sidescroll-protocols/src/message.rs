//! Message contract between the orchestrator and the page handler.
//!
//! Every message is a JSON object discriminated by its `action` field, the
//! same shape the page handler reads and writes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A command sent to the page handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum TabRequest {
    /// Scroll the document to its maximum scroll position.
    ScrollToBottom,
    /// Show the blocking overlay.
    CreateOverlay,
    /// Hide the blocking overlay.
    RemoveOverlay,
}

impl TabRequest {
    /// Wire name of the action.
    pub fn action(&self) -> &'static str {
        match self {
            TabRequest::ScrollToBottom => "scrollToBottom",
            TabRequest::CreateOverlay => "createOverlay",
            TabRequest::RemoveOverlay => "removeOverlay",
        }
    }
}

impl fmt::Display for TabRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

/// Status field of a handler reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Success,
    /// The page asked for the running operation to be cancelled.
    Stopped,
    Error,
    UnknownAction,
    #[serde(other)]
    Other,
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResponseStatus::Success => "success",
            ResponseStatus::Stopped => "stopped",
            ResponseStatus::Error => "error",
            ResponseStatus::UnknownAction => "unknown_action",
            ResponseStatus::Other => "other",
        };
        f.write_str(s)
    }
}

/// Reply from the page handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabResponse {
    pub status: ResponseStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_created: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TabResponse {
    pub fn success() -> Self {
        Self::with_status(ResponseStatus::Success)
    }

    pub fn stopped() -> Self {
        Self::with_status(ResponseStatus::Stopped)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            overlay_created: None,
            message: Some(message.into()),
        }
    }

    /// Reply to `createOverlay`.
    pub fn overlay(created: bool) -> Self {
        Self {
            status: if created {
                ResponseStatus::Success
            } else {
                ResponseStatus::Error
            },
            overlay_created: Some(created),
            message: None,
        }
    }

    pub fn with_status(status: ResponseStatus) -> Self {
        Self {
            status,
            overlay_created: None,
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    /// Whether a `createOverlay` reply means the overlay is on screen.
    ///
    /// A successful reply without the `overlayCreated` flag counts as shown.
    pub fn overlay_shown(&self) -> bool {
        self.is_success() && self.overlay_created.unwrap_or(true)
    }
}

/// Unsolicited message raised by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum TabNotification {
    /// The page is about to reload or navigate away.
    PageRefresh,
    PageLoaded {
        #[serde(default)]
        url: String,
    },
    PageUnloaded {
        #[serde(default)]
        url: String,
    },
}

impl TabNotification {
    /// Whether this notification must stop a running session.
    pub fn is_interruption(&self) -> bool {
        matches!(
            self,
            TabNotification::PageRefresh | TabNotification::PageUnloaded { .. }
        )
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
