//! Remote target traits.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::TargetError;
use crate::message::{TabNotification, TabRequest, TabResponse};

/// A browser tab that can receive commands.
///
/// Commands only reach the tab once its page handler is loaded. A send to a
/// tab without a handler fails with [`TargetError::NoListener`]; callers
/// recover by calling [`RemoteTarget::inject_handler`] and sending again.
#[async_trait]
pub trait RemoteTarget: Send + Sync {
    /// Stable identifier of the tab.
    fn id(&self) -> &str;

    /// Check whether the page handler is present in the tab.
    async fn is_handler_loaded(&self) -> Result<bool, TargetError>;

    /// Load the page handler into the tab.
    async fn inject_handler(&self) -> Result<(), TargetError>;

    /// Send a command and wait for the handler's reply.
    async fn send(&self, request: TabRequest) -> Result<TabResponse, TargetError>;

    /// Inject the page handler unless it is already present.
    async fn ensure_handler(&self) -> Result<(), TargetError> {
        if !self.is_handler_loaded().await? {
            self.inject_handler().await?;
        }
        Ok(())
    }

    /// Take the stream of notifications raised by the page.
    ///
    /// Returns `None` when the target raises no notifications or the stream
    /// was already taken.
    fn take_notifications(&self) -> Option<mpsc::UnboundedReceiver<TabNotification>> {
        None
    }
}

/// Finds the tab an operation should run against.
#[async_trait]
pub trait TargetResolver: Send + Sync {
    /// Resolve the active tab.
    ///
    /// Fails with [`TargetError::NoActiveTarget`] when there is none.
    async fn resolve(&self) -> Result<Arc<dyn RemoteTarget>, TargetError>;
}
