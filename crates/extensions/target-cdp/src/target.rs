//! `RemoteTarget` over an attached CDP page session.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use sidescroll_protocols::{RemoteTarget, TabNotification, TabRequest, TabResponse, TargetError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cdp::{CdpClient, CdpError, PageInfo, PageSession};
use crate::events::forward_notifications;
use crate::handler;

/// A Chrome tab driven through its injected page handler.
pub struct CdpTarget {
    page: PageInfo,
    session: PageSession,
    notifications: Mutex<Option<mpsc::UnboundedReceiver<TabNotification>>>,
    forwarder: JoinHandle<()>,
    // Keeps the socket the session runs over open.
    _client: Arc<CdpClient>,
}

impl CdpTarget {
    /// Attach to `page` and start listening for its notifications.
    ///
    /// The handler itself is not injected here; callers ensure it before
    /// the first command.
    pub async fn attach(client: Arc<CdpClient>, page: PageInfo) -> Result<Self, CdpError> {
        let session = client.attach_page(&page.id).await?;
        session.add_binding(handler::BINDING_NAME).await?;

        let events = session
            .take_events()
            .ok_or_else(|| CdpError::InvalidResponse("event stream already taken".to_string()))?;
        let (tx, rx) = mpsc::unbounded_channel();
        let forwarder = tokio::spawn(forward_notifications(events, tx));

        Ok(Self {
            page,
            session,
            notifications: Mutex::new(Some(rx)),
            forwarder,
            _client: client,
        })
    }

    /// Page this target is attached to.
    pub fn page(&self) -> &PageInfo {
        &self.page
    }
}

#[async_trait]
impl RemoteTarget for CdpTarget {
    fn id(&self) -> &str {
        &self.page.id
    }

    async fn is_handler_loaded(&self) -> Result<bool, TargetError> {
        let value = self.session.evaluate(&handler::presence_expression()).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn inject_handler(&self) -> Result<(), TargetError> {
        debug!("Injecting page handler into {}", self.page.url);
        match self.session.evaluate(handler::HANDLER_SCRIPT).await {
            Ok(Value::Bool(true)) => Ok(()),
            Ok(other) => Err(TargetError::Injection(format!(
                "handler script returned {}",
                other
            ))),
            Err(e) => Err(TargetError::Injection(e.to_string())),
        }
    }

    async fn send(&self, request: TabRequest) -> Result<TabResponse, TargetError> {
        let expression = handler::dispatch_expression(request)?;
        let value = self.session.evaluate(&expression).await?;
        handler::parse_reply(request, value)
    }

    fn take_notifications(&self) -> Option<mpsc::UnboundedReceiver<TabNotification>> {
        self.notifications.lock().take()
    }
}

impl Drop for CdpTarget {
    fn drop(&mut self) {
        self.forwarder.abort();
    }
}
