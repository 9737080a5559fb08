//! CDP WebSocket client.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use serde_json::{json, Value};
use tracing::debug;

use super::discovery::{self, normalize_endpoint};
use super::error::CdpError;
use super::protocol::PageInfo;
use super::session::PageSession;
use super::transport::Transport;

/// CDP client connected to the browser endpoint.
///
/// Page sessions share the client's socket; dropping the client stops the
/// receive task and fails their outstanding calls.
pub struct CdpClient {
    /// HTTP endpoint for page discovery.
    http_endpoint: String,
    /// Browser WebSocket URL.
    browser_ws_url: String,
    transport: Arc<Transport>,
    /// Background task handle.
    recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to Chrome at the given endpoint.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Chrome debugging endpoint (e.g., "http://localhost:9222")
    /// * `call_timeout` - How long a single CDP call may wait for its reply
    pub async fn connect(endpoint: &str, call_timeout: Duration) -> Result<Self, CdpError> {
        url::Url::parse(endpoint)?;
        let http_endpoint = normalize_endpoint(endpoint);

        let version = discovery::fetch_version(&http_endpoint).await?;
        let browser_ws_url = version.web_socket_debugger_url;

        let (ws_stream, _) = tokio_tungstenite::connect_async(browser_ws_url.as_str())
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let transport = Arc::new(Transport::new(ws_sink, call_timeout));

        let recv_task = {
            let transport = transport.clone();
            tokio::spawn(async move {
                transport.receive_loop(ws_source).await;
            })
        };

        debug!("CDP client connected to {}", browser_ws_url);

        Ok(Self {
            http_endpoint,
            browser_ws_url,
            transport,
            recv_task,
        })
    }

    /// Send a browser-level CDP command.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport.call(method, params, None).await
    }

    /// HTTP endpoint this client discovers pages on.
    pub fn endpoint(&self) -> &str {
        &self.http_endpoint
    }

    /// Get browser WebSocket URL.
    pub fn browser_ws_url(&self) -> &str {
        &self.browser_ws_url
    }

    /// List all targets.
    pub async fn list_pages(&self) -> Result<Vec<PageInfo>, CdpError> {
        discovery::list_pages(&self.http_endpoint).await
    }

    /// Attach to an existing page.
    pub async fn attach_page(&self, target_id: &str) -> Result<PageSession, CdpError> {
        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": target_id,
                    "flatten": true
                })),
            )
            .await?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        let events = self.transport.router().subscribe(&session_id);
        let session = PageSession::new(
            target_id.to_string(),
            session_id,
            self.transport.clone(),
            events,
        );

        session.enable_domains().await?;
        debug!("Attached to page {}", target_id);

        Ok(session)
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.recv_task.abort();
        self.transport.router().close();
    }
}
