//! Shared WebSocket transport used by the client and every page session.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use super::error::CdpError;
use super::protocol::{CdpEvent, CdpRequest, CdpResponse};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
pub(crate) type WsSink = SplitSink<WsStream, Message>;
pub(crate) type WsSource = SplitStream<WsStream>;

type ReplySender = oneshot::Sender<Result<Value, CdpError>>;

/// Matches responses to pending calls and events to page sessions.
pub(crate) struct Router {
    next_id: AtomicU64,
    pending: Mutex<HashMap<u64, ReplySender>>,
    routes: RwLock<HashMap<String, mpsc::UnboundedSender<CdpEvent>>>,
}

impl Router {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            pending: Mutex::new(HashMap::new()),
            routes: RwLock::new(HashMap::new()),
        }
    }

    /// Allocate a request id and the channel its reply will arrive on.
    pub(crate) fn register(&self) -> (u64, oneshot::Receiver<Result<Value, CdpError>>) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);
        (id, rx)
    }

    pub(crate) fn forget(&self, id: u64) {
        self.pending.lock().remove(&id);
    }

    pub(crate) fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Start routing events for a session into a fresh channel.
    pub(crate) fn subscribe(&self, session_id: &str) -> mpsc::UnboundedReceiver<CdpEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.routes.write().insert(session_id.to_string(), tx);
        rx
    }

    pub(crate) fn unsubscribe(&self, session_id: &str) {
        self.routes.write().remove(session_id);
    }

    /// Deliver one decoded message.
    pub(crate) fn dispatch(&self, resp: CdpResponse) {
        if let Some(id) = resp.id {
            let Some(tx) = self.pending.lock().remove(&id) else {
                trace!("Dropping reply for unknown request {}", id);
                return;
            };
            let result = match resp.error {
                Some(error) => Err(CdpError::Protocol {
                    code: error.code,
                    message: error.message,
                }),
                None => Ok(resp.result.unwrap_or(Value::Null)),
            };
            let _ = tx.send(result);
            return;
        }

        let Some((session_id, event)) = resp.into_event() else {
            return;
        };
        let delivered = match self.routes.read().get(&session_id) {
            Some(tx) => tx.send(event).is_ok(),
            None => return,
        };
        if !delivered {
            debug!("Event receiver for session {} is gone", session_id);
            self.unsubscribe(&session_id);
        }
    }

    /// Fail every in-flight call and end every event stream.
    pub(crate) fn close(&self) {
        self.pending.lock().clear();
        self.routes.write().clear();
    }
}

/// Outbound half of the browser connection plus the shared [`Router`].
pub(crate) struct Transport {
    ws_tx: tokio::sync::Mutex<WsSink>,
    router: Router,
    call_timeout: Duration,
}

impl Transport {
    pub(crate) fn new(ws_tx: WsSink, call_timeout: Duration) -> Self {
        Self {
            ws_tx: tokio::sync::Mutex::new(ws_tx),
            router: Router::new(),
            call_timeout,
        }
    }

    pub(crate) fn router(&self) -> &Router {
        &self.router
    }

    /// Send a CDP command and wait for its reply.
    pub(crate) async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let (id, rx) = self.router.register();

        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(|s| s.to_string()),
        };

        let json = match serde_json::to_string(&request) {
            Ok(json) => json,
            Err(e) => {
                self.router.forget(id);
                return Err(e.into());
            }
        };
        trace!("CDP send: {}", json);

        {
            let mut ws = self.ws_tx.lock().await;
            if let Err(e) = ws.send(Message::Text(json.into())).await {
                self.router.forget(id);
                return Err(e.into());
            }
        }

        match tokio::time::timeout(self.call_timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.router.forget(id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }

    /// Read messages until the socket closes, then fail whatever is left.
    pub(crate) async fn receive_loop(&self, mut ws_source: WsSource) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    match serde_json::from_str::<CdpResponse>(&text) {
                        Ok(resp) => self.router.dispatch(resp),
                        Err(e) => warn!("Failed to parse CDP message: {}", e),
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed");
                    break;
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
        self.router.close();
    }
}
