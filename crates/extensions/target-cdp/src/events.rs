//! Translate CDP page events into tab notifications.

use sidescroll_protocols::TabNotification;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::cdp::CdpEvent;
use crate::handler::BINDING_NAME;

/// Map one page event to the notification it stands for, if any.
pub(crate) fn to_notification(event: &CdpEvent) -> Option<TabNotification> {
    match event.method.as_str() {
        "Runtime.bindingCalled" => {
            if event.params["name"].as_str() != Some(BINDING_NAME) {
                return None;
            }
            let payload = event.params["payload"].as_str()?;
            match serde_json::from_str(payload) {
                Ok(notification) => Some(notification),
                Err(e) => {
                    debug!("Ignoring malformed page notification: {}", e);
                    None
                }
            }
        }
        // Subframe navigations carry a parentId and leave the page in place.
        "Page.frameNavigated" if event.params["frame"]["parentId"].is_null() => {
            Some(TabNotification::PageRefresh)
        }
        _ => None,
    }
}

/// Forward notifications until either side goes away.
pub(crate) async fn forward_notifications(
    mut events: mpsc::UnboundedReceiver<CdpEvent>,
    notifications: mpsc::UnboundedSender<TabNotification>,
) {
    while let Some(event) = events.recv().await {
        let Some(notification) = to_notification(&event) else {
            continue;
        };
        trace!("Page notification: {:?}", notification);
        if notifications.send(notification).is_err() {
            break;
        }
    }
}
