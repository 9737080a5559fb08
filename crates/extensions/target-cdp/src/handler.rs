//! Page handler bundle and the expressions used to talk to it.
//!
//! The handler installs `window.__sidescroll` with a single async `handle`
//! entry point taking a request object and resolving to a reply object.

use serde_json::Value;
use sidescroll_protocols::{TabRequest, TabResponse, TargetError};

/// Handler source, evaluated in the page to install it.
pub const HANDLER_SCRIPT: &str = include_str!("handler.js");

/// Global the handler installs itself under.
pub const HANDLER_GLOBAL: &str = "__sidescroll";

/// Binding the handler reports notifications through.
pub const BINDING_NAME: &str = "__sidescrollNotify";

/// Element id of the overlay the handler creates.
pub const OVERLAY_ID: &str = "kq-scroll-overlay";

/// Marker returned by [`dispatch_expression`] when no handler is installed.
const NO_LISTENER_KEY: &str = "__noListener";

/// Expression that evaluates to `true` when the handler is installed.
pub fn presence_expression() -> String {
    format!("typeof window.{HANDLER_GLOBAL} === 'object' && window.{HANDLER_GLOBAL} !== null")
}

/// Expression that delivers `request` to the handler.
pub fn dispatch_expression(request: TabRequest) -> Result<String, serde_json::Error> {
    let payload = serde_json::to_string(&request)?;
    Ok(format!(
        "(window.{HANDLER_GLOBAL} ? window.{HANDLER_GLOBAL}.handle({payload}) : ({{ {NO_LISTENER_KEY}: true }}))"
    ))
}

/// Decode the value a dispatch evaluated to.
pub fn parse_reply(request: TabRequest, value: Value) -> Result<TabResponse, TargetError> {
    if value.get(NO_LISTENER_KEY).and_then(Value::as_bool) == Some(true) {
        return Err(TargetError::NoListener(format!(
            "no handler received {}",
            request
        )));
    }
    if value.is_null() {
        return Err(TargetError::InvalidResponse(format!(
            "empty reply to {}",
            request
        )));
    }
    Ok(serde_json::from_value(value)?)
}
