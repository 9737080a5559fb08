use super::*;

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 1,
        method: "Runtime.evaluate".to_string(),
        params: Some(serde_json::json!({"expression": "document.title"})),
        session_id: Some("S1".to_string()),
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("Runtime.evaluate"));
    assert!(json.contains("\"sessionId\":\"S1\""));
}

#[test]
fn test_cdp_request_skips_empty_fields() {
    let req = CdpRequest {
        id: 7,
        method: "Target.getTargets".to_string(),
        params: None,
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(!json.contains("params"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_cdp_response_deserialize() {
    let json = r#"{"id": 1, "result": {"sessionId": "abc"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, Some(1));
    assert!(resp.result.is_some());
    assert!(resp.into_event().is_none());
}

#[test]
fn test_event_split() {
    let json = r#"{
        "method": "Runtime.bindingCalled",
        "params": {"name": "__sidescrollNotify", "payload": "{}"},
        "sessionId": "S1"
    }"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    let (session_id, event) = resp.into_event().unwrap();
    assert_eq!(session_id, "S1");
    assert_eq!(event.method, "Runtime.bindingCalled");
    assert_eq!(event.params["name"], "__sidescrollNotify");
}

#[test]
fn test_page_info_deserialize() {
    let json = r#"{
        "id": "page123",
        "type": "page",
        "title": "Orders",
        "url": "https://shop.test/orders",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/page/page123"
    }"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert_eq!(info.id, "page123");
    assert!(info.is_scriptable_page());
}

#[test]
fn test_non_page_targets_not_scriptable() {
    let worker: PageInfo = serde_json::from_str(
        r#"{"id": "w1", "type": "service_worker", "title": "", "url": "https://shop.test/sw.js"}"#,
    )
    .unwrap();
    assert!(!worker.is_scriptable_page());

    let devtools: PageInfo = serde_json::from_str(
        r#"{"id": "d1", "type": "page", "title": "DevTools", "url": "devtools://devtools/bundled/inspector.html"}"#,
    )
    .unwrap();
    assert!(!devtools.is_scriptable_page());
}

#[test]
fn test_browser_version_deserialize() {
    let json = r#"{
        "Browser": "Chrome/126.0.6478.126",
        "Protocol-Version": "1.3",
        "User-Agent": "Mozilla/5.0",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/browser/xyz"
    }"#;
    let version: BrowserVersion = serde_json::from_str(json).unwrap();
    assert_eq!(version.protocol_version, "1.3");
    assert!(version.web_socket_debugger_url.starts_with("ws://"));
}
