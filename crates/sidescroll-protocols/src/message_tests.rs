use super::*;
use serde_json::json;

#[test]
fn test_request_wire_shape() {
    let value = serde_json::to_value(TabRequest::ScrollToBottom).unwrap();
    assert_eq!(value, json!({"action": "scrollToBottom"}));

    let value = serde_json::to_value(TabRequest::CreateOverlay).unwrap();
    assert_eq!(value, json!({"action": "createOverlay"}));

    let value = serde_json::to_value(TabRequest::RemoveOverlay).unwrap();
    assert_eq!(value, json!({"action": "removeOverlay"}));
}

#[test]
fn test_request_action_matches_serialized_tag() {
    for request in [
        TabRequest::ScrollToBottom,
        TabRequest::CreateOverlay,
        TabRequest::RemoveOverlay,
    ] {
        let value = serde_json::to_value(request).unwrap();
        assert_eq!(value["action"], request.action());
        assert_eq!(request.to_string(), request.action());
    }
}

#[test]
fn test_overlay_response_deserialize() {
    let resp: TabResponse =
        serde_json::from_value(json!({"status": "success", "overlayCreated": true})).unwrap();
    assert!(resp.overlay_shown());

    let resp: TabResponse =
        serde_json::from_value(json!({"status": "error", "overlayCreated": false})).unwrap();
    assert!(!resp.overlay_shown());
    assert_eq!(resp.status, ResponseStatus::Error);
}

#[test]
fn test_success_without_overlay_flag_counts_as_shown() {
    let resp: TabResponse = serde_json::from_value(json!({"status": "success"})).unwrap();
    assert!(resp.overlay_shown());
}

#[test]
fn test_success_with_overlay_flag_false_is_not_shown() {
    let resp: TabResponse =
        serde_json::from_value(json!({"status": "success", "overlayCreated": false})).unwrap();
    assert!(!resp.overlay_shown());
}

#[test]
fn test_unknown_action_status() {
    let resp: TabResponse = serde_json::from_value(json!({"status": "unknown_action"})).unwrap();
    assert_eq!(resp.status, ResponseStatus::UnknownAction);
    assert!(!resp.is_success());
}

#[test]
fn test_unrecognised_status_maps_to_other() {
    let resp: TabResponse = serde_json::from_value(json!({"status": "pending"})).unwrap();
    assert_eq!(resp.status, ResponseStatus::Other);
}

#[test]
fn test_error_response_carries_message() {
    let resp: TabResponse =
        serde_json::from_value(json!({"status": "error", "message": "body is null"})).unwrap();
    assert_eq!(resp.message.as_deref(), Some("body is null"));
}

#[test]
fn test_response_serialize_skips_empty_fields() {
    let value = serde_json::to_value(TabResponse::success()).unwrap();
    assert_eq!(value, json!({"status": "success"}));

    let value = serde_json::to_value(TabResponse::overlay(true)).unwrap();
    assert_eq!(value, json!({"status": "success", "overlayCreated": true}));
}

#[test]
fn test_notification_deserialize() {
    let n: TabNotification = serde_json::from_value(json!({"action": "pageRefresh"})).unwrap();
    assert_eq!(n, TabNotification::PageRefresh);

    let n: TabNotification =
        serde_json::from_value(json!({"action": "pageLoaded", "url": "https://shop.test/orders"}))
            .unwrap();
    assert_eq!(
        n,
        TabNotification::PageLoaded {
            url: "https://shop.test/orders".to_string()
        }
    );

    let n: TabNotification = serde_json::from_value(json!({"action": "pageUnloaded"})).unwrap();
    assert_eq!(n, TabNotification::PageUnloaded { url: String::new() });
}

#[test]
fn test_notification_interruption() {
    assert!(TabNotification::PageRefresh.is_interruption());
    assert!(TabNotification::PageUnloaded { url: String::new() }.is_interruption());
    assert!(!TabNotification::PageLoaded { url: String::new() }.is_interruption());
}

#[test]
fn test_unknown_notification_rejected() {
    let result = serde_json::from_value::<TabNotification>(json!({"action": "logError"}));
    assert!(result.is_err());
}
