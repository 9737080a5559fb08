use super::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_normalize_endpoint() {
    assert_eq!(normalize_endpoint("http://localhost:9222/"), "http://localhost:9222");
    assert_eq!(normalize_endpoint("http://localhost:9222"), "http://localhost:9222");
}

#[tokio::test]
async fn test_fetch_version() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Browser": "Chrome/126.0.6478.126",
            "Protocol-Version": "1.3",
            "webSocketDebuggerUrl": "ws://127.0.0.1:9222/devtools/browser/abc"
        })))
        .mount(&server)
        .await;

    let endpoint = format!("{}/", server.uri());
    let version = fetch_version(&endpoint).await.unwrap();
    assert_eq!(version.browser, "Chrome/126.0.6478.126");
    assert_eq!(
        version.web_socket_debugger_url,
        "ws://127.0.0.1:9222/devtools/browser/abc"
    );
}

#[tokio::test]
async fn test_fetch_version_reports_unavailable_browser() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/version"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = fetch_version(&server.uri()).await.unwrap_err();
    assert!(matches!(err, CdpError::ChromeNotAvailable(_)));
}

#[tokio::test]
async fn test_list_pages_keeps_browser_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "A", "type": "page", "title": "Feed", "url": "https://feed.test/"},
            {"id": "B", "type": "service_worker", "title": "", "url": "https://feed.test/sw.js"},
            {"id": "C", "type": "page", "title": "Docs", "url": "https://docs.test/"}
        ])))
        .mount(&server)
        .await;

    let pages = list_pages(&server.uri()).await.unwrap();
    let ids: Vec<&str> = pages.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_list_pages_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/list"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = list_pages(&server.uri()).await.unwrap_err();
    assert!(matches!(err, CdpError::Http(_)));
}
