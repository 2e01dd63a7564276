use domain_watch::domain::diff::classify;
use domain_watch::domain::entities::{ChangeEvent, Snapshot};
use domain_watch::infrastructure::notify::{NotificationSink, NotifyError, WebhookSink};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn outage() -> ChangeEvent {
    let before = Snapshot::reachable("a.example", "a.example", 200, None);
    let after = Snapshot::unreachable("a.example", "connection failed: refused");
    classify(Some(&before), after)
}

#[tokio::test]
async fn test_posts_text_and_event() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "text": "a.example: live -> down (error)",
            "event": { "domain": "a.example", "kind": "changed" }
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let sink = WebhookSink::new(format!("{}/hook", server.uri())).unwrap();
    sink.notify(&outage()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["event"]["previous"]["isLive"], json!(true));
    assert_eq!(body["event"]["current"]["isLive"], json!(false));
    assert_eq!(
        body["event"]["current"]["errorMessage"],
        json!("connection failed: refused")
    );
}

#[tokio::test]
async fn test_server_error_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let sink = WebhookSink::new(server.uri()).unwrap();
    let result = sink.notify(&outage()).await;

    assert!(matches!(result, Err(NotifyError::Rejected(503))));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    // Nothing listens on port 1.
    let sink = WebhookSink::new("http://127.0.0.1:1/hook").unwrap();
    let result = sink.notify(&outage()).await;

    assert!(matches!(result, Err(NotifyError::Transport(_))));
}

#[test]
fn test_name() {
    let sink = WebhookSink::new("http://127.0.0.1:9/").unwrap();
    assert_eq!(sink.name(), "webhook");
}
