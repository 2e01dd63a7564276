mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use common::{ScriptedProber, create_broken_state, create_harness, live};
use domain_watch::api::handlers::health_handler;
use domain_watch::state::AppState;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let harness = create_harness(&["a.example"], ScriptedProber::new());
    let server = server(harness.state());

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["monitored_domains"], 1);
    assert_eq!(json["checks"]["snapshot_store"]["status"], "ok");
    assert_eq!(json["checks"]["scheduler"]["status"], "ok");
    assert!(json["checks"]["scheduler"].get("last_cycle").is_none());
}

#[tokio::test]
async fn test_health_reports_last_cycle() {
    let prober =
        ScriptedProber::new().script("a.example", vec![live("a.example", "a.example", 200)]);
    let harness = create_harness(&["a.example"], prober);
    harness.monitor.run_cycle().await.unwrap();
    let server = server(harness.state());

    let json = server.get("/health").await.json::<serde_json::Value>();

    let last_cycle = &json["checks"]["scheduler"]["last_cycle"];
    assert_eq!(last_cycle["probed"], 1);
    assert_eq!(last_cycle["succeeded"], true);
    assert_eq!(json["checks"]["snapshot_store"]["message"], "1 snapshots stored");
}

#[tokio::test]
async fn test_health_degraded_when_store_unreadable() {
    let state = create_broken_state(&["a.example"]);
    let monitor = state.monitor.clone();
    let server = server(state);

    assert!(monitor.run_cycle().await.is_err());

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["snapshot_store"]["status"], "error");
    assert_eq!(json["checks"]["scheduler"]["status"], "warning");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let harness = create_harness(&["a.example"], ScriptedProber::new());
    let server = server(harness.state());

    let json = server.get("/health").await.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"].get("snapshot_store").is_some());
    assert!(json["checks"].get("scheduler").is_some());
}
