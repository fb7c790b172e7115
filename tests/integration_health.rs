#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, unreachable_pub)]
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_livez() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.get(format!("{}/livez", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readyz_happy_path() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.get(format!("{}/readyz", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_readyz_database_error() {
    let app = common::TestApp::spawn().await;

    // Close the pool to simulate a database outage
    app.pool.close().await;

    let resp = app.client.get(format!("{}/readyz", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["database"], "error");
}

#[tokio::test]
async fn test_health_routes_not_on_public_port() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.get(format!("{}/api/livez", app.server_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
