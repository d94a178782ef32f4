use axum::http::StatusCode;
use axum_test::TestServer;
use gocity_api::setup::{build_state, routes::setup_routes};
use gocity_core::{Config, StorageBackend};
use serde_json::{json, Value};

async fn setup_server() -> TestServer {
    let config = Config::default().with_storage_backend(StorageBackend::Memory);
    let state = build_state(config).await.unwrap();
    let router = setup_routes(state).unwrap();
    TestServer::new(router).unwrap()
}

#[tokio::test]
async fn test_health_reports_backend() {
    let server = setup_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn test_unknown_project_returns_not_found() {
    let server = setup_server().await;

    server
        .get("/api/projects/never-saved")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_save_get_delete_project() {
    let server = setup_server().await;

    server
        .put("/api/projects/alpha")
        .json(&json!({ "v": 1 }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = server.get("/api/projects/alpha").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({ "v": 1 }));

    server
        .delete("/api/projects/alpha")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get("/api/projects/alpha")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_project_name_with_slashes() {
    let server = setup_server().await;

    server
        .put("/api/projects/github.com/rodrigo-brito/gocity")
        .json(&json!({ "children": [] }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let body: Value = server
        .get("/api/projects/github.com/rodrigo-brito/gocity")
        .await
        .json();
    assert_eq!(body, json!({ "children": [] }));
}

#[tokio::test]
async fn test_invalid_json_body_is_rejected() {
    let server = setup_server().await;

    let response = server
        .put("/api/projects/alpha")
        .text("not json")
        .await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");

    server
        .get("/api/projects/alpha")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_unknown_project_succeeds() {
    let server = setup_server().await;

    server
        .delete("/api/projects/never-saved")
        .await
        .assert_status(StatusCode::NO_CONTENT);
}
