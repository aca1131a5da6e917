use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use schedule_cell::router::schedule_routes;
use shared_config::AppConfig;
use shared_storage::AppState;

fn create_test_app(dir: &tempfile::TempDir) -> Router {
    let config = AppConfig {
        storage_dir: dir.path().to_string_lossy().into_owned(),
        default_provider_id: String::new(),
        reservation_webhook_url: String::new(),
    };
    schedule_routes(Arc::new(AppState::new(config)))
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn put_then_get_provider_slots() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir);

    let request = Request::builder()
        .method("PUT")
        .uri("/providers/tetsuya/slots")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "name": "Tetsuya",
                "schedule_text": "2025-05-23:10:00,13:00\n\njunk line\n2025-05-24:09:30"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["schedule"].as_array().unwrap().len(), 2);

    let request = Request::builder()
        .uri("/providers/tetsuya/slots")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Tetsuya");
    assert_eq!(
        body["schedule_text"],
        "2025-05-23:10:00,13:00\n2025-05-24:09:30"
    );
}

#[tokio::test]
async fn empty_date_line_does_not_persist() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir);

    let request = Request::builder()
        .method("PUT")
        .uri("/providers/chigusa/slots")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "name": "Chigusa",
                "schedule_text": "2025-06-01:"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .uri("/providers/chigusa/slots")
        .body(Body::empty())
        .unwrap();
    let body = body_json(app.oneshot(request).await.unwrap()).await;
    assert_eq!(body["schedule"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn malformed_replace_body_is_a_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir);

    let request = Request::builder()
        .method("PUT")
        .uri("/providers/tetsuya/slots")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": \"Tetsuya\""))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unknown_provider_lists_empty_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(&dir);

    let request = Request::builder()
        .uri("/providers/nobody/slots")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["schedule"].as_array().unwrap().len(), 0);
    assert_eq!(body["name"], "");
}
