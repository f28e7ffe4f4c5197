//! Relay API Endpoint Tests
//!
//! Drives the router directly with `tower::ServiceExt::oneshot`,
//! backed by a mock upstream server.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vidrelay::config::RelayConfig;
use vidrelay::providers::kie::{KieClient, TEXT_TO_VIDEO_MODEL};
use vidrelay::server::build_router;

fn test_router(mock_server: &MockServer) -> Router {
    let config = RelayConfig::new("test-api-key").with_base_url(mock_server.uri());
    let service = Arc::new(KieClient::new(config, reqwest::Client::new()));
    build_router(service)
}

fn generate_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn status_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn generate_rejects_missing_prompt() {
    let mock_server = MockServer::start().await;
    let app = test_router(&mock_server);

    let response = app
        .oneshot(generate_request(json!({ "mode": "text", "prompt": "" })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Prompt is required");

    // Nothing reached the upstream.
    assert!(
        mock_server
            .received_requests()
            .await
            .expect("requests recorded")
            .is_empty()
    );
}

#[tokio::test]
async fn generate_rejects_image_mode_without_image_url() {
    let mock_server = MockServer::start().await;
    let app = test_router(&mock_server);

    let response = app
        .oneshot(generate_request(
            json!({ "mode": "image", "prompt": "a cat" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Image URL is required");
}

#[tokio::test]
async fn generate_returns_task_id_and_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/createTask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "msg": "success",
            "data": { "taskId": "task-123" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = test_router(&mock_server);
    let response = app
        .oneshot(generate_request(
            json!({ "mode": "text", "prompt": "a cat" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["taskId"], "task-123");
    assert_eq!(body["message"], "Video generation started");
}

#[tokio::test]
async fn generate_surfaces_upstream_message_as_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/createTask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 402,
            "msg": "quota exceeded"
        })))
        .mount(&mock_server)
        .await;

    let app = test_router(&mock_server);
    let response = app
        .oneshot(generate_request(
            json!({ "mode": "text", "prompt": "a cat" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["error"], "quota exceeded");
}

#[tokio::test]
async fn status_requires_task_id() {
    let mock_server = MockServer::start().await;
    let app = test_router(&mock_server);

    let response = app
        .oneshot(status_request("/api/status"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "taskId is required");
}

#[tokio::test]
async fn status_returns_pending_with_null_video_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/recordInfo"))
        .and(query_param("taskId", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {
                "taskId": "t1",
                "state": "waiting",
                "model": TEXT_TO_VIDEO_MODEL
            }
        })))
        .mount(&mock_server)
        .await;

    let app = test_router(&mock_server);
    let response = app
        .oneshot(status_request("/api/status?taskId=t1"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["taskId"], "t1");
    assert_eq!(body["state"], "pending");
    assert!(body["videoUrl"].is_null());
    assert_eq!(body["model"], TEXT_TO_VIDEO_MODEL);
}

#[tokio::test]
async fn status_returns_video_url_on_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/recordInfo"))
        .and(query_param("taskId", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {
                "taskId": "t1",
                "state": "success",
                "resultJson": "{\"resultUrls\": [\"https://x/video.mp4\"]}",
                "model": TEXT_TO_VIDEO_MODEL
            }
        })))
        .mount(&mock_server)
        .await;

    let app = test_router(&mock_server);
    let response = app
        .oneshot(status_request("/api/status?taskId=t1"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["state"], "success");
    assert_eq!(body["videoUrl"], "https://x/video.mp4");
}

#[tokio::test]
async fn status_keeps_success_when_result_payload_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/recordInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {
                "taskId": "t1",
                "state": "success",
                "resultJson": "{broken",
                "model": TEXT_TO_VIDEO_MODEL
            }
        })))
        .mount(&mock_server)
        .await;

    let app = test_router(&mock_server);
    let response = app
        .oneshot(status_request("/api/status?taskId=t1"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["state"], "success");
    assert!(body["videoUrl"].is_null());
}
