use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::{app, config_for, post_json, send};

#[tokio::test]
async fn relays_a_trimmed_submission() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/f/contact"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "next": "/thanks" })))
        .expect(1)
        .mount(&upstream)
        .await;

    let form = json!({ "name": " Ada Lovelace ", "email": "ada@example.com", "message": " Let's talk. " });
    let response = send(app(&config_for(&upstream.uri())), post_json("/api/contact", &form)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "success": true }));

    let requests = upstream.received_requests().await.expect("recording enabled");
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        sent,
        json!({ "name": "Ada Lovelace", "email": "ada@example.com", "message": "Let's talk." })
    );
}

#[tokio::test]
async fn invalid_submission_never_reaches_the_relay() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&upstream).await;

    let form = json!({ "name": "Ada", "email": "not-an-email", "message": "hi" });
    let response = send(app(&config_for(&upstream.uri())), post_json("/api/contact", &form)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "'not-an-email' is not a valid email address" }));
}

#[tokio::test]
async fn incomplete_body_is_a_validation_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&upstream).await;

    let form = json!({ "name": "Ada", "message": "hi" });
    let response = send(app(&config_for(&upstream.uri())), post_json("/api/contact", &form)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.header("content-type"), Some("application/json"));
    let error = response.json()["error"].as_str().unwrap().to_string();
    assert!(error.contains("missing field `email`"), "{error}");
}

#[tokio::test]
async fn non_json_body_is_a_validation_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&upstream).await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(axum::body::Body::from("name=Ada&email=ada%40example.com&message=hi"))
        .unwrap();
    let response = send(app(&config_for(&upstream.uri())), request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn relay_error_message_is_passed_through() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/f/contact"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "error": "Form not found" })))
        .mount(&upstream)
        .await;

    let form = json!({ "name": "Ada", "email": "ada@example.com", "message": "hi" });
    let response = send(app(&config_for(&upstream.uri())), post_json("/api/contact", &form)).await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.json(), json!({ "error": "Form not found" }));
}

#[tokio::test]
async fn relay_error_without_message_uses_default() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/f/contact"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
        .mount(&upstream)
        .await;

    let form = json!({ "name": "Ada", "email": "ada@example.com", "message": "hi" });
    let response = send(app(&config_for(&upstream.uri())), post_json("/api/contact", &form)).await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.json(), json!({ "error": "Failed to send message" }));
}

#[tokio::test]
async fn missing_endpoint_is_a_server_error() {
    let mut config = config_for("http://127.0.0.1:9");
    config.contact_form_endpoint = None;

    let form = json!({ "name": "Ada", "email": "ada@example.com", "message": "hi" });
    let response = send(app(&config), post_json("/api/contact", &form)).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json(), json!({ "error": "CONTACT_FORM_ENDPOINT is not configured" }));
}
