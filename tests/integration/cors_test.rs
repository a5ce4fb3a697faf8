use axum::body::Body;
use axum::http::{Request, StatusCode};
use portfolio_api::build_app;

use crate::support::{app, config_for, get, send};

const ORIGIN: &str = "https://example.dev";

#[tokio::test]
async fn preflight_is_answered_for_the_configured_origin() {
    let mut config = config_for("http://127.0.0.1:9");
    config.cors_allow_origin = Some(ORIGIN.into());

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/contact")
        .header("origin", ORIGIN)
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = send(app(&config), request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("access-control-allow-origin"), Some(ORIGIN));
    let methods = response.header("access-control-allow-methods").unwrap_or_default();
    assert!(methods.contains("GET") && methods.contains("POST"), "{methods}");
    assert_eq!(response.header("access-control-allow-headers"), Some("content-type"));
}

#[tokio::test]
async fn responses_carry_the_allowed_origin() {
    let mut config = config_for("http://127.0.0.1:9");
    config.cors_allow_origin = Some(ORIGIN.into());
    config.vercel_project_id = None;

    let mut request = get("/api/stats");
    request.headers_mut().insert("origin", ORIGIN.parse().unwrap());
    let response = send(app(&config), request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.header("access-control-allow-origin"), Some(ORIGIN));
}

#[tokio::test]
async fn no_cors_headers_without_an_origin_setting() {
    let mut config = config_for("http://127.0.0.1:9");
    config.vercel_project_id = None;

    let mut request = get("/api/stats");
    request.headers_mut().insert("origin", ORIGIN.parse().unwrap());
    let response = send(app(&config), request).await;

    assert_eq!(response.header("access-control-allow-origin"), None);
}

#[test]
fn unparsable_origin_fails_to_build() {
    let mut config = config_for("http://127.0.0.1:9");
    config.cors_allow_origin = Some("https://bad\norigin".into());

    assert!(build_app(&config).is_err());
}
