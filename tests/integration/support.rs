use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use portfolio_api::build_app;
use portfolio_api::config::AppConfig;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("utf-8 body")
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json body")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Config with every provider pointed at `upstream` and all secrets set.
pub fn config_for(upstream: &str) -> AppConfig {
    AppConfig {
        port: 0,
        groq_api_key: Some("test-groq-key".into()),
        groq_api_base_url: format!("{upstream}/openai/v1"),
        vercel_api_token: Some("test-vercel-token".into()),
        vercel_project_id: Some("prj_portfolio".into()),
        vercel_team_id: Some("team_home".into()),
        vercel_api_base_url: upstream.to_string(),
        contact_form_endpoint: Some(format!("{upstream}/f/contact")),
        cors_allow_origin: None,
    }
}

pub fn app(config: &AppConfig) -> Router {
    build_app(config).expect("router builds")
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects")
        .to_vec();
    TestResponse { status, headers, body }
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request builds")
}
