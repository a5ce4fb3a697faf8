use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::errors::AppError;
use crate::models::ChatRequest;
use crate::service::chat_service::ChatService;

/// POST `/api/chat`: relays the conversation to the LLM and streams back
/// text-part lines as they arrive.
///
/// The body is decoded by hand so that a malformed request is reported with
/// the same JSON error shape as every other pre-stream failure.
pub async fn chat_handler(State(svc): State<ChatService>, body: Bytes) -> Response {
    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return error_response(&AppError::InvalidRequest { message: e.to_string() }),
    };

    match svc.stream_reply(request).await {
        Ok(stream) => (
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::CACHE_CONTROL, "no-cache"),
                (header::CONNECTION, "keep-alive"),
            ],
            Body::from_stream(stream),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

// ── Helper ────────────────────────────────────────────────────────────────────

fn error_response(err: &AppError) -> Response {
    error!("[chat] {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal Server Error", "detail": err.to_string() })),
    )
        .into_response()
}
