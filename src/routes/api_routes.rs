use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::errors::AppError;
use crate::models::ContactForm;
use crate::service::contact_service::ContactService;
use crate::service::stats_service::StatsService;

/// GET `/api/stats`: visitor and pageview rollup for the last 30 days.
pub async fn stats_handler(State(svc): State<StatsService>) -> Response {
    match svc.fetch_stats().await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) if e.is_configuration() => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response()
        }
        Err(e) => {
            error!("Error fetching stats: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch statistics", "details": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// POST `/api/contact`: validates a contact form and relays it.
///
/// A body that is not a `{ name, email, message }` object is a validation
/// failure and gets the same 400 `{ error }` shape.
pub async fn contact_handler(State(svc): State<ContactService>, body: Bytes) -> Response {
    let result = match serde_json::from_slice::<ContactForm>(&body) {
        Ok(form) => svc.send(form).await,
        Err(e) => Err(AppError::InvalidRequest { message: e.to_string() }),
    };

    match result {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(e) => {
            let status = contact_status(&e);
            if status.is_server_error() {
                error!("Contact relay failed: {e}");
            }
            (status, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

// ── Helper ────────────────────────────────────────────────────────────────────

fn contact_status(err: &AppError) -> StatusCode {
    if err.is_validation() || matches!(err, AppError::InvalidRequest { .. }) {
        StatusCode::BAD_REQUEST
    } else if err.is_upstream() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
