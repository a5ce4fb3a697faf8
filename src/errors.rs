use thiserror::Error;

/// Top-level application error.
/// All variants carry a human-readable message for display/logging.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Configuration errors ─────────────────────────────────────────────────
    #[error("{name} is not configured")]
    MissingSetting { name: &'static str },

    #[error("Missing {}", .names.join(" or "))]
    MissingSettings { names: Vec<&'static str> },

    // ── Upstream provider errors ─────────────────────────────────────────────
    #[error("{provider} API error: {status} - {body}")]
    Upstream {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} request failed: {source}")]
    UpstreamUnavailable {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid {provider} response: {message}")]
    UpstreamResponse {
        provider: &'static str,
        message: String,
    },

    #[error("{message}")]
    RelayRejected { status: u16, message: String },

    #[error("Stream aborted: {message}")]
    StreamAborted { message: String },

    // ── Request errors ───────────────────────────────────────────────────────
    #[error("Invalid request body: {message}")]
    InvalidRequest { message: String },

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("Field '{field_name}' exceeds max length of {max_length} (actual: {actual_length})")]
    FieldTooLong { field_name: String, max_length: usize, actual_length: usize },

    #[error("'{value}' is not a valid email address")]
    InvalidEmail { value: String },
}

impl AppError {
    pub fn upstream_unavailable(provider: &'static str, source: reqwest::Error) -> Self {
        AppError::UpstreamUnavailable { provider, source }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, AppError::MissingSetting { .. } | AppError::MissingSettings { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::EmptyField { .. } | AppError::FieldTooLong { .. } | AppError::InvalidEmail { .. }
        )
    }

    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::Upstream { .. }
                | AppError::UpstreamUnavailable { .. }
                | AppError::UpstreamResponse { .. }
                | AppError::RelayRejected { .. }
        )
    }
}
