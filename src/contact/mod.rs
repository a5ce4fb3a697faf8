use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::ContactForm;

const PROVIDER: &str = "Form relay";
const DEFAULT_FAILURE: &str = "Failed to send message";

#[derive(Debug, Default, Deserialize)]
struct RelayReply {
    #[serde(default)]
    error: Option<String>,
}

/// Forwards contact submissions to a hosted form endpoint (Formspree-style JSON API).
#[derive(Clone)]
pub struct FormRelayClient {
    http: reqwest::Client,
    endpoint: Option<String>,
}

impl FormRelayClient {
    pub fn new(http: reqwest::Client, endpoint: Option<String>) -> Self {
        Self { http, endpoint }
    }

    pub async fn submit(&self, form: &ContactForm) -> Result<(), AppError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(AppError::MissingSetting { name: "CONTACT_FORM_ENDPOINT" })?;

        let response = self
            .http
            .post(endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(form)
            .send()
            .await
            .map_err(|e| AppError::upstream_unavailable(PROVIDER, e))?;

        let status = response.status();
        let reply: RelayReply = response.json().await.map_err(|e| AppError::UpstreamResponse {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

        if !status.is_success() {
            let message = reply.error.unwrap_or_else(|| DEFAULT_FAILURE.to_string());
            error!(status = status.as_u16(), "form relay rejected submission: {message}");
            return Err(AppError::RelayRejected { status: status.as_u16(), message });
        }

        info!("contact form submission relayed");
        Ok(())
    }
}
