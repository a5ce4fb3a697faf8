pub mod rollup;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::errors::AppError;
use crate::models::AnalyticsEntry;

pub use rollup::compute_rollup;

const PROVIDER: &str = "Vercel";
const TIMESERIES_PATH: &str = "/api/web-analytics/timeseries";
const SERIES_POINTER: &str = "/data/groups/all";
const WINDOW_DAYS: i64 = 30;

/// Credentials for the Vercel Web Analytics API.
#[derive(Debug, Clone)]
pub struct AnalyticsCredentials {
    pub api_token: String,
    pub project_id: String,
    pub team_id: Option<String>,
}

/// The `[from, to]` interval requested from the analytics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl ReportWindow {
    /// The trailing 30 days ending at `now`.
    pub fn trailing_month(now: DateTime<Utc>) -> Self {
        Self { from: now - Duration::days(WINDOW_DAYS), to: now }
    }

    fn from_param(&self) -> String {
        self.from.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn to_param(&self) -> String {
        self.to.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[derive(Clone)]
pub struct VercelAnalyticsClient {
    http: reqwest::Client,
    base_url: String,
}

impl VercelAnalyticsClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string() }
    }

    /// Fetches the daily visitor/pageview series for `window`, oldest first.
    pub async fn fetch_timeseries(
        &self,
        credentials: &AnalyticsCredentials,
        window: &ReportWindow,
    ) -> Result<Vec<AnalyticsEntry>, AppError> {
        let mut query: Vec<(&str, String)> = vec![("projectId", credentials.project_id.clone())];
        if let Some(team_id) = &credentials.team_id {
            query.push(("teamId", team_id.clone()));
        }
        query.push(("from", window.from_param()));
        query.push(("to", window.to_param()));
        query.push(("environment", "production".to_string()));
        query.push(("filter", "{}".to_string()));

        debug!(
            project_id = %credentials.project_id,
            team_id = ?credentials.team_id,
            from = %window.from_param(),
            to = %window.to_param(),
            "fetching web analytics timeseries"
        );

        let response = self
            .http
            .get(format!("{}{TIMESERIES_PATH}", self.base_url))
            .bearer_auth(&credentials.api_token)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::upstream_unavailable(PROVIDER, e))?;

        let status = response.status();
        debug!(status = status.as_u16(), "analytics response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(500).collect();
            error!(status = status.as_u16(), body = %excerpt, "analytics API error");
            return Err(AppError::Upstream { provider: PROVIDER, status: status.as_u16(), body });
        }

        let payload: Value = response.json().await.map_err(|e| AppError::UpstreamResponse {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

        let entries = extract_series(&payload);
        debug!(entries = entries.len(), "analytics series parsed");
        Ok(entries)
    }
}

/// Reads the series at `data.groups.all`. A missing or non-list series is
/// treated as empty. An item that is not an entry object keeps its position
/// as an empty day so the week still covers the last seven items.
pub fn extract_series(payload: &Value) -> Vec<AnalyticsEntry> {
    let Some(Value::Array(items)) = payload.pointer(SERIES_POINTER) else {
        warn!("analytics response has no data.groups.all list; using an empty series");
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            AnalyticsEntry::deserialize(item).unwrap_or_else(|e| {
                warn!(index, error = %e, "unreadable timeseries entry; counting it as zero");
                AnalyticsEntry::default()
            })
        })
        .collect()
}
