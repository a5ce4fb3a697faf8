use chrono::Utc;
use tracing::{debug, warn};

use crate::analytics::{compute_rollup, AnalyticsCredentials, ReportWindow, VercelAnalyticsClient};
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::StatsRollup;

#[derive(Clone)]
pub struct StatsService {
    client: VercelAnalyticsClient,
    api_token: Option<String>,
    project_id: Option<String>,
    team_id: Option<String>,
}

impl StatsService {
    pub fn new(client: VercelAnalyticsClient, config: &AppConfig) -> Self {
        Self {
            client,
            api_token: config.vercel_api_token.clone(),
            project_id: config.vercel_project_id.clone(),
            team_id: config.vercel_team_id.clone(),
        }
    }

    fn credentials(&self) -> Result<AnalyticsCredentials, AppError> {
        match (&self.api_token, &self.project_id) {
            (Some(api_token), Some(project_id)) => Ok(AnalyticsCredentials {
                api_token: api_token.clone(),
                project_id: project_id.clone(),
                team_id: self.team_id.clone(),
            }),
            _ => {
                warn!(
                    api_token = self.api_token.is_some(),
                    project_id = self.project_id.is_some(),
                    team_id = self.team_id.is_some(),
                    "analytics credentials missing"
                );
                Err(AppError::MissingSettings { names: vec!["VERCEL_API_TOKEN", "VERCEL_PROJECT_ID"] })
            }
        }
    }

    /// Fetches the trailing 30-day series and rolls it up. All or nothing.
    pub async fn fetch_stats(&self) -> Result<StatsRollup, AppError> {
        let credentials = self.credentials()?;

        let now = Utc::now();
        let window = ReportWindow::trailing_month(now);
        let entries = self.client.fetch_timeseries(&credentials, &window).await?;

        let rollup = compute_rollup(&entries, now.date_naive());
        debug!(
            today = rollup.today,
            week = rollup.week,
            month = rollup.month,
            entries = entries.len(),
            "stats rollup computed"
        );
        Ok(rollup)
    }
}
