use std::env;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_GROQ_API_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_VERCEL_API_BASE_URL: &str = "https://vercel.com";

/// Process configuration, read once at startup.
///
/// Provider secrets are optional here: each endpoint checks for the settings
/// it needs per request and reports a configuration error when they are absent,
/// so the server still starts with a partial environment.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub port: u16,
    pub groq_api_key: Option<String>,
    pub groq_api_base_url: String,
    pub vercel_api_token: Option<String>,
    pub vercel_project_id: Option<String>,
    pub vercel_team_id: Option<String>,
    pub vercel_api_base_url: String,
    pub contact_form_endpoint: Option<String>,
    pub cors_allow_origin: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            port: get("PORT").and_then(|p| p.parse().ok()).unwrap_or(DEFAULT_PORT),
            groq_api_key: get("GROQ_API_KEY"),
            groq_api_base_url: get("GROQ_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GROQ_API_BASE_URL.to_string()),
            vercel_api_token: get("VERCEL_API_TOKEN"),
            vercel_project_id: get("VERCEL_PROJECT_ID"),
            vercel_team_id: get("VERCEL_TEAM_ID"),
            vercel_api_base_url: get("VERCEL_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_VERCEL_API_BASE_URL.to_string()),
            contact_form_endpoint: get("CONTACT_FORM_ENDPOINT"),
            cors_allow_origin: get("CORS_ALLOW_ORIGIN"),
        }
    }
}
