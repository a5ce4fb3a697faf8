use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Chat ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// One turn of a conversation. Unknown fields on incoming messages are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ConversationMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ConversationMessage>,
}

// ── Analytics ─────────────────────────────────────────────────────────────────

/// One day of the Vercel web-analytics time series.
///
/// Every field is optional on the wire. A keyless entry never matches a date,
/// and counts that are not plain integers are read as numbers where possible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEntry {
    #[serde(default)]
    pub key: String,
    /// Page views.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub total: Option<u64>,
    /// Unique visitors.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub devices: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_rate")]
    pub bounce_rate: Option<f64>,
}

impl AnalyticsEntry {
    pub fn visitors(&self) -> u64 {
        self.devices.unwrap_or(0)
    }

    pub fn page_views(&self) -> u64 {
        self.total.unwrap_or(0)
    }

    /// The `YYYY-MM-DD` part of the key, whether the key is a bare date or a timestamp.
    pub fn date_key(&self) -> &str {
        self.key.split('T').next().unwrap_or_default()
    }
}

/// Floats are rounded, and negative or non-finite values count as 0.
/// Anything that is not a number is treated as absent.
fn deserialize_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_json))
}

fn count_from_json(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let n = value.as_f64()?;
    Some(if n.is_finite() && n > 0.0 { n.round() as u64 } else { 0 })
}

fn deserialize_rate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_f64))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageViews {
    pub today: u64,
    pub week: u64,
    pub month: u64,
}

/// Display-ready rollup served by `GET /api/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRollup {
    pub today: u64,
    pub week: u64,
    pub month: u64,
    pub page_views: PageViews,
    pub today_delta: i64,
    pub week_delta: i64,
    pub month_delta: i64,
    pub today_trend: Vec<u64>,
    pub week_trend: Vec<u64>,
    pub month_trend: Vec<u64>,
    pub today_pageview_trend: Vec<u64>,
    pub week_pageview_trend: Vec<u64>,
    pub month_pageview_trend: Vec<u64>,
}

// ── Contact ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}
