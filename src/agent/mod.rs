pub mod sse;

use futures_util::Stream;
use serde::Serialize;
use tracing::{debug, error};

use crate::errors::AppError;
use crate::models::{ConversationMessage, MessageRole};

pub use sse::text_deltas;

const PROVIDER: &str = "Groq";

pub const CHAT_MODEL: &str = "llama-3.1-8b-instant";
pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 500;

pub const PERSONA_PROMPT: &str = "\
You are Sahil Support, an AI assistant for Sahil Bansal's portfolio website.

About Sahil:
- DevOps Engineer focused on infrastructure automation, reliability, and cost-efficient cloud systems
- Currently working at Buyogo AG as Software Engineer, DevOps & Cloud Infrastructure (Jun 2024 - Present)
- Previously worked at Capgemini, Qapita Fintech, and Xebia
- Graduated from University of Petroleum and Energy Studies with a B.Tech in Computer Science and Engineering (DevOps & Cloud Specialization)

Key Achievements:
- Architected a 99.99% available multi-tenant FTP platform
- Led a Terraform transformation reducing TTR by 40%
- Reduced AWS spend by 40% (~$40k annually)
- Built a real-time data lakehouse reducing query latency from minutes to milliseconds
- Executed a zero-downtime Auth0 migration for 1,000+ users

Skills:
- Cloud: AWS (ECS, Lambda, RDS, S3, IAM, VPC, CloudFront, Route 53), Kubernetes, Docker
- IaC: Terraform, AWS CloudFormation
- CI/CD: GitHub Actions, Jenkins, AWS CodeBuild, Bitbucket Pipelines
- Observability: Prometheus, Grafana, AWS CloudWatch
- Security: IAM, Auth0, DevSecOps
- Data: Dagster, DLT, DBT, ClickHouse, PostgreSQL, MySQL, MongoDB
- Languages: Python, Bash, HCL, YAML

Contact: sahilbansal.sb24@gmail.com | LinkedIn: linkedin.com/in/sahilbansal24

Be helpful, professional, and concise. Answer questions about Sahil's experience, skills, and projects.";

/// Prepends the persona prompt to the caller's conversation.
pub fn with_persona(history: Vec<ConversationMessage>) -> Vec<ConversationMessage> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ConversationMessage::new(MessageRole::System, PERSONA_PROMPT));
    messages.extend(history);
    messages
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ConversationMessage],
    stream: bool,
    temperature: f64,
    max_tokens: u32,
}

/// Client for Groq's OpenAI-compatible chat completions endpoint.
///
/// Sampling parameters are fixed per deployment: every request uses
/// [`CHAT_MODEL`], [`TEMPERATURE`] and [`MAX_TOKENS`].
#[derive(Clone)]
pub struct GroqAgentService {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GroqAgentService {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Opens a streaming completion for `history` and returns its text deltas.
    ///
    /// Everything up to the upstream response headers happens before this
    /// returns, so a missing key, a refused connection or a non-2xx status is
    /// reported here rather than inside the stream.
    pub async fn stream_chat(
        &self,
        history: Vec<ConversationMessage>,
    ) -> Result<impl Stream<Item = Result<String, AppError>> + Send + 'static, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AppError::MissingSetting { name: "GROQ_API_KEY" })?;

        let messages = with_persona(history);
        let request = CompletionRequest {
            model: CHAT_MODEL,
            messages: &messages,
            stream: true,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = CHAT_MODEL, messages = messages.len(), "opening completion stream");

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Groq request failed: {e}");
                AppError::upstream_unavailable(PROVIDER, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Groq rejected completion request");
            return Err(AppError::Upstream { provider: PROVIDER, status: status.as_u16(), body });
        }

        Ok(text_deltas(Box::pin(response.bytes_stream())))
    }
}
