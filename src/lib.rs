pub mod agent;
pub mod analytics;
pub mod config;
pub mod contact;
pub mod errors;
pub mod models;
pub mod protocol;
pub mod routes;
pub mod service;

use axum::extract::FromRef;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::agent::GroqAgentService;
use crate::analytics::VercelAnalyticsClient;
use crate::config::AppConfig;
use crate::contact::FormRelayClient;
use crate::routes::api_routes::{contact_handler, stats_handler};
use crate::routes::chat_routes::chat_handler;
use crate::service::chat_service::ChatService;
use crate::service::contact_service::ContactService;
use crate::service::stats_service::StatsService;

/// Shared per-process state. Every service is cheap to clone and shares one
/// HTTP connection pool.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub chat: ChatService,
    pub stats: StatsService,
    pub contact: ContactService,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let agent = GroqAgentService::new(http.clone(), &config.groq_api_base_url, config.groq_api_key.clone());
        let analytics = VercelAnalyticsClient::new(http.clone(), &config.vercel_api_base_url);
        let relay = FormRelayClient::new(http, config.contact_form_endpoint.clone());

        Ok(Self {
            chat: ChatService::new(agent),
            stats: StatsService::new(analytics, config),
            contact: ContactService::new(relay),
        })
    }
}

/// Builds the full application router from configuration.
pub fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let state = AppState::new(config)?;

    let mut app = Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/contact", post(contact_handler))
        .layer(TraceLayer::new_for_http());

    if let Some(origin) = &config.cors_allow_origin {
        let cors = CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]);
        app = app.layer(cors);
    }

    Ok(app.with_state(state))
}
