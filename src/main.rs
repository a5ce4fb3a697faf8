use tracing::{info, warn};

use portfolio_api::build_app;
use portfolio_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_api=debug,tower_http=debug".into()),
        )
        .init();

    // ── Configuration ─────────────────────────────────────────────────────────
    let config = AppConfig::from_env();

    if config.groq_api_key.is_none() {
        warn!("GROQ_API_KEY is not set; /api/chat will answer with 500");
    }
    if config.vercel_api_token.is_none() || config.vercel_project_id.is_none() {
        warn!("VERCEL_API_TOKEN or VERCEL_PROJECT_ID is not set; /api/stats will answer with 400");
    }
    if config.contact_form_endpoint.is_none() {
        warn!("CONTACT_FORM_ENDPOINT is not set; /api/contact will answer with 500");
    }

    // ── Router ────────────────────────────────────────────────────────────────
    let app = build_app(&config)?;

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
