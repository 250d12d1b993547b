//! LexBrief: judgment summarization server.

use std::sync::Arc;

use lexbrief_chat::LLMConfig;
use lexbrief_core::LexBriefConfig;
use lexbrief_server::{build_router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let config = LexBriefConfig::from_env();
    let llm_config = LLMConfig::from_env();
    let port = config.port;
    info!(
        "Summary mode: {}, upload limit: {} MB",
        config.mode,
        config.max_upload_bytes / (1024 * 1024)
    );

    let state = Arc::new(
        AppState::new(config, llm_config)
            .map_err(|e| anyhow::anyhow!("Failed to initialise state: {}", e))?,
    );

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("LexBrief server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
