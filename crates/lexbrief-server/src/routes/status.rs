//! Service status: which remote backends are configured. Keys never leave
//! the process.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/status", get(get_status))
}

/// GET /api/status
async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let llm = state.llm_config.to_status();

    Json(serde_json::json!({
        "llmAvailable": state.pipeline.rewriter().is_available(),
        "llmProvider": llm.llm_provider,
        "model": llm.model,
        "classifierAvailable": state.pipeline.scorer().is_available(),
        "mode": state.config.mode,
        "openaiConfigured": llm.openai_configured,
        "anthropicConfigured": llm.anthropic_configured,
        "groqConfigured": llm.groq_configured,
    }))
}
