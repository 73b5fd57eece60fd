use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /health
/// Returns service status, version and whether drafting and the style model are available.
pub async fn health_handler(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let model_ready = state.read_workspace()?.model_ready();
    Ok(Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "ghostwriter",
        "drafting_enabled": state.drafter.is_some(),
        "llm_model": state.drafter.as_ref().map(|_| state.config.openai_model.as_str()),
        "model_ready": model_ready
    })))
}
