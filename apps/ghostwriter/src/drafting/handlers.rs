//! Axum route handlers for drafting and the style guide.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::drafting::generator::{generate_draft, Draft, DraftRequest};
use crate::drafting::style_guide::StyleGuide;
use crate::errors::AppError;
use crate::extract::read_upload;
use crate::learning::Feedback;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    #[serde(flatten)]
    pub draft: Draft,
    /// Present when the request asked for a review and the style model is ready.
    pub feedback: Option<Feedback>,
}

#[derive(Debug, Deserialize)]
pub struct StyleGuideRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct StyleGuideResponse {
    pub style_guide: Option<StyleGuide>,
    /// False when the guide is active in memory but could not be written to disk.
    pub persisted: Option<bool>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/drafts
///
/// Generates a Markdown draft from product info, optionally reviewed against
/// the learned style model.
pub async fn handle_generate_draft(
    State(state): State<AppState>,
    Json(request): Json<DraftRequest>,
) -> Result<Json<DraftResponse>, AppError> {
    run_draft(&state, request).await.map(Json)
}

/// POST /api/v1/drafts/upload
///
/// Multipart: `file` with the product info, optional `doc_type`, `audience`, `review`.
pub async fn handle_generate_draft_from_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<DraftResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let request = DraftRequest {
        product_info: upload.text,
        doc_type: parse_field(upload.fields.get("doc_type"), "doc_type")?,
        audience: parse_field(upload.fields.get("audience"), "audience")?,
        review: upload
            .fields
            .get("review")
            .is_some_and(|v| matches!(v.trim(), "true" | "1" | "yes")),
    };
    run_draft(&state, request).await.map(Json)
}

/// GET /api/v1/style-guide
pub async fn handle_get_style_guide(State(state): State<AppState>) -> Json<StyleGuideResponse> {
    let store = state.style_guide.read().await;
    Json(StyleGuideResponse {
        style_guide: store.current().cloned(),
        persisted: None,
    })
}

/// PUT /api/v1/style-guide
pub async fn handle_put_style_guide(
    State(state): State<AppState>,
    Json(req): Json<StyleGuideRequest>,
) -> Result<Json<StyleGuideResponse>, AppError> {
    replace_style_guide(&state, req.text).await.map(Json)
}

/// POST /api/v1/style-guide/upload
pub async fn handle_upload_style_guide(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<StyleGuideResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    replace_style_guide(&state, upload.text).await.map(Json)
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn run_draft(state: &AppState, request: DraftRequest) -> Result<DraftResponse, AppError> {
    let drafter = state.drafter.as_ref().ok_or_else(|| {
        AppError::NotConfigured("Draft generation requires OPENAI_API_KEY".to_string())
    })?;

    let style_guide = state.style_guide.read().await.text().map(str::to_string);
    let draft = generate_draft(drafter.as_ref(), &request, style_guide.as_deref()).await?;

    let feedback = if request.review {
        let workspace = state.read_workspace()?;
        workspace
            .model_ready()
            .then(|| workspace.review_document(&draft.content))
    } else {
        None
    };

    Ok(DraftResponse { draft, feedback })
}

async fn replace_style_guide(state: &AppState, text: String) -> Result<StyleGuideResponse, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("style guide cannot be empty".to_string()));
    }
    let (guide, persisted) = state.style_guide.write().await.replace(text).await;
    Ok(StyleGuideResponse {
        style_guide: Some(guide),
        persisted: Some(persisted),
    })
}

fn parse_field<T: DeserializeOwned + Default>(raw: Option<&String>, name: &str) -> Result<T, AppError> {
    match raw.map(|s| s.trim()).filter(|s| !s.is_empty()) {
        None => Ok(T::default()),
        Some(value) => serde_json::from_value(serde_json::Value::String(value.to_string()))
            .map_err(|_| AppError::Validation(format!("invalid {name} '{value}'"))),
    }
}
