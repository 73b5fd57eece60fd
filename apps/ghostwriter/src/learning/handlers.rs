//! Axum route handlers for the learning and review API.

use std::collections::BTreeMap;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::read_upload;
use crate::learning::document::{Document, DocumentStatus, DocumentSummary};
use crate::learning::reviewer::Feedback;
use crate::learning::workspace::{UploadOutcome, WorkspaceStatus};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UploadDocumentRequest {
    pub content: String,
    pub filename: String,
    /// "draft" (default) or "final".
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PreferredTermRequest {
    pub variant: String,
    pub preferred: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub content: String,
}

fn parse_status(raw: Option<&str>) -> Result<DocumentStatus, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(DocumentStatus::default()),
        Some(s) => s
            .parse::<DocumentStatus>()
            .map_err(|e| AppError::Validation(e.to_string())),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/learning/status
pub async fn handle_status(State(state): State<AppState>) -> Result<Json<WorkspaceStatus>, AppError> {
    Ok(Json(state.read_workspace()?.status()))
}

/// POST /api/v1/learning/documents
pub async fn handle_upload_document(
    State(state): State<AppState>,
    Json(req): Json<UploadDocumentRequest>,
) -> Result<Json<UploadOutcome>, AppError> {
    if req.filename.trim().is_empty() {
        return Err(AppError::Validation("filename cannot be empty".to_string()));
    }
    let status = parse_status(req.status.as_deref())?;
    let outcome = state
        .write_workspace()?
        .upload_document(req.content, req.filename, status);
    Ok(Json(outcome))
}

/// POST /api/v1/learning/documents/upload
///
/// Multipart: `file` (.txt, .md, .docx or .pdf) and optional `status`.
pub async fn handle_upload_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadOutcome>, AppError> {
    let upload = read_upload(multipart).await?;
    let status = parse_status(upload.fields.get("status").map(String::as_str))?;
    let outcome = state
        .write_workspace()?
        .upload_document(upload.text, upload.filename, status);
    Ok(Json(outcome))
}

/// GET /api/v1/learning/documents
pub async fn handle_list_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentSummary>>, AppError> {
    let workspace = state.read_workspace()?;
    Ok(Json(
        workspace.documents().iter().map(|d| d.summary()).collect(),
    ))
}

/// GET /api/v1/learning/documents/:id
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>, AppError> {
    let workspace = state.read_workspace()?;
    workspace
        .document(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))
}

/// PUT /api/v1/learning/terms
pub async fn handle_mark_preferred_term(
    State(state): State<AppState>,
    Json(req): Json<PreferredTermRequest>,
) -> Result<StatusCode, AppError> {
    state
        .write_workspace()?
        .mark_preferred_term(&req.variant, &req.preferred);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/learning/terms
pub async fn handle_list_preferred_terms(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, String>>, AppError> {
    let workspace = state.read_workspace()?;
    Ok(Json(
        workspace
            .preferred_terms()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    ))
}

/// POST /api/v1/review
pub async fn handle_review(
    State(state): State<AppState>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<Feedback>, AppError> {
    Ok(Json(state.read_workspace()?.review_document(&req.content)))
}

/// POST /api/v1/review/upload
pub async fn handle_review_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Feedback>, AppError> {
    let upload = read_upload(multipart).await?;
    Ok(Json(state.read_workspace()?.review_document(&upload.text)))
}
