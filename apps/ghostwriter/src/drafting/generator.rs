//! Draft generation: pluggable, trait-based writer that turns product info into a Markdown draft.
//!
//! Default: `LlmDraftWriter` (chat completion via `LlmClient`).
//! `AppState` holds an `Option<Arc<dyn DraftWriter>>`; `None` when no API key is configured.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::drafting::models::{Audience, DocumentType};
use crate::drafting::prompts::{build_system_prompt, build_user_prompt};
use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// Carried in `AppState` as `Arc<dyn DraftWriter>`.
#[async_trait]
pub trait DraftWriter: Send + Sync {
    async fn write(&self, system: &str, user: &str) -> Result<String, AppError>;

    /// Backend name, reported alongside each draft.
    fn backend(&self) -> String;
}

pub struct LlmDraftWriter(pub LlmClient);

#[async_trait]
impl DraftWriter for LlmDraftWriter {
    async fn write(&self, system: &str, user: &str) -> Result<String, AppError> {
        self.0
            .complete(system, user)
            .await
            .map_err(|e| AppError::Llm(format!("Draft generation failed: {e}")))
    }

    fn backend(&self) -> String {
        self.0.model().to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftRequest {
    pub product_info: String,
    #[serde(default)]
    pub doc_type: DocumentType,
    #[serde(default)]
    pub audience: Audience,
    /// Run the finished draft through the style reviewer.
    #[serde(default)]
    pub review: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Draft {
    pub doc_type: DocumentType,
    pub audience: Audience,
    pub content: String,
    pub style_guide_applied: bool,
    pub backend: String,
}

/// Builds the prompts and asks the writer for a draft.
pub async fn generate_draft(
    writer: &dyn DraftWriter,
    request: &DraftRequest,
    style_guide: Option<&str>,
) -> Result<Draft, AppError> {
    let product_info = request.product_info.trim();
    if product_info.is_empty() {
        return Err(AppError::Validation(
            "product_info cannot be empty".to_string(),
        ));
    }

    let style_guide_applied = style_guide.is_some_and(|g| !g.trim().is_empty());
    let system = build_system_prompt(request.doc_type, request.audience, style_guide);
    let user = build_user_prompt(request.doc_type, request.audience, product_info);

    let content = writer.write(&system, &user).await?;
    info!(
        "Generated {} draft for {} ({} chars, style guide: {})",
        request.doc_type,
        request.audience,
        content.len(),
        style_guide_applied
    );

    Ok(Draft {
        doc_type: request.doc_type,
        audience: request.audience,
        content,
        style_guide_applied,
        backend: writer.backend(),
    })
}
