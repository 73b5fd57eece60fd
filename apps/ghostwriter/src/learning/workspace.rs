use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::learning::document::{Document, DocumentStatus};
use crate::learning::reviewer::{review, Feedback, ReviewSettings};
use crate::learning::style_model::{build_style_model, StyleModel, StyleModelSummary};
use crate::learning::trigger::{CorpusTally, TriggerPolicy};

/// Result of a single ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub document_id: Uuid,
    pub word_count: usize,
    pub chunk_count: usize,
    /// True when this upload caused the style model to be (re)built.
    pub model_rebuilt: bool,
    pub model_ready: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceStatus {
    #[serde(flatten)]
    pub tally: CorpusTally,
    pub preferred_terms: usize,
    pub model_ready: bool,
    pub model: Option<StyleModelSummary>,
    pub trigger: TriggerPolicy,
}

/// Owns the corpus, the preferred-term map and the current style model.
///
/// The corpus is append-only. The model is replaced whole on every rebuild,
/// never edited in place, so a caller holding an `Arc<StyleModel>` always sees
/// a consistent snapshot. Once built, a model is never removed.
#[derive(Debug, Default)]
pub struct Workspace {
    documents: Vec<Document>,
    preferred_terms: HashMap<String, String>,
    style_model: Option<Arc<StyleModel>>,
    trigger: TriggerPolicy,
    review_settings: ReviewSettings,
}

impl Workspace {
    pub fn new(trigger: TriggerPolicy, review_settings: ReviewSettings) -> Self {
        Self {
            trigger,
            review_settings,
            ..Self::default()
        }
    }

    /// Ingests a document, then re-evaluates the trigger and rebuilds the model
    /// from the full corpus if it fires.
    pub fn upload_document(
        &mut self,
        content: impl Into<String>,
        filename: impl Into<String>,
        status: DocumentStatus,
    ) -> UploadOutcome {
        let document = Document::new(content, filename, status);
        let document_id = document.id();
        let word_count = document.word_count();
        let chunk_count = document.chunks().len();
        info!(
            "Ingested '{}' as {} ({} words, {} chunks)",
            document.filename(),
            status,
            word_count,
            chunk_count
        );
        self.documents.push(document);

        let model_rebuilt = self.check_model_trigger();

        UploadOutcome {
            document_id,
            word_count,
            chunk_count,
            model_rebuilt,
            model_ready: self.model_ready(),
        }
    }

    pub fn mark_preferred_term(&mut self, variant: &str, preferred: &str) {
        let variant = variant.to_lowercase();
        let preferred = preferred.to_lowercase();
        debug!("Preferred term: '{variant}' → '{preferred}'");
        self.preferred_terms.insert(variant, preferred);
    }

    pub fn review_document(&self, content: &str) -> Feedback {
        let feedback = review(
            content,
            self.style_model.as_deref(),
            &self.preferred_terms,
            &self.review_settings,
        );
        debug!(
            "Review: {} findings (tone={}, structure={}, terminology={})",
            feedback.total(),
            feedback.tone.len(),
            feedback.structure.len(),
            feedback.terminology.len()
        );
        feedback
    }

    pub fn model_ready(&self) -> bool {
        self.style_model.is_some()
    }

    pub fn style_model(&self) -> Option<Arc<StyleModel>> {
        self.style_model.clone()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, id: Uuid) -> Option<&Document> {
        self.documents.iter().find(|d| d.id() == id)
    }

    pub fn preferred_terms(&self) -> &HashMap<String, String> {
        &self.preferred_terms
    }

    pub fn status(&self) -> WorkspaceStatus {
        WorkspaceStatus {
            tally: CorpusTally::of(&self.documents),
            preferred_terms: self.preferred_terms.len(),
            model_ready: self.model_ready(),
            model: self.style_model().map(|m| m.summary()),
            trigger: self.trigger,
        }
    }

    fn check_model_trigger(&mut self) -> bool {
        let tally = CorpusTally::of(&self.documents);
        if !self.trigger.should_build(&tally) {
            return false;
        }

        let model = build_style_model(&self.documents);
        info!(
            "Style model rebuilt from {} final documents ({} terms, avg sentence {:.2} words)",
            model.source_documents,
            model.term_frequencies.len(),
            model.average_sentence_length
        );
        self.style_model = Some(Arc::new(model));
        true
    }
}
