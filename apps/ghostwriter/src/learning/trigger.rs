//! Trigger policy: when is the corpus large enough to (re)build the style model?
//!
//! Fires when EITHER enough `final` documents exist OR the whole corpus
//! (drafts included) crosses a word-volume threshold. Evaluated after every
//! upload, so a model keeps being rebuilt once the condition holds.

use serde::{Deserialize, Serialize};

use crate::learning::document::Document;

pub const DEFAULT_MIN_FINAL_DOCUMENTS: usize = 5;
pub const DEFAULT_MIN_TOTAL_WORDS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerPolicy {
    pub min_final_documents: usize,
    pub min_total_words: usize,
}

impl Default for TriggerPolicy {
    fn default() -> Self {
        Self {
            min_final_documents: DEFAULT_MIN_FINAL_DOCUMENTS,
            min_total_words: DEFAULT_MIN_TOTAL_WORDS,
        }
    }
}

/// Corpus counters the policy decides on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorpusTally {
    pub total_documents: usize,
    pub final_documents: usize,
    pub total_words: usize,
}

impl CorpusTally {
    pub fn of(documents: &[Document]) -> Self {
        documents.iter().fold(Self::default(), |mut tally, doc| {
            tally.total_documents += 1;
            if doc.is_final() {
                tally.final_documents += 1;
            }
            tally.total_words += doc.word_count();
            tally
        })
    }
}

impl TriggerPolicy {
    pub fn should_build(&self, tally: &CorpusTally) -> bool {
        tally.final_documents >= self.min_final_documents
            || tally.total_words >= self.min_total_words
    }
}
