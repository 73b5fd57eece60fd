//! Reviewer: scores new text against a built style model and the preferred-term map.
//!
//! Three independent checks:
//! - structure: sentences longer than `average_sentence_length × long_sentence_factor`
//! - tone: sentences matching the passive-voice heuristic
//! - terminology: every word occurrence that is a known variant (→ preferred form)
//!   or, failing that, a term the corpus used fewer than `infrequent_below` times
//!
//! Terminology is scanned over the whole text, not per sentence, and findings are
//! not de-duplicated.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::learning::style_model::StyleModel;
use crate::learning::text;

pub const DEFAULT_LONG_SENTENCE_FACTOR: f64 = 1.5;
pub const DEFAULT_INFREQUENT_BELOW: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewSettings {
    pub long_sentence_factor: f64,
    /// Corpus terms seen fewer times than this are flagged.
    pub infrequent_below: u32,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            long_sentence_factor: DEFAULT_LONG_SENTENCE_FACTOR,
            infrequent_below: DEFAULT_INFREQUENT_BELOW,
        }
    }
}

/// Review findings by category. Always carries all three lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub tone: Vec<String>,
    pub structure: Vec<String>,
    pub terminology: Vec<String>,
}

impl Feedback {
    pub fn total(&self) -> usize {
        self.tone.len() + self.structure.len() + self.terminology.len()
    }
}

/// Reviews `content`. Without a model every category is empty.
pub fn review(
    content: &str,
    model: Option<&StyleModel>,
    preferred_terms: &HashMap<String, String>,
    settings: &ReviewSettings,
) -> Feedback {
    let Some(model) = model else {
        return Feedback::default();
    };

    let mut feedback = Feedback::default();
    let long_threshold = model.average_sentence_length * settings.long_sentence_factor;

    for sentence in text::review_sentences(content) {
        let word_count = text::sentence_word_count(sentence) as f64;
        if word_count > long_threshold {
            feedback
                .structure
                .push(format!("Long sentence: {}", sentence.trim()));
        }
        if text::is_passive(sentence) {
            feedback
                .tone
                .push(format!("Passive voice: {}", sentence.trim()));
        }
    }

    for word in text::words(content) {
        let lower = word.to_lowercase();
        if let Some(preferred) = preferred_terms.get(&lower) {
            feedback
                .terminology
                .push(format!("Use '{preferred}' instead of '{word}'"));
        } else if model
            .frequency(&lower)
            .is_some_and(|count| count < settings.infrequent_below)
        {
            feedback
                .terminology
                .push(format!("Infrequent term: '{word}'"));
        }
    }

    feedback
}
