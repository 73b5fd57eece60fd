//! Style model builder: aggregate statistics over the `final` documents of a corpus.
//!
//! `build_style_model` is a pure function of the corpus snapshot: the same
//! documents always yield the same frequencies, average and exemplars. There
//! is no incremental update path; the workspace swaps in a whole new model.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::learning::document::Document;
use crate::learning::text;

#[derive(Debug, Clone, Serialize)]
pub struct StyleModel {
    /// Lowercase word → occurrences across every chunk of every final document.
    pub term_frequencies: HashMap<String, u32>,
    /// Mean `\w+` tokens per build-time sentence. 0.0 when there are none.
    pub average_sentence_length: f64,
    /// Chunks that matched the passive-voice heuristic, verbatim.
    pub passive_voice_exemplars: Vec<String>,
    pub source_documents: usize,
    pub built_at: DateTime<Utc>,
}

impl StyleModel {
    pub fn frequency(&self, term: &str) -> Option<u32> {
        self.term_frequencies.get(term).copied()
    }

    pub fn summary(&self) -> StyleModelSummary {
        StyleModelSummary {
            distinct_terms: self.term_frequencies.len(),
            average_sentence_length: self.average_sentence_length,
            passive_voice_exemplars: self.passive_voice_exemplars.len(),
            source_documents: self.source_documents,
            built_at: self.built_at,
        }
    }
}

/// Compact view of a model for status reporting.
#[derive(Debug, Clone, Serialize)]
pub struct StyleModelSummary {
    pub distinct_terms: usize,
    pub average_sentence_length: f64,
    pub passive_voice_exemplars: usize,
    pub source_documents: usize,
    pub built_at: DateTime<Utc>,
}

/// Builds a model from every `final` document in `documents`.
///
/// Always succeeds. A corpus without final documents produces a degenerate
/// model: no terms, zero average length, no exemplars.
pub fn build_style_model(documents: &[Document]) -> StyleModel {
    let finals: Vec<&Document> = documents.iter().filter(|d| d.is_final()).collect();
    let chunks: Vec<&str> = finals
        .iter()
        .flat_map(|d| d.chunks().iter().map(String::as_str))
        .collect();

    StyleModel {
        term_frequencies: term_frequencies(&chunks),
        average_sentence_length: average_sentence_length(&chunks),
        passive_voice_exemplars: passive_voice_scan(&chunks),
        source_documents: finals.len(),
        built_at: Utc::now(),
    }
}

fn term_frequencies(chunks: &[&str]) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for chunk in chunks {
        for word in text::words(chunk) {
            *counts.entry(word.to_lowercase()).or_insert(0) += 1;
        }
    }
    counts
}

fn average_sentence_length(chunks: &[&str]) -> f64 {
    let lengths: Vec<usize> = chunks
        .iter()
        .flat_map(|chunk| text::chunk_sentences(chunk))
        .map(text::sentence_word_count)
        .collect();

    if lengths.is_empty() {
        return 0.0;
    }
    lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
}

fn passive_voice_scan(chunks: &[&str]) -> Vec<String> {
    chunks
        .iter()
        .filter(|chunk| text::is_passive(chunk))
        .map(|chunk| chunk.to_string())
        .collect()
}
