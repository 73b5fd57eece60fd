use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Only `Final` documents feed the style model. Drafts still count toward the
/// word-volume trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Final,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Final => "final",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown document status '{0}' (expected draft or final)")]
pub struct UnknownStatus(pub String);

impl FromStr for DocumentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(DocumentStatus::Draft),
            "final" => Ok(DocumentStatus::Final),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// An ingested reference document. Every field is fixed at construction.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    id: Uuid,
    filename: String,
    status: DocumentStatus,
    content: String,
    word_count: usize,
    chunks: Vec<String>,
    uploaded_at: DateTime<Utc>,
}

impl Document {
    pub fn new(content: impl Into<String>, filename: impl Into<String>, status: DocumentStatus) -> Self {
        let content = content.into();
        let word_count = content.split_whitespace().count();
        let chunks = chunk_paragraphs(&content);
        Self {
            id: Uuid::new_v4(),
            filename: filename.into(),
            status,
            content,
            word_count,
            chunks,
            uploaded_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn is_final(&self) -> bool {
        self.status == DocumentStatus::Final
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Non-empty, trimmed paragraphs in source order.
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id,
            filename: self.filename.clone(),
            status: self.status,
            word_count: self.word_count,
            chunk_count: self.chunks.len(),
            uploaded_at: self.uploaded_at,
        }
    }
}

/// Listing view of a document, without its content.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub filename: String,
    pub status: DocumentStatus,
    pub word_count: usize,
    pub chunk_count: usize,
    pub uploaded_at: DateTime<Utc>,
}

fn chunk_paragraphs(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}
