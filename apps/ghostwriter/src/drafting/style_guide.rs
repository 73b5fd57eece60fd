//! The active style guide: one text file on disk, mirrored in memory.
//!
//! Loaded once at startup. Replacing it writes the file best-effort and keeps
//! the in-memory copy even if the write fails.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct StyleGuide {
    pub text: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct StyleGuideStore {
    path: PathBuf,
    current: Option<StyleGuide>,
}

impl StyleGuideStore {
    /// Opens the store, reading an existing guide if the file is present.
    pub async fn open(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let current = load(&path).await?;
        if let Some(guide) = &current {
            info!(
                "Loaded style guide from {} ({} chars)",
                path.display(),
                guide.text.len()
            );
        }
        Ok(Self { path, current })
    }

    pub fn current(&self) -> Option<&StyleGuide> {
        self.current.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|g| g.text.as_str())
    }

    /// Replaces the guide. Returns the new guide and whether it reached disk.
    pub async fn replace(&mut self, text: String) -> (StyleGuide, bool) {
        let persisted = match tokio::fs::write(&self.path, &text).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Could not persist style guide to {}: {e}", self.path.display());
                false
            }
        };
        let guide = StyleGuide {
            text,
            uploaded_at: Utc::now(),
        };
        self.current = Some(guide.clone());
        (guide, persisted)
    }
}

async fn load(path: &Path) -> std::io::Result<Option<StyleGuide>> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    let uploaded_at = tokio::fs::metadata(path)
        .await?
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());
    Ok(Some(StyleGuide { text, uploaded_at }))
}
