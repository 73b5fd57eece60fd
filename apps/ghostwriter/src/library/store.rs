//! Document library: saved drafts as one pretty-printed JSON file each.
//!
//! Layout: `<docs_dir>/<uuid>.json`. Files of 100 bytes or less and files that
//! fail to parse are skipped when listing. Writes go through a temp file in the
//! same directory and are persisted with a rename.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{info, warn};
use uuid::Uuid;

use crate::drafting::models::{Audience, DocumentType};
use crate::errors::AppError;

const MIN_LISTED_FILE_BYTES: u64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryDocument {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub audience: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveRequest {
    /// Defaults to "<type> – <YYYY-MM-DD HH:MM>".
    pub name: Option<String>,
    #[serde(default)]
    pub doc_type: DocumentType,
    #[serde(default)]
    pub audience: Audience,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LibraryStore {
    dir: PathBuf,
}

impl LibraryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save(&self, request: SaveRequest) -> Result<LibraryDocument, AppError> {
        fs::create_dir_all(&self.dir)?;

        let now = Local::now();
        let id = Uuid::new_v4();
        let name = request
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| {
                format!("{} – {}", request.doc_type, now.format("%Y-%m-%d %H:%M"))
            });

        let document = LibraryDocument {
            id: id.to_string(),
            name,
            doc_type: request.doc_type.display_name().to_string(),
            audience: request.audience.display_name().to_string(),
            date: now.format("%Y-%m-%d").to_string(),
            content: request.content,
            tags: request.tags,
            filename: format!("{id}.md"),
        };

        let json = serde_json::to_string_pretty(&document).map_err(anyhow::Error::from)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(self.path_for(id)).map_err(|e| e.error)?;

        info!("Saved '{}' to document library as {}", document.name, id);
        Ok(document)
    }

    /// All readable documents, newest `date` first.
    pub fn list(&self) -> Result<Vec<LibraryDocument>, AppError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut documents = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let len = entry.metadata().map(|m| m.len()).unwrap_or(0);
            if len <= MIN_LISTED_FILE_BYTES {
                continue;
            }
            match read_document(&path) {
                Ok(doc) => documents.push(doc),
                Err(e) => warn!("Skipping '{}': file is invalid or corrupt ({e})", path.display()),
            }
        }

        documents.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(documents)
    }

    pub fn get(&self, id: Uuid) -> Result<LibraryDocument, AppError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(AppError::NotFound(format!("Library document {id} not found")));
        }
        read_document(&path)
    }

    pub fn delete(&self, id: Uuid) -> Result<(), AppError> {
        match fs::remove_file(self.path_for(id)) {
            Ok(()) => {
                info!("Deleted library document {id}");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound(
                format!("Library document {id} not found"),
            )),
            Err(e) => Err(e.into()),
        }
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

fn read_document(path: &Path) -> Result<LibraryDocument, AppError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("{}: {e}", path.display())))
}
