use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::Config;
use crate::drafting::generator::DraftWriter;
use crate::drafting::style_guide::StyleGuideStore;
use crate::errors::AppError;
use crate::learning::Workspace;
use crate::library::LibraryStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// One workspace per process. Uploads and term edits take the write lock,
    /// reviews and status reads take the read lock. Never held across `.await`.
    pub workspace: Arc<RwLock<Workspace>>,
    pub style_guide: Arc<tokio::sync::RwLock<StyleGuideStore>>,
    pub library: LibraryStore,
    /// Pluggable draft writer. `None` when OPENAI_API_KEY is not set.
    pub drafter: Option<Arc<dyn DraftWriter>>,
    pub config: Config,
}

impl AppState {
    pub fn read_workspace(&self) -> Result<RwLockReadGuard<'_, Workspace>, AppError> {
        self.workspace
            .read()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("workspace lock poisoned")))
    }

    pub fn write_workspace(&self) -> Result<RwLockWriteGuard<'_, Workspace>, AppError> {
        self.workspace
            .write()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("workspace lock poisoned")))
    }
}
