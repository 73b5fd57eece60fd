//! Axum route handlers for the document library.
//!
//! Store calls are blocking filesystem I/O and run on the blocking pool.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::library::store::{LibraryDocument, LibraryStore, SaveRequest};
use crate::state::AppState;

async fn with_store<T, F>(store: LibraryStore, f: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&LibraryStore) -> Result<T, AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("library task failed: {e}")))?
}

/// GET /api/v1/library
pub async fn handle_list(State(state): State<AppState>) -> Result<Json<Vec<LibraryDocument>>, AppError> {
    with_store(state.library.clone(), |store| store.list())
        .await
        .map(Json)
}

/// POST /api/v1/library
pub async fn handle_save(
    State(state): State<AppState>,
    Json(req): Json<SaveRequest>,
) -> Result<(StatusCode, Json<LibraryDocument>), AppError> {
    if req.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }
    let document = with_store(state.library.clone(), move |store| store.save(req)).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/v1/library/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LibraryDocument>, AppError> {
    with_store(state.library.clone(), move |store| store.get(id))
        .await
        .map(Json)
}

/// DELETE /api/v1/library/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    with_store(state.library.clone(), move |store| store.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
