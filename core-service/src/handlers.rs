//! HTTP handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use bridge_traits::storage::{FileMetadata, StorageProvider};
use tracing::instrument;

use crate::error::Result;
use crate::session::Session;

/// `GET /{provider}/metadata/{id}`
///
/// Looks up one file with the caller's provider session and returns the
/// metadata unchanged. Provider failures are translated by
/// [`crate::error::respond_with_error`].
#[instrument(skip(provider, session))]
pub async fn get_file_metadata(
    State(provider): State<Arc<dyn StorageProvider>>,
    Path(id): Path<String>,
    Session(session): Session,
) -> Result<Json<FileMetadata>> {
    let metadata = provider.get_file_metadata(&session, &id).await?;
    Ok(Json(metadata))
}

/// `GET /healthz`
pub async fn healthz() -> &'static str {
    "ok"
}
