//! Handlers for the media library.

use axum::extract::{Multipart, Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use lumen_core::media::MediaAsset;
use lumen_core::types::RecordId;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::read_files;

/// Outcome of one file in a batch upload.
#[derive(Debug, Serialize)]
pub struct UploadOutcome {
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<MediaAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteMediaParams {
    /// Public URL of the blob, used to locate it in the object store.
    pub url: String,
}

/// GET /api/v1/media
///
/// List the whole library, newest first.
pub async fn list_media(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let media = state.backend.media(&user.ctx).list().await?;
    Ok(Json(DataResponse { data: media }))
}

/// POST /api/v1/media
///
/// Upload one or more files (multipart). Each file is uploaded on its own;
/// a failure is reported for that file and the rest carry on.
pub async fn upload_media(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let files = read_files(&mut multipart).await?;
    if files.is_empty() {
        return Err(AppError::BadRequest("No files in upload".into()));
    }

    let catalog = state.backend.media(&user.ctx);
    let mut outcomes = Vec::with_capacity(files.len());
    for file in &files {
        let outcome = match catalog.upload(user.user_id, file).await {
            Ok(asset) => UploadOutcome {
                file_name: file.name.clone(),
                asset: Some(asset),
                error: None,
            },
            Err(e) => {
                tracing::warn!(file = %file.name, error = %e, "Upload failed");
                UploadOutcome {
                    file_name: file.name.clone(),
                    asset: None,
                    error: Some(e.to_string()),
                }
            }
        };
        outcomes.push(outcome);
    }

    let uploaded = outcomes.iter().filter(|o| o.asset.is_some()).count();
    tracing::info!(
        user_id = %user.user_id,
        uploaded,
        failed = outcomes.len() - uploaded,
        "Media batch processed",
    );

    Ok(Json(DataResponse { data: outcomes }))
}

/// DELETE /api/v1/media/{id}?url=...
pub async fn delete_media(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Query(params): Query<DeleteMediaParams>,
) -> AppResult<impl IntoResponse> {
    state.backend.media(&user.ctx).delete(id, &params.url).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
