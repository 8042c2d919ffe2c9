//! Handlers for playlist records.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lumen_core::types::RecordId;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlaylistRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
}

/// GET /api/v1/playlists
pub async fn list_playlists(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let playlists = state.backend.playlists(&user.ctx).list().await?;
    Ok(Json(DataResponse { data: playlists }))
}

/// POST /api/v1/playlists
///
/// Create an empty playlist owned by the caller.
pub async fn create_playlist(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreatePlaylistRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let playlist = state
        .backend
        .playlists(&user.ctx)
        .create(&input.name, user.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: playlist })))
}

/// GET /api/v1/playlists/{id}
pub async fn get_playlist(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let playlist = state.backend.playlists(&user.ctx).get(id).await?;
    Ok(Json(DataResponse { data: playlist }))
}

/// DELETE /api/v1/playlists/{id}
///
/// Screens still pointing at the playlist keep their (now dangling)
/// reference and show no content.
pub async fn delete_playlist(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    state.backend.playlists(&user.ctx).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
