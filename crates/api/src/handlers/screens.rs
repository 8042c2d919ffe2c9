//! Handlers for paired screens.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lumen_core::types::RecordId;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAuth, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct PairScreenRequest {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[validate(length(min = 4, max = 16))]
    pub pairing_code: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignPlaylistRequest {
    /// `null` clears the assignment.
    pub playlist_id: Option<RecordId>,
}

/// GET /api/v1/screens
///
/// Every visible screen with its playlist name, newest first.
pub async fn list_screens(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let screens = state.backend.screens(&user.ctx).list().await?;
    Ok(Json(DataResponse { data: screens }))
}

/// POST /api/v1/screens/pair
///
/// Register a screen by name and pairing code. It starts offline.
pub async fn pair_screen(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<PairScreenRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let screen = state
        .backend
        .screens(&user.ctx)
        .pair(&input.name, &input.pairing_code, user.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: screen })))
}

/// PUT /api/v1/screens/{id}/playlist
///
/// The playlist is not checked for existence.
pub async fn assign_playlist(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(screen_id): Path<RecordId>,
    Json(input): Json<AssignPlaylistRequest>,
) -> AppResult<impl IntoResponse> {
    state
        .backend
        .screens(&user.ctx)
        .assign_playlist(screen_id, input.playlist_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/screens/{id}
pub async fn delete_screen(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(screen_id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    state.backend.screens(&user.ctx).delete(screen_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/my/screens
///
/// Screens assigned to the caller.
pub async fn my_screens(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let screens = state
        .backend
        .screens(&user.ctx)
        .list_assigned_to(user.user_id)
        .await?;
    Ok(Json(DataResponse { data: screens }))
}
