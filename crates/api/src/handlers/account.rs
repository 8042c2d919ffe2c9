//! Handlers for the caller's own account: identity, profile and password.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lumen_core::profile::Profile;
use lumen_core::roles::Role;
use lumen_core::types::RecordId;
use lumen_core::validation::validate_password_change;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::read_single_file;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: RecordId,
    pub email: Option<String>,
    pub role: Role,
    pub profile: Option<Profile>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
    pub confirm_password: String,
}

/// GET /api/v1/me
///
/// Who the caller is, as resolved from their token.
pub async fn me(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let profile = state.backend.profiles(&user.ctx).get(user.user_id).await?;
    Ok(Json(DataResponse {
        data: MeResponse {
            user_id: user.user_id,
            email: user.ctx.email.clone(),
            role: user.role,
            profile,
        },
    }))
}

/// GET /api/v1/profile
pub async fn get_profile(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let profile = state
        .backend
        .profiles(&user.ctx)
        .get(user.user_id)
        .await?
        .unwrap_or(Profile {
            id: user.user_id,
            username: None,
            avatar_url: None,
            role: user.role,
        });
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/profile
pub async fn update_profile(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let profile = state
        .backend
        .profiles(&user.ctx)
        .update_username(user.user_id, &input.username)
        .await?;
    Ok(Json(DataResponse { data: profile }))
}

/// POST /api/v1/profile/avatar
///
/// Replace the caller's avatar with an uploaded image (multipart).
pub async fn upload_avatar(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let file = read_single_file(&mut multipart).await?;
    let profile = state
        .backend
        .profiles(&user.ctx)
        .upload_avatar(user.user_id, &file)
        .await?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/profile/password
pub async fn change_password(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<impl IntoResponse> {
    validate_password_change(&input.password, &input.confirm_password)?;
    state
        .backend
        .identity()
        .update_password(&user.ctx, &input.password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
