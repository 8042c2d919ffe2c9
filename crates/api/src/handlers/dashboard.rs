//! Dashboard statistics handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use lumen_core::dashboard::{admin_dashboard, client_dashboard};

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAuth, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard
///
/// Screen, storage and playlist totals for the content management area.
pub async fn get_dashboard(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let screens = state.backend.screens(&user.ctx);
    let media = state.backend.media(&user.ctx);
    let playlists = state.backend.playlists(&user.ctx);

    let (screens, media, playlists) =
        tokio::try_join!(screens.list(), media.list(), playlists.list())?;

    let dashboard = admin_dashboard(
        screens,
        media.iter().map(|asset| asset.size_bytes),
        playlists.len(),
    );
    Ok(Json(DataResponse { data: dashboard }))
}

/// GET /api/v1/my/dashboard
///
/// Online/total counts over the caller's own screens.
pub async fn my_dashboard(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let screens = state
        .backend
        .screens(&user.ctx)
        .list_assigned_to(user.user_id)
        .await?;
    Ok(Json(DataResponse {
        data: client_dashboard(&screens),
    }))
}
