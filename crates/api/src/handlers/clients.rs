use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/clients
///
/// Profiles with the `client` role. Admin only.
pub async fn list_clients(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let clients = state.backend.profiles(&admin.ctx).list_clients().await?;
    Ok(Json(DataResponse { data: clients }))
}
