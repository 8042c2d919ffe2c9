//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lumen_core::error::CoreError;
use lumen_core::profile::UserContext;
use lumen_core::roles::Role;
use lumen_core::types::RecordId;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller, resolved from the `Authorization: Bearer` header by
/// the backend's identity service.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: RecordId,
    pub role: Role,
    /// Full caller context, handed to backend accessors.
    pub ctx: UserContext,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let ctx = state.backend.identity().resolve(token).await?;

        Ok(AuthUser {
            user_id: ctx.user_id,
            role: ctx.role,
            ctx,
        })
    }
}
