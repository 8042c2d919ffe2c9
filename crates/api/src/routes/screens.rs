//! Route definitions for screens, mounted under `/screens`.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::screens;
use crate::state::AppState;

/// ```text
/// GET    /               -> list_screens
/// POST   /pair           -> pair_screen
/// PUT    /{id}/playlist  -> assign_playlist
/// DELETE /{id}           -> delete_screen
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(screens::list_screens))
        .route("/pair", post(screens::pair_screen))
        .route("/{id}/playlist", put(screens::assign_playlist))
        .route("/{id}", delete(screens::delete_screen))
}
