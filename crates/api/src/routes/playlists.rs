//! Route definitions for playlists, mounted under `/playlists`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{editor, playlists};
use crate::state::AppState;

/// ```text
/// GET    /              -> list_playlists
/// POST   /              -> create_playlist
/// GET    /{id}          -> get_playlist
/// DELETE /{id}          -> delete_playlist
/// POST   /{id}/editor   -> open_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(playlists::list_playlists).post(playlists::create_playlist),
        )
        .route(
            "/{id}",
            get(playlists::get_playlist).delete(playlists::delete_playlist),
        )
        .route("/{id}/editor", post(editor::open_session))
}
