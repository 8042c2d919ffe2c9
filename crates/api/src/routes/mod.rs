pub mod editor;
pub mod health;
pub mod media;
pub mod my;
pub mod playlists;
pub mod profile;
pub mod screens;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /me                                         caller identity (any role)
///
/// /dashboard                                  admin/editor statistics
/// /clients                                    client profiles (admin only)
///
/// /media                                      list, upload (multipart)
/// /media/{id}?url=                            delete
///
/// /playlists                                  list, create
/// /playlists/{id}                             get, delete
/// /playlists/{id}/editor                      open editing session (POST)
///
/// /editor/{session}                           view, close
/// /editor/{session}/library?search=           filtered catalog snapshot
/// /editor/{session}/library/reload            refresh catalog (POST)
/// /editor/{session}/entries                   add entry (POST)
/// /editor/{session}/entries/{entry}           remove entry (DELETE)
/// /editor/{session}/entries/{entry}/duration  set duration (PUT)
/// /editor/{session}/entries/{entry}/detected-duration
///                                             report video length (POST)
/// /editor/{session}/reorder                   move entry (POST)
/// /editor/{session}/save                      persist sequence (POST)
///
/// /screens                                    list
/// /screens/pair                               pair (POST)
/// /screens/{id}/playlist                      assign playlist (PUT)
/// /screens/{id}                               delete
///
/// /my/screens                                 caller's screens (any role)
/// /my/dashboard                               caller's counts (any role)
///
/// /profile                                    get, update username
/// /profile/avatar                             upload avatar (POST)
/// /profile/password                           change password (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::account::me))
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/clients", get(handlers::clients::list_clients))
        .nest("/media", media::router())
        .nest("/playlists", playlists::router())
        .nest("/editor", editor::router())
        .nest("/screens", screens::router())
        .nest("/my", my::router())
        .nest("/profile", profile::router())
}
