//! Route definitions for editing sessions, mounted under `/editor`.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::editor;
use crate::state::AppState;

/// ```text
/// GET    /{session}                                   -> get_session
/// DELETE /{session}                                   -> close_session
/// GET    /{session}/library?search=                   -> get_library
/// POST   /{session}/library/reload                    -> reload_library
/// POST   /{session}/entries                           -> add_entry
/// DELETE /{session}/entries/{entry}                   -> remove_entry
/// PUT    /{session}/entries/{entry}/duration          -> set_duration
/// POST   /{session}/entries/{entry}/detected-duration -> video_duration_detected
/// POST   /{session}/reorder                           -> reorder
/// POST   /{session}/save                              -> save
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{session}",
            get(editor::get_session).delete(editor::close_session),
        )
        .route("/{session}/library", get(editor::get_library))
        .route("/{session}/library/reload", post(editor::reload_library))
        .route("/{session}/entries", post(editor::add_entry))
        .route("/{session}/entries/{entry}", delete(editor::remove_entry))
        .route(
            "/{session}/entries/{entry}/duration",
            put(editor::set_duration),
        )
        .route(
            "/{session}/entries/{entry}/detected-duration",
            post(editor::video_duration_detected),
        )
        .route("/{session}/reorder", post(editor::reorder))
        .route("/{session}/save", post(editor::save))
}
