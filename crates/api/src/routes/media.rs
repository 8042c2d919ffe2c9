//! Route definitions for the media library, mounted under `/media`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// ```text
/// GET    /              -> list_media
/// POST   /              -> upload_media (multipart, per-file results)
/// DELETE /{id}?url=     -> delete_media
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(media::list_media).post(media::upload_media))
        .route("/{id}", delete(media::delete_media))
}
