//! Route definitions for the caller's profile, mounted under `/profile`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// ```text
/// GET  /          -> get_profile
/// PUT  /          -> update_profile
/// POST /avatar    -> upload_avatar (multipart)
/// PUT  /password  -> change_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(account::get_profile).put(account::update_profile))
        .route("/avatar", post(account::upload_avatar))
        .route("/password", put(account::change_password))
}
