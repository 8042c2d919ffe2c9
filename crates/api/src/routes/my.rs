//! Client area routes, mounted under `/my`. Any authenticated role.

use axum::routing::get;
use axum::Router;

use crate::handlers::{dashboard, screens};
use crate::state::AppState;

/// ```text
/// GET /screens    -> my_screens
/// GET /dashboard  -> my_dashboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/screens", get(screens::my_screens))
        .route("/dashboard", get(dashboard::my_dashboard))
}
