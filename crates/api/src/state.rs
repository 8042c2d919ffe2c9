use std::sync::Arc;

use lumen_core::store::Backend;

use crate::config::ServerConfig;
use crate::sessions::EditorSessions;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Hosted backend accessors, scoped per caller on demand.
    pub backend: Arc<dyn Backend>,
    /// Open playlist editing sessions.
    pub sessions: Arc<EditorSessions>,
}
