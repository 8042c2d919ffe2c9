//! In-memory registry of playlist editing sessions.
//!
//! A session is opened by one user and only that user may touch it. The
//! editor sits behind an async mutex so mutations apply in call order and a
//! save in flight holds off the next one.
//!
//! Sessions that nobody touches for a while are dropped by
//! [`EditorSessions::evict_idle`], which the background sweeper calls.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError};
use std::time::{Duration, Instant};

use lumen_core::editor::PlaylistEditor;
use lumen_core::error::CoreError;
use lumen_core::types::{RecordId, Timestamp};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// One open editing session.
#[derive(Debug)]
pub struct EditorSession {
    pub id: Uuid,
    /// User who opened the session.
    pub owner_id: RecordId,
    pub opened_at: Timestamp,
    /// Last time the owner reached the session.
    last_used: std::sync::Mutex<Instant>,
    pub editor: Mutex<PlaylistEditor>,
}

impl EditorSession {
    fn touch(&self) {
        *self.last_used.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    /// How long the session had been unused at `now`.
    fn idle_for(&self, now: Instant) -> Duration {
        let last_used = *self.last_used.lock().unwrap_or_else(PoisonError::into_inner);
        now.saturating_duration_since(last_used)
    }
}

/// Manages all open editing sessions.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
#[derive(Debug)]
pub struct EditorSessions {
    sessions: RwLock<HashMap<Uuid, Arc<EditorSession>>>,
}

impl EditorSessions {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new session for `owner_id` and return it.
    pub async fn open(&self, owner_id: RecordId, editor: PlaylistEditor) -> Arc<EditorSession> {
        let session = Arc::new(EditorSession {
            id: Uuid::new_v4(),
            owner_id,
            opened_at: chrono::Utc::now(),
            last_used: std::sync::Mutex::new(Instant::now()),
            editor: Mutex::new(editor),
        });
        self.sessions
            .write()
            .await
            .insert(session.id, Arc::clone(&session));
        session
    }

    /// Look up a session on behalf of `user_id`. A successful lookup counts
    /// as use and resets the idle clock.
    pub async fn get(&self, id: Uuid, user_id: RecordId) -> Result<Arc<EditorSession>, CoreError> {
        let session = self
            .sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "EditorSession",
                id,
            })?;

        if session.owner_id != user_id {
            return Err(CoreError::Forbidden(
                "Editing session belongs to another user".into(),
            ));
        }
        session.touch();
        Ok(session)
    }

    /// Close a session. Unsaved changes are discarded.
    pub async fn close(&self, id: Uuid, user_id: RecordId) -> Result<(), CoreError> {
        self.get(id, user_id).await?;
        self.sessions.write().await.remove(&id);
        Ok(())
    }

    /// Drop every session unused for at least `max_idle`. Unsaved changes
    /// are discarded. Returns the ids of the evicted sessions.
    pub async fn evict_idle(&self, max_idle: Duration) -> Vec<Uuid> {
        self.evict_idle_at(Instant::now(), max_idle).await
    }

    /// [`evict_idle`](Self::evict_idle) measured at `now`.
    pub async fn evict_idle_at(&self, now: Instant, max_idle: Duration) -> Vec<Uuid> {
        let mut sessions = self.sessions.write().await;
        let expired: Vec<Uuid> = sessions
            .values()
            .filter(|session| session.idle_for(now) >= max_idle)
            .map(|session| session.id)
            .collect();

        for id in &expired {
            if let Some(session) = sessions.remove(id) {
                tracing::info!(
                    session_id = %id,
                    owner_id = %session.owner_id,
                    opened_at = %session.opened_at,
                    "Evicted idle editing session",
                );
            }
        }
        expired
    }

    /// Return the current number of open sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for EditorSessions {
    fn default() -> Self {
        Self::new()
    }
}
