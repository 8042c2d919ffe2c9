//! Handlers for playlist editing sessions.
//!
//! Opening a session loads the playlist and a snapshot of the media library
//! into a [`PlaylistEditor`]. Every further call edits that in-memory state;
//! only `save` writes back to the backend.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lumen_core::editor::{EntryId, PlaylistEditor, PlaylistEntry};
use lumen_core::media::MediaAsset;
use lumen_core::types::RecordId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Snapshot of a session returned by most editor endpoints.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub playlist_id: RecordId,
    pub playlist_name: String,
    pub entries: Vec<PlaylistEntry>,
    pub total_duration_secs: u64,
    /// Whether there are unsaved changes.
    pub dirty: bool,
}

impl SessionView {
    fn new(session_id: Uuid, editor: &PlaylistEditor) -> Self {
        Self {
            session_id,
            playlist_id: editor.playlist_id(),
            playlist_name: editor.playlist_name().to_string(),
            entries: editor.entries().to_vec(),
            total_duration_secs: editor.total_duration_secs(),
            dirty: editor.is_dirty(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EntryAdded {
    pub entry_id: EntryId,
    pub session: SessionView,
}

#[derive(Debug, Deserialize)]
pub struct LibraryParams {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub asset_id: RecordId,
}

#[derive(Debug, Deserialize)]
pub struct SetDurationRequest {
    pub seconds: i64,
}

#[derive(Debug, Deserialize)]
pub struct DetectedDurationRequest {
    pub seconds: f64,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub source: EntryId,
    pub target: EntryId,
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/playlists/{id}/editor
///
/// Open an editing session on a playlist.
pub async fn open_session(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(playlist_id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let playlists = state.backend.playlists(&user.ctx);
    let media = state.backend.media(&user.ctx);
    let editor = PlaylistEditor::open(playlist_id, playlists.as_ref(), media.as_ref()).await?;

    let session = state.sessions.open(user.user_id, editor).await;
    let view = SessionView::new(session.id, &*session.editor.lock().await);

    tracing::info!(
        session_id = %session.id,
        %playlist_id,
        user_id = %user.user_id,
        "Editing session opened",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// GET /api/v1/editor/{session}
pub async fn get_session(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id, user.user_id).await?;
    let view = SessionView::new(session.id, &*session.editor.lock().await);
    Ok(Json(DataResponse { data: view }))
}

/// DELETE /api/v1/editor/{session}
///
/// Close the session, discarding unsaved changes.
pub async fn close_session(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    state.sessions.close(session_id, user.user_id).await?;
    tracing::info!(%session_id, "Editing session closed");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

/// GET /api/v1/editor/{session}/library?search=
///
/// Catalog snapshot filtered by title. The search text sticks to the session.
pub async fn get_library(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(params): Query<LibraryParams>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id, user.user_id).await?;
    let mut editor = session.editor.lock().await;
    if let Some(search) = params.search {
        editor.set_search_filter(search);
    }

    let assets: Vec<MediaAsset> = editor.filtered_catalog().into_iter().cloned().collect();
    Ok(Json(DataResponse { data: assets }))
}

/// POST /api/v1/editor/{session}/library/reload
///
/// Refresh the catalog snapshot. The sequence is not touched.
pub async fn reload_library(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id, user.user_id).await?;
    let catalog = state.backend.media(&user.ctx).list().await?;

    let mut editor = session.editor.lock().await;
    editor.reload_catalog(catalog);

    let assets: Vec<MediaAsset> = editor.filtered_catalog().into_iter().cloned().collect();
    Ok(Json(DataResponse { data: assets }))
}

// ---------------------------------------------------------------------------
// Sequence edits
// ---------------------------------------------------------------------------

/// POST /api/v1/editor/{session}/entries
///
/// Append a catalog asset to the end of the sequence.
pub async fn add_entry(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(input): Json<AddEntryRequest>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id, user.user_id).await?;
    let mut editor = session.editor.lock().await;
    let entry_id = editor.add_entry_from_catalog(input.asset_id)?;

    let added = EntryAdded {
        entry_id,
        session: SessionView::new(session.id, &editor),
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data: added })))
}

/// DELETE /api/v1/editor/{session}/entries/{entry}
pub async fn remove_entry(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path((session_id, entry_id)): Path<(Uuid, EntryId)>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id, user.user_id).await?;
    let mut editor = session.editor.lock().await;
    editor.remove_entry(entry_id);
    Ok(Json(DataResponse {
        data: SessionView::new(session.id, &editor),
    }))
}

/// PUT /api/v1/editor/{session}/entries/{entry}/duration
///
/// Set a display duration. Values below one second become one second.
pub async fn set_duration(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path((session_id, entry_id)): Path<(Uuid, EntryId)>,
    Json(input): Json<SetDurationRequest>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id, user.user_id).await?;
    let mut editor = session.editor.lock().await;
    editor.set_duration(entry_id, input.seconds);
    Ok(Json(DataResponse {
        data: SessionView::new(session.id, &editor),
    }))
}

/// POST /api/v1/editor/{session}/entries/{entry}/detected-duration
///
/// Report the playback length the client measured for a video entry.
pub async fn video_duration_detected(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path((session_id, entry_id)): Path<(Uuid, EntryId)>,
    Json(input): Json<DetectedDurationRequest>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id, user.user_id).await?;
    let mut editor = session.editor.lock().await;
    editor.on_video_duration_detected(entry_id, input.seconds);
    Ok(Json(DataResponse {
        data: SessionView::new(session.id, &editor),
    }))
}

/// POST /api/v1/editor/{session}/reorder
///
/// Move `source` to the position currently held by `target`.
pub async fn reorder(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id, user.user_id).await?;
    let mut editor = session.editor.lock().await;
    editor.reorder(input.source, input.target);
    Ok(Json(DataResponse {
        data: SessionView::new(session.id, &editor),
    }))
}

/// POST /api/v1/editor/{session}/save
///
/// Write the whole sequence back to the playlist. On failure the session
/// keeps its changes and stays dirty.
pub async fn save(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id, user.user_id).await?;
    let playlists = state.backend.playlists(&user.ctx);

    let mut editor = session.editor.lock().await;
    editor.save(playlists.as_ref()).await?;

    Ok(Json(DataResponse {
        data: SessionView::new(session.id, &editor),
    }))
}
