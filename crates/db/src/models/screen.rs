use chrono::Utc;
use lumen_core::screen::{Screen, ScreenStatus};
use lumen_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};

use super::required;
use crate::error::BackendError;

/// A row from the `screens` table, optionally with its playlist embedded
/// (`select=*,playlists(name)`).
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenRow {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub pairing_code: Option<String>,
    pub status: Option<String>,
    pub playlist_id: Option<RecordId>,
    pub assigned_to: Option<RecordId>,
    pub last_seen: Option<Timestamp>,
    pub created_at: Option<Timestamp>,
    /// Null when no playlist is assigned or the assigned one was deleted.
    pub playlists: Option<EmbeddedPlaylist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddedPlaylist {
    pub name: Option<String>,
}

/// Insert payload for pairing a screen.
#[derive(Debug, Serialize)]
pub struct NewScreenRow<'a> {
    pub name: &'a str,
    pub pairing_code: &'a str,
    pub status: ScreenStatus,
    pub assigned_to: RecordId,
}

/// Update payload pointing a screen at a playlist (or at nothing).
#[derive(Debug, Serialize)]
pub struct ScreenPlaylistUpdate {
    pub playlist_id: Option<RecordId>,
}

impl TryFrom<ScreenRow> for Screen {
    type Error = BackendError;

    fn try_from(row: ScreenRow) -> Result<Self, Self::Error> {
        let status = match row.status.as_deref() {
            None => ScreenStatus::Offline,
            Some(name) => {
                ScreenStatus::from_name(name).map_err(|e| BackendError::Decode(e.to_string()))?
            }
        };

        Ok(Screen {
            id: required(row.id, "screens", "id")?,
            name: row.name.unwrap_or_default(),
            pairing_code: row.pairing_code,
            status,
            playlist_id: row.playlist_id,
            playlist_name: row.playlists.and_then(|p| p.name),
            assigned_to: row.assigned_to,
            last_seen: row.last_seen,
            created_at: row.created_at.unwrap_or_else(Utc::now),
        })
    }
}
