use chrono::Utc;
use lumen_core::media::MediaKind;
use lumen_core::playlist::{default_duration_secs, Playlist, PlaylistItem, MIN_DURATION_SECS};
use lumen_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};

use super::required;
use crate::error::BackendError;

/// A row from the `playlists` table.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistRow {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    /// JSON array of items. Kept untyped so one bad element cannot sink the
    /// whole playlist.
    pub items: Option<serde_json::Value>,
    pub owner_id: Option<RecordId>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

/// Insert payload for the `playlists` table.
#[derive(Debug, Serialize)]
pub struct NewPlaylistRow<'a> {
    pub name: &'a str,
    pub items: &'a [PlaylistItem],
    pub owner_id: RecordId,
}

/// Update payload replacing a playlist's items.
#[derive(Debug, Serialize)]
pub struct PlaylistItemsUpdate<'a> {
    pub items: &'a [PlaylistItem],
    pub updated_at: Timestamp,
}

/// One element of `items` as it may appear in storage.
#[derive(Debug, Deserialize)]
struct StoredItem {
    id: Option<RecordId>,
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    url: Option<String>,
    duration: Option<f64>,
}

impl TryFrom<StoredItem> for PlaylistItem {
    type Error = BackendError;

    fn try_from(item: StoredItem) -> Result<Self, Self::Error> {
        let kind = required(item.kind, "items", "type")?;
        let kind = MediaKind::from_name(&kind).map_err(|e| BackendError::Decode(e.to_string()))?;

        let duration = match item.duration {
            Some(secs) if secs.is_finite() => {
                secs.round().clamp(f64::from(MIN_DURATION_SECS), f64::from(u32::MAX)) as u32
            }
            _ => default_duration_secs(kind),
        };

        Ok(PlaylistItem {
            id: required(item.id, "items", "id")?,
            name: item.name.unwrap_or_default(),
            kind,
            url: required(item.url, "items", "url")?,
            duration,
        })
    }
}

/// Map the stored `items` value, skipping elements that cannot be used.
fn parse_items(playlist_id: RecordId, value: Option<serde_json::Value>) -> Vec<PlaylistItem> {
    let elements = match value {
        Some(serde_json::Value::Array(elements)) => elements,
        Some(serde_json::Value::Null) | None => return Vec::new(),
        Some(other) => {
            tracing::warn!(%playlist_id, value = %other, "Playlist items is not an array, ignoring");
            return Vec::new();
        }
    };

    elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| {
            let parsed = serde_json::from_value::<StoredItem>(element)
                .map_err(|e| BackendError::Decode(e.to_string()))
                .and_then(PlaylistItem::try_from);
            match parsed {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(%playlist_id, index, error = %e, "Skipping malformed playlist item");
                    None
                }
            }
        })
        .collect()
}

impl TryFrom<PlaylistRow> for Playlist {
    type Error = BackendError;

    fn try_from(row: PlaylistRow) -> Result<Self, Self::Error> {
        let id = required(row.id, "playlists", "id")?;
        Ok(Playlist {
            id,
            name: row.name.unwrap_or_default(),
            items: parse_items(id, row.items),
            owner_id: row.owner_id,
            created_at: row.created_at.unwrap_or_else(Utc::now),
            updated_at: row.updated_at,
        })
    }
}
