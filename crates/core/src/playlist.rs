//! Playlists and the persisted shape of their items.

use serde::{Deserialize, Serialize};

use crate::media::MediaKind;
use crate::types::{RecordId, Timestamp};

/// Display duration given to a newly added video until its real length is
/// detected. Doubles as the "untouched" sentinel for auto-detection.
pub const DEFAULT_VIDEO_DURATION_SECS: u32 = 10;

/// Display duration given to a newly added image.
pub const DEFAULT_IMAGE_DURATION_SECS: u32 = 15;

/// No entry may be displayed for less than this.
pub const MIN_DURATION_SECS: u32 = 1;

/// Default display duration for media of the given kind.
pub fn default_duration_secs(kind: MediaKind) -> u32 {
    match kind {
        MediaKind::Video => DEFAULT_VIDEO_DURATION_SECS,
        MediaKind::Image => DEFAULT_IMAGE_DURATION_SECS,
    }
}

/// One element of a playlist's persisted `items` array.
///
/// Array index is playback order. Field names match the stored JSON exactly:
/// `{id, name, type, url, duration}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// Source media asset.
    pub id: RecordId,
    /// Display title copied from the asset when the item was added.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    /// Whole seconds, always >= 1.
    pub duration: u32,
}

/// A named, owned, ordered sequence of media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: RecordId,
    pub name: String,
    pub items: Vec<PlaylistItem>,
    pub owner_id: Option<RecordId>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

impl Playlist {
    /// Sum of all item durations.
    pub fn total_duration_secs(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.duration)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_by_kind() {
        assert_eq!(default_duration_secs(MediaKind::Video), 10);
        assert_eq!(default_duration_secs(MediaKind::Image), 15);
    }

    #[test]
    fn item_serializes_with_persisted_field_names() {
        let item = PlaylistItem {
            id: uuid::Uuid::nil(),
            name: "Lobby loop".into(),
            kind: MediaKind::Video,
            url: "https://cdn/a.mp4".into(),
            duration: 23,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "name": "Lobby loop",
                "type": "video",
                "url": "https://cdn/a.mp4",
                "duration": 23,
            })
        );
    }
}
