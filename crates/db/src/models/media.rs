use chrono::Utc;
use lumen_core::media::{MediaAsset, MediaKind};
use lumen_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};

use super::required;
use crate::error::BackendError;

/// A row from the `media` table.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaRow {
    pub id: Option<RecordId>,
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub size: Option<i64>,
    pub owner_id: Option<RecordId>,
    pub created_at: Option<Timestamp>,
}

/// Insert payload for the `media` table.
#[derive(Debug, Serialize)]
pub struct NewMediaRow<'a> {
    pub title: &'a str,
    pub url: &'a str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub size: u64,
    pub owner_id: RecordId,
}

impl TryFrom<MediaRow> for MediaAsset {
    type Error = BackendError;

    fn try_from(row: MediaRow) -> Result<Self, Self::Error> {
        let kind = required(row.kind, "media", "type")?;
        let kind = MediaKind::from_name(&kind).map_err(|e| BackendError::Decode(e.to_string()))?;

        Ok(MediaAsset {
            id: required(row.id, "media", "id")?,
            title: row.title.unwrap_or_default(),
            kind,
            url: required(row.url, "media", "url")?,
            size_bytes: row.size.unwrap_or(0).max(0) as u64,
            created_at: row.created_at.unwrap_or_else(Utc::now),
            owner_id: row.owner_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn parse(json: serde_json::Value) -> Result<MediaAsset, BackendError> {
        let row: MediaRow = serde_json::from_value(json).unwrap();
        MediaAsset::try_from(row)
    }

    #[test]
    fn maps_complete_row() {
        let asset = parse(serde_json::json!({
            "id": "6f1c2d3e-0000-4000-8000-000000000001",
            "title": "promo.mp4",
            "url": "https://x/storage/v1/object/public/media/a_1.mp4",
            "type": "video",
            "size": 2048,
            "owner_id": null,
            "created_at": "2024-05-01T10:00:00.123456+00:00"
        }))
        .unwrap();

        assert_eq!(asset.kind, MediaKind::Video);
        assert_eq!(asset.size_bytes, 2048);
        assert_eq!(asset.title, "promo.mp4");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = parse(serde_json::json!({
            "id": "6f1c2d3e-0000-4000-8000-000000000001",
            "url": "u",
            "type": "audio"
        }));
        assert_matches!(result, Err(BackendError::Decode(_)));
    }

    #[test]
    fn missing_url_is_rejected() {
        let result = parse(serde_json::json!({
            "id": "6f1c2d3e-0000-4000-8000-000000000001",
            "type": "image"
        }));
        assert_matches!(result, Err(BackendError::Decode(msg)) if msg.contains("url"));
    }

    #[test]
    fn insert_payload_uses_column_names() {
        let owner = uuid::Uuid::nil();
        let row = NewMediaRow {
            title: "a.png",
            url: "u",
            kind: MediaKind::Image.name(),
            size: 10,
            owner_id: owner,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["size"], 10);
    }
}
