//! Media assets: kind classification, upload payloads and blob naming.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{RecordId, Timestamp};

/// Blob-store bucket holding uploaded media files.
pub const MEDIA_BUCKET: &str = "media";

/// Cache lifetime (seconds) requested for uploaded media blobs.
pub const MEDIA_CACHE_CONTROL_SECS: u32 = 3600;

/// The two kinds of media a screen can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a MIME type. Anything whose top-level type is `video` is a
    /// video; everything else is treated as an image.
    pub fn from_mime(mime_type: &str) -> Self {
        let top_level = mime_type.split('/').next().unwrap_or_default();
        if top_level.trim().eq_ignore_ascii_case("video") {
            Self::Video
        } else {
            Self::Image
        }
    }

    /// Parse the persisted `type` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(CoreError::Validation(format!(
                "Unknown media type '{other}'. Must be one of: image, video"
            ))),
        }
    }

    /// Persisted `type` value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// One uploaded file and its catalog metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub id: RecordId,
    pub title: String,
    pub kind: MediaKind,
    pub url: String,
    pub size_bytes: u64,
    pub created_at: Timestamp,
    pub owner_id: Option<RecordId>,
}

/// A file received from the user, ready to be written to the blob store.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Only images and videos may be uploaded to the media library.
pub fn validate_media_mime(mime_type: &str) -> Result<(), CoreError> {
    let top_level = mime_type.split('/').next().unwrap_or_default();
    match top_level {
        "image" | "video" => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "Unsupported media type '{mime_type}'. Only image/* and video/* files are accepted"
        ))),
    }
}

/// Lower-cased extension of `file_name`, if it has one.
pub fn file_extension(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Collision-resistant blob name for a media upload.
///
/// Convention: `{random}_{unix_millis}.{ext}`, where `ext` is the original
/// file's extension (omitted when the original has none).
pub fn media_object_name(original_name: &str, uploaded_at: Timestamp) -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    let stem = format!("{}_{}", &random[..12], uploaded_at.timestamp_millis());
    with_extension(stem, original_name)
}

/// Append the extension of `original_name` to `stem`.
pub(crate) fn with_extension(stem: String, original_name: &str) -> String {
    match file_extension(original_name) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

/// Object path of a blob inside its bucket, recovered from its public URL.
///
/// Public URLs end with the object path, and uploads are always written at
/// the bucket root, so the last path segment is the object name.
pub fn object_path_from_url(url: &str) -> Option<&str> {
    let without_query = url.split(['?', '#']).next().unwrap_or_default();
    without_query
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn video_mime_is_video() {
        assert_eq!(MediaKind::from_mime("video/mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("VIDEO/webm"), MediaKind::Video);
    }

    #[test]
    fn everything_else_is_image() {
        assert_eq!(MediaKind::from_mime("image/png"), MediaKind::Image);
        assert_eq!(MediaKind::from_mime("application/octet-stream"), MediaKind::Image);
        assert_eq!(MediaKind::from_mime(""), MediaKind::Image);
    }

    #[test]
    fn kind_names_round_trip() {
        assert_eq!(MediaKind::from_name("image").unwrap(), MediaKind::Image);
        assert_eq!(MediaKind::from_name("video").unwrap(), MediaKind::Video);
        assert_eq!(MediaKind::Video.name(), "video");
        assert!(MediaKind::from_name("audio").is_err());
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_value(MediaKind::Video).unwrap();
        assert_eq!(json, "video");
    }

    #[test]
    fn only_images_and_videos_are_accepted() {
        assert!(validate_media_mime("image/jpeg").is_ok());
        assert!(validate_media_mime("video/quicktime").is_ok());
        assert!(validate_media_mime("application/pdf").is_err());
        assert!(validate_media_mime("").is_err());
    }

    #[test]
    fn object_name_keeps_extension() {
        let at = chrono::Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let name = media_object_name("Promo Clip.MP4", at);
        assert!(name.ends_with("_1700000000123.mp4"), "got {name}");
    }

    #[test]
    fn object_name_without_extension() {
        let at = chrono::Utc.timestamp_millis_opt(42).unwrap();
        let name = media_object_name("README", at);
        assert!(name.ends_with("_42"), "got {name}");
        assert!(!name.contains('.'));
    }

    #[test]
    fn object_names_do_not_collide() {
        let at = chrono::Utc::now();
        assert_ne!(media_object_name("a.png", at), media_object_name("a.png", at));
    }

    #[test]
    fn object_path_is_last_segment() {
        let url = "https://x.example.co/storage/v1/object/public/media/abc_1.png";
        assert_eq!(object_path_from_url(url), Some("abc_1.png"));
        assert_eq!(object_path_from_url("https://x/media/abc.png?t=1"), Some("abc.png"));
        assert_eq!(object_path_from_url("https://x/media/"), None);
    }
}
