//! Paired physical displays.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{RecordId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenStatus {
    Online,
    Offline,
}

impl ScreenStatus {
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            other => Err(CoreError::Validation(format!(
                "Unknown screen status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub id: RecordId,
    pub name: String,
    /// Cleared once the screen has been claimed.
    pub pairing_code: Option<String>,
    pub status: ScreenStatus,
    /// May point at a playlist that no longer exists.
    pub playlist_id: Option<RecordId>,
    /// Name of the assigned playlist, when it still exists.
    pub playlist_name: Option<String>,
    pub assigned_to: Option<RecordId>,
    pub last_seen: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Screen {
    pub fn is_online(&self) -> bool {
        self.status == ScreenStatus::Online
    }

    /// Whether the screen has something to play. A dangling playlist
    /// reference counts as nothing assigned.
    pub fn has_content(&self) -> bool {
        self.playlist_id.is_some() && self.playlist_name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(playlist_id: Option<RecordId>, playlist_name: Option<&str>) -> Screen {
        Screen {
            id: uuid::Uuid::new_v4(),
            name: "Lobby".into(),
            pairing_code: None,
            status: ScreenStatus::Offline,
            playlist_id,
            playlist_name: playlist_name.map(str::to_string),
            assigned_to: None,
            last_seen: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn dangling_playlist_means_no_content() {
        let s = screen(Some(uuid::Uuid::new_v4()), None);
        assert!(!s.has_content());
    }

    #[test]
    fn assigned_playlist_is_content() {
        let s = screen(Some(uuid::Uuid::new_v4()), Some("Morning"));
        assert!(s.has_content());
        assert!(!screen(None, None).has_content());
    }

    #[test]
    fn status_names() {
        assert_eq!(ScreenStatus::from_name("online").unwrap(), ScreenStatus::Online);
        assert_eq!(ScreenStatus::from_name("offline").unwrap(), ScreenStatus::Offline);
        assert!(ScreenStatus::from_name("asleep").is_err());
    }
}
