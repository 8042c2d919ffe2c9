//! Playlist editing engine.
//!
//! A [`PlaylistEditor`] owns the in-memory sequence of one playlist while a
//! user edits it: entries are drawn from a snapshot of the media catalog,
//! reordered, given durations, and finally written back in one piece.
//!
//! Every mutation is synchronous and cannot fail. Only [`PlaylistEditor::save`]
//! talks to the backend, and a failed save changes nothing locally.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::media::{MediaAsset, MediaKind};
use crate::playlist::{
    default_duration_secs, Playlist, PlaylistItem, DEFAULT_VIDEO_DURATION_SECS,
    MIN_DURATION_SECS,
};
use crate::store::{MediaCatalog, PlaylistStore};
use crate::types::RecordId;

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Session-local identity of one entry.
///
/// The same asset may appear several times in a playlist, so entries need
/// their own id. It is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(uuid::Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One scheduled occurrence of a media asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistEntry {
    pub entry_id: EntryId,
    pub asset_id: RecordId,
    pub title: String,
    pub kind: MediaKind,
    pub url: String,
    /// Whole seconds, never below [`MIN_DURATION_SECS`].
    pub duration_secs: u32,
}

impl PlaylistEntry {
    /// A fresh entry for `asset` with the default duration for its kind.
    pub fn from_asset(asset: &MediaAsset) -> Self {
        Self {
            entry_id: EntryId::new(),
            asset_id: asset.id,
            title: asset.title.clone(),
            kind: asset.kind,
            url: asset.url.clone(),
            duration_secs: default_duration_secs(asset.kind),
        }
    }

    fn from_item(item: &PlaylistItem) -> Self {
        Self {
            entry_id: EntryId::new(),
            asset_id: item.id,
            title: item.name.clone(),
            kind: item.kind,
            url: item.url.clone(),
            duration_secs: item.duration.max(MIN_DURATION_SECS),
        }
    }

    /// Persisted form, without the session-local id.
    pub fn to_item(&self) -> PlaylistItem {
        PlaylistItem {
            id: self.asset_id,
            name: self.title.clone(),
            kind: self.kind,
            url: self.url.clone(),
            duration: self.duration_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// In-memory editing session for a single playlist.
#[derive(Debug, Clone)]
pub struct PlaylistEditor {
    playlist_id: RecordId,
    playlist_name: String,
    sequence: Vec<PlaylistEntry>,
    catalog: Vec<MediaAsset>,
    search_filter: String,
    dirty: bool,
}

impl PlaylistEditor {
    /// Build an editor from an already loaded playlist and catalog snapshot.
    pub fn new(playlist: &Playlist, catalog: Vec<MediaAsset>) -> Self {
        Self {
            playlist_id: playlist.id,
            playlist_name: playlist.name.clone(),
            sequence: playlist.items.iter().map(PlaylistEntry::from_item).collect(),
            catalog,
            search_filter: String::new(),
            dirty: false,
        }
    }

    /// Load playlist `playlist_id` and the full media catalog (newest first).
    pub async fn open(
        playlist_id: RecordId,
        playlists: &dyn PlaylistStore,
        media: &dyn MediaCatalog,
    ) -> Result<Self, CoreError> {
        let playlist = playlists.get(playlist_id).await?;
        let catalog = media.list().await?;
        tracing::debug!(
            %playlist_id,
            items = playlist.items.len(),
            catalog = catalog.len(),
            "Opened playlist editor",
        );
        Ok(Self::new(&playlist, catalog))
    }

    pub fn playlist_id(&self) -> RecordId {
        self.playlist_id
    }

    pub fn playlist_name(&self) -> &str {
        &self.playlist_name
    }

    /// Current sequence in playback order.
    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.sequence
    }

    pub fn entry(&self, entry_id: EntryId) -> Option<&PlaylistEntry> {
        self.sequence.iter().find(|e| e.entry_id == entry_id)
    }

    pub fn catalog(&self) -> &[MediaAsset] {
        &self.catalog
    }

    /// Whether the sequence changed since it was loaded or last saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // -- mutations ----------------------------------------------------------

    /// Append `asset` to the end of the sequence. Duplicates are allowed.
    pub fn add_entry(&mut self, asset: &MediaAsset) -> EntryId {
        let entry = PlaylistEntry::from_asset(asset);
        let entry_id = entry.entry_id;
        self.sequence.push(entry);
        self.dirty = true;
        entry_id
    }

    /// Append the catalog asset with id `asset_id`.
    pub fn add_entry_from_catalog(&mut self, asset_id: RecordId) -> Result<EntryId, CoreError> {
        let asset = self
            .catalog
            .iter()
            .find(|a| a.id == asset_id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "MediaAsset",
                id: asset_id,
            })?;
        Ok(self.add_entry(&asset))
    }

    /// Remove an entry. Unknown ids are ignored.
    pub fn remove_entry(&mut self, entry_id: EntryId) {
        let before = self.sequence.len();
        self.sequence.retain(|e| e.entry_id != entry_id);
        if self.sequence.len() != before {
            self.dirty = true;
        }
    }

    /// Move `source` to the position currently held by `target`.
    ///
    /// Standard array move: the source is taken out and reinserted at the
    /// target's index, shifting everything in between by one. A no-op when
    /// either id is unknown or both are the same.
    pub fn reorder(&mut self, source: EntryId, target: EntryId) {
        let Some(from) = self.position(source) else {
            return;
        };
        let Some(to) = self.position(target) else {
            return;
        };
        if from == to {
            return;
        }
        let entry = self.sequence.remove(from);
        self.sequence.insert(to, entry);
        self.dirty = true;
    }

    /// Set an entry's duration, flooring anything below one second to one.
    pub fn set_duration(&mut self, entry_id: EntryId, seconds: i64) {
        let seconds = seconds.clamp(i64::from(MIN_DURATION_SECS), i64::from(u32::MAX)) as u32;
        if let Some(entry) = self.entry_mut(entry_id) {
            if entry.duration_secs != seconds {
                entry.duration_secs = seconds;
                self.dirty = true;
            }
        }
    }

    /// Record the playback length reported for a video entry.
    ///
    /// Only fills in the default: applies when the entry is a video whose
    /// duration is still [`DEFAULT_VIDEO_DURATION_SECS`]. Values that are not
    /// finite or round below one second are ignored.
    pub fn on_video_duration_detected(&mut self, entry_id: EntryId, detected_secs: f64) {
        if !detected_secs.is_finite() {
            return;
        }
        let rounded = detected_secs.round();
        if rounded < f64::from(MIN_DURATION_SECS) {
            return;
        }
        let seconds = rounded.min(f64::from(u32::MAX)) as u32;

        let Some(entry) = self.entry_mut(entry_id) else {
            return;
        };
        if entry.kind != MediaKind::Video || entry.duration_secs != DEFAULT_VIDEO_DURATION_SECS {
            return;
        }
        if seconds != entry.duration_secs {
            entry.duration_secs = seconds;
            self.dirty = true;
        }
    }

    // -- derived values -----------------------------------------------------

    /// Sum of every entry's duration.
    pub fn total_duration_secs(&self) -> u64 {
        self.sequence.iter().map(|e| u64::from(e.duration_secs)).sum()
    }

    /// Persisted form of the current sequence, in order.
    pub fn to_items(&self) -> Vec<PlaylistItem> {
        self.sequence.iter().map(PlaylistEntry::to_item).collect()
    }

    // -- catalog ------------------------------------------------------------

    /// Catalog assets whose title contains `text`, ignoring case.
    pub fn apply_search_filter(&self, text: &str) -> Vec<&MediaAsset> {
        let needle = text.to_lowercase();
        self.catalog
            .iter()
            .filter(|a| a.title.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn set_search_filter(&mut self, text: impl Into<String>) {
        self.search_filter = text.into();
    }

    pub fn search_filter(&self) -> &str {
        &self.search_filter
    }

    /// Catalog filtered by the current search text.
    pub fn filtered_catalog(&self) -> Vec<&MediaAsset> {
        self.apply_search_filter(&self.search_filter)
    }

    /// Replace the catalog snapshot. The sequence is left alone.
    pub fn reload_catalog(&mut self, catalog: Vec<MediaAsset>) {
        self.catalog = catalog;
    }

    // -- persistence --------------------------------------------------------

    /// Write the whole sequence to the playlist's `items` field.
    ///
    /// On failure the sequence and dirty flag are left as they were so the
    /// save can be retried.
    pub async fn save(&mut self, store: &dyn PlaylistStore) -> Result<(), CoreError> {
        let items = self.to_items();
        match store.replace_items(self.playlist_id, &items).await {
            Ok(()) => {
                self.dirty = false;
                tracing::info!(
                    playlist_id = %self.playlist_id,
                    items = items.len(),
                    total_secs = self.total_duration_secs(),
                    "Playlist saved",
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    playlist_id = %self.playlist_id,
                    error = %e,
                    "Playlist save failed",
                );
                Err(e)
            }
        }
    }

    // -- helpers ------------------------------------------------------------

    fn position(&self, entry_id: EntryId) -> Option<usize> {
        self.sequence.iter().position(|e| e.entry_id == entry_id)
    }

    fn entry_mut(&mut self, entry_id: EntryId) -> Option<&mut PlaylistEntry> {
        self.sequence.iter_mut().find(|e| e.entry_id == entry_id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
