//! Collaborator traits for the hosted backend.
//!
//! The editing engine and the HTTP layer only ever see these traits. The
//! REST implementation lives in `lumen_db`; tests use in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::media::{MediaAsset, UploadFile};
use crate::playlist::{Playlist, PlaylistItem};
use crate::profile::{Profile, UserContext};
use crate::screen::Screen;
use crate::types::RecordId;

/// Create/read/update/delete of playlist records.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Create an empty playlist owned by `owner_id`.
    async fn create(&self, name: &str, owner_id: RecordId) -> Result<Playlist, CoreError>;

    /// All visible playlists, newest first.
    async fn list(&self) -> Result<Vec<Playlist>, CoreError>;

    async fn get(&self, id: RecordId) -> Result<Playlist, CoreError>;

    /// Replace the whole `items` field. Never merges.
    async fn replace_items(&self, id: RecordId, items: &[PlaylistItem]) -> Result<(), CoreError>;

    async fn delete(&self, id: RecordId) -> Result<(), CoreError>;
}

/// The media library: catalog rows plus their blobs.
#[async_trait]
pub trait MediaCatalog: Send + Sync {
    /// Write the blob, then insert the catalog row. No row is created
    /// without a stored blob.
    async fn upload(&self, owner_id: RecordId, file: &UploadFile) -> Result<MediaAsset, CoreError>;

    /// All media, newest first.
    async fn list(&self) -> Result<Vec<MediaAsset>, CoreError>;

    /// Best-effort blob removal followed by mandatory row deletion.
    async fn delete(&self, id: RecordId, url: &str) -> Result<(), CoreError>;
}

#[async_trait]
pub trait ScreenStore: Send + Sync {
    /// All visible screens with their playlist name, newest first.
    async fn list(&self) -> Result<Vec<Screen>, CoreError>;

    /// Screens assigned to `user_id`, newest first.
    async fn list_assigned_to(&self, user_id: RecordId) -> Result<Vec<Screen>, CoreError>;

    /// Register a screen under `owner_id`. New screens start offline.
    async fn pair(
        &self,
        name: &str,
        pairing_code: &str,
        owner_id: RecordId,
    ) -> Result<Screen, CoreError>;

    /// Point a screen at a playlist, or at nothing. The playlist is not
    /// checked for existence.
    async fn assign_playlist(
        &self,
        screen_id: RecordId,
        playlist_id: Option<RecordId>,
    ) -> Result<(), CoreError>;

    async fn delete(&self, id: RecordId) -> Result<(), CoreError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_id: RecordId) -> Result<Option<Profile>, CoreError>;

    /// Profiles with the `client` role.
    async fn list_clients(&self) -> Result<Vec<Profile>, CoreError>;

    async fn update_username(&self, user_id: RecordId, username: &str)
        -> Result<Profile, CoreError>;

    /// Store a new avatar blob and point the profile at it.
    async fn upload_avatar(&self, user_id: RecordId, file: &UploadFile)
        -> Result<Profile, CoreError>;
}

/// Turns bearer tokens into callers and forwards credential changes.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer token. Fails with [`CoreError::Unauthorized`] when
    /// the session is missing or expired.
    async fn resolve(&self, access_token: &str) -> Result<UserContext, CoreError>;

    async fn update_password(&self, ctx: &UserContext, password: &str) -> Result<(), CoreError>;
}

/// Entry point to every accessor, scoped to the calling user.
#[async_trait]
pub trait Backend: Send + Sync {
    fn playlists(&self, ctx: &UserContext) -> Arc<dyn PlaylistStore>;

    fn media(&self, ctx: &UserContext) -> Arc<dyn MediaCatalog>;

    fn screens(&self, ctx: &UserContext) -> Arc<dyn ScreenStore>;

    fn profiles(&self, ctx: &UserContext) -> Arc<dyn ProfileStore>;

    fn identity(&self) -> Arc<dyn IdentityProvider>;

    /// Whether the backend answers at all.
    async fn health_check(&self) -> Result<(), CoreError>;
}
