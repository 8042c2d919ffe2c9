//! Repository for the `playlists` table.

use async_trait::async_trait;
use lumen_core::error::CoreError;
use lumen_core::playlist::{Playlist, PlaylistItem};
use lumen_core::store::PlaylistStore;
use lumen_core::types::RecordId;
use lumen_core::validation::validate_playlist_name;

use super::map_rows;
use crate::client::{eq, BackendClient, Query};
use crate::models::playlist::{NewPlaylistRow, PlaylistItemsUpdate, PlaylistRow};

const PLAYLIST_TABLE: &str = "playlists";

/// Column list for `playlists` queries.
const PLAYLIST_COLUMNS: &str = "id,name,items,owner_id,created_at,updated_at";

pub struct PlaylistRepo {
    client: BackendClient,
}

impl PlaylistRepo {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PlaylistStore for PlaylistRepo {
    async fn create(&self, name: &str, owner_id: RecordId) -> Result<Playlist, CoreError> {
        let name = validate_playlist_name(name)?;
        let row = NewPlaylistRow {
            name: &name,
            items: &[],
            owner_id,
        };
        let inserted: PlaylistRow = self.client.insert(PLAYLIST_TABLE, &row).await?;
        let playlist = Playlist::try_from(inserted)?;

        tracing::info!(playlist_id = %playlist.id, name = %playlist.name, "Playlist created");
        Ok(playlist)
    }

    async fn list(&self) -> Result<Vec<Playlist>, CoreError> {
        let query: Query = vec![
            ("select", PLAYLIST_COLUMNS.to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        let rows: Vec<PlaylistRow> = self.client.select(PLAYLIST_TABLE, &query).await?;
        Ok(map_rows(PLAYLIST_TABLE, rows))
    }

    async fn get(&self, id: RecordId) -> Result<Playlist, CoreError> {
        let query: Query = vec![("select", PLAYLIST_COLUMNS.to_string()), ("id", eq(id))];
        let row: PlaylistRow = self
            .client
            .select_one(PLAYLIST_TABLE, &query)
            .await
            .map_err(|e| e.for_entity("Playlist", id))?;
        Ok(Playlist::try_from(row)?)
    }

    async fn replace_items(&self, id: RecordId, items: &[PlaylistItem]) -> Result<(), CoreError> {
        let query: Query = vec![("id", eq(id)), ("select", "id".to_string())];
        let body = PlaylistItemsUpdate {
            items,
            updated_at: chrono::Utc::now(),
        };
        let changed: Vec<serde_json::Value> =
            self.client.update(PLAYLIST_TABLE, &query, &body).await?;
        if changed.is_empty() {
            return Err(CoreError::NotFound {
                entity: "Playlist",
                id,
            });
        }

        tracing::debug!(playlist_id = %id, items = items.len(), "Playlist items replaced");
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> Result<(), CoreError> {
        let query: Query = vec![("id", eq(id))];
        self.client.delete(PLAYLIST_TABLE, &query).await?;

        tracing::info!(playlist_id = %id, "Playlist deleted");
        Ok(())
    }
}
