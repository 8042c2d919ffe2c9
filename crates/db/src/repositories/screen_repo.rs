//! Repository for the `screens` table.

use async_trait::async_trait;
use lumen_core::error::CoreError;
use lumen_core::screen::{Screen, ScreenStatus};
use lumen_core::store::ScreenStore;
use lumen_core::types::RecordId;
use lumen_core::validation::{normalize_pairing_code, validate_screen_name};

use super::map_rows;
use crate::client::{eq, BackendClient, Query};
use crate::models::screen::{NewScreenRow, ScreenPlaylistUpdate, ScreenRow};

const SCREEN_TABLE: &str = "screens";

/// Screen columns plus the name of the assigned playlist.
const SCREEN_WITH_PLAYLIST: &str = "*,playlists(name)";

pub struct ScreenRepo {
    client: BackendClient,
}

impl ScreenRepo {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    async fn select(&self, mut query: Query) -> Result<Vec<Screen>, CoreError> {
        query.push(("select", SCREEN_WITH_PLAYLIST.to_string()));
        query.push(("order", "created_at.desc".to_string()));
        let rows: Vec<ScreenRow> = self.client.select(SCREEN_TABLE, &query).await?;
        Ok(map_rows(SCREEN_TABLE, rows))
    }
}

#[async_trait]
impl ScreenStore for ScreenRepo {
    async fn list(&self) -> Result<Vec<Screen>, CoreError> {
        self.select(Vec::new()).await
    }

    async fn list_assigned_to(&self, user_id: RecordId) -> Result<Vec<Screen>, CoreError> {
        self.select(vec![("assigned_to", eq(user_id))]).await
    }

    async fn pair(
        &self,
        name: &str,
        pairing_code: &str,
        owner_id: RecordId,
    ) -> Result<Screen, CoreError> {
        let name = validate_screen_name(name)?;
        let pairing_code = normalize_pairing_code(pairing_code)?;

        let row = NewScreenRow {
            name: &name,
            pairing_code: &pairing_code,
            status: ScreenStatus::Offline,
            assigned_to: owner_id,
        };
        let inserted: ScreenRow = self.client.insert(SCREEN_TABLE, &row).await?;
        let screen = Screen::try_from(inserted)?;

        tracing::info!(screen_id = %screen.id, name = %screen.name, "Screen paired");
        Ok(screen)
    }

    async fn assign_playlist(
        &self,
        screen_id: RecordId,
        playlist_id: Option<RecordId>,
    ) -> Result<(), CoreError> {
        let query: Query = vec![("id", eq(screen_id)), ("select", "id".to_string())];
        let changed: Vec<serde_json::Value> = self
            .client
            .update(SCREEN_TABLE, &query, &ScreenPlaylistUpdate { playlist_id })
            .await?;
        if changed.is_empty() {
            return Err(CoreError::NotFound {
                entity: "Screen",
                id: screen_id,
            });
        }

        tracing::info!(
            %screen_id,
            playlist_id = ?playlist_id,
            "Screen playlist assigned",
        );
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> Result<(), CoreError> {
        let query: Query = vec![("id", eq(id))];
        self.client.delete(SCREEN_TABLE, &query).await?;

        tracing::info!(screen_id = %id, "Screen deleted");
        Ok(())
    }
}
