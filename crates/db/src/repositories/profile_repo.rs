//! Repository for the `profiles` table and avatar blobs.

use async_trait::async_trait;
use lumen_core::error::CoreError;
use lumen_core::media::{validate_media_mime, UploadFile, MEDIA_CACHE_CONTROL_SECS};
use lumen_core::profile::{avatar_object_name, Profile, AVATAR_BUCKET};
use lumen_core::roles::ROLE_CLIENT;
use lumen_core::store::ProfileStore;
use lumen_core::types::RecordId;
use lumen_core::validation::validate_username;

use super::map_rows;
use crate::client::{eq, BackendClient, Query};
use crate::models::profile::{ProfileRow, ProfileUpsert};

const PROFILE_TABLE: &str = "profiles";

/// Column list for `profiles` queries.
const PROFILE_COLUMNS: &str = "id,username,avatar_url,role";

pub struct ProfileRepo {
    client: BackendClient,
}

impl ProfileRepo {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    async fn upsert(&self, payload: &ProfileUpsert<'_>) -> Result<Profile, CoreError> {
        let row: ProfileRow = self.client.upsert(PROFILE_TABLE, payload).await?;
        Ok(Profile::try_from(row)?)
    }
}

#[async_trait]
impl ProfileStore for ProfileRepo {
    async fn get(&self, user_id: RecordId) -> Result<Option<Profile>, CoreError> {
        let query: Query = vec![("select", PROFILE_COLUMNS.to_string()), ("id", eq(user_id))];
        let rows: Vec<ProfileRow> = self.client.select(PROFILE_TABLE, &query).await?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(Profile::try_from(row)?)),
            None => Ok(None),
        }
    }

    async fn list_clients(&self) -> Result<Vec<Profile>, CoreError> {
        let query: Query = vec![
            ("select", PROFILE_COLUMNS.to_string()),
            ("role", eq(ROLE_CLIENT)),
            ("order", "created_at.desc".to_string()),
        ];
        let rows: Vec<ProfileRow> = self.client.select(PROFILE_TABLE, &query).await?;
        Ok(map_rows(PROFILE_TABLE, rows))
    }

    async fn update_username(
        &self,
        user_id: RecordId,
        username: &str,
    ) -> Result<Profile, CoreError> {
        let username = validate_username(username)?;
        let profile = self
            .upsert(&ProfileUpsert {
                id: user_id,
                username: Some(&username),
                avatar_url: None,
                updated_at: chrono::Utc::now(),
            })
            .await?;

        tracing::info!(%user_id, "Username updated");
        Ok(profile)
    }

    async fn upload_avatar(
        &self,
        user_id: RecordId,
        file: &UploadFile,
    ) -> Result<Profile, CoreError> {
        validate_media_mime(&file.mime_type)?;
        if !file.mime_type.starts_with("image/") {
            return Err(CoreError::Validation("Avatar must be an image".into()));
        }

        let object = avatar_object_name(user_id, &file.name);
        self.client
            .upload_object(
                AVATAR_BUCKET,
                &object,
                file.bytes.clone(),
                &file.mime_type,
                MEDIA_CACHE_CONTROL_SECS,
            )
            .await?;
        let url = self.client.public_url(AVATAR_BUCKET, &object);

        let profile = self
            .upsert(&ProfileUpsert {
                id: user_id,
                username: None,
                avatar_url: Some(&url),
                updated_at: chrono::Utc::now(),
            })
            .await?;

        tracing::info!(%user_id, object = %object, "Avatar updated");
        Ok(profile)
    }
}
