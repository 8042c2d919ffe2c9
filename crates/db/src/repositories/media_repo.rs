//! Repository for the media library: `media` rows plus their blobs.

use async_trait::async_trait;
use lumen_core::error::CoreError;
use lumen_core::media::{
    media_object_name, object_path_from_url, validate_media_mime, MediaAsset, MediaKind,
    UploadFile, MEDIA_BUCKET, MEDIA_CACHE_CONTROL_SECS,
};
use lumen_core::store::MediaCatalog;
use lumen_core::types::RecordId;

use super::map_rows;
use crate::client::{eq, BackendClient, Query};
use crate::models::media::{MediaRow, NewMediaRow};

const MEDIA_TABLE: &str = "media";

/// Column list for `media` queries.
const MEDIA_COLUMNS: &str = "id,title,url,type,size,owner_id,created_at";

pub struct MediaRepo {
    client: BackendClient,
}

impl MediaRepo {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MediaCatalog for MediaRepo {
    async fn upload(&self, owner_id: RecordId, file: &UploadFile) -> Result<MediaAsset, CoreError> {
        validate_media_mime(&file.mime_type)?;

        let object = media_object_name(&file.name, chrono::Utc::now());
        self.client
            .upload_object(
                MEDIA_BUCKET,
                &object,
                file.bytes.clone(),
                &file.mime_type,
                MEDIA_CACHE_CONTROL_SECS,
            )
            .await?;
        let url = self.client.public_url(MEDIA_BUCKET, &object);

        let row = NewMediaRow {
            title: &file.name,
            url: &url,
            kind: MediaKind::from_mime(&file.mime_type).name(),
            size: file.byte_size(),
            owner_id,
        };
        let inserted: MediaRow = match self.client.insert(MEDIA_TABLE, &row).await {
            Ok(inserted) => inserted,
            Err(e) => {
                tracing::warn!(
                    object = %object,
                    error = %e,
                    "Media row insert failed, blob left orphaned",
                );
                return Err(e.into());
            }
        };

        let asset = MediaAsset::try_from(inserted)?;
        tracing::info!(
            media_id = %asset.id,
            kind = asset.kind.name(),
            size_bytes = asset.size_bytes,
            "Media uploaded",
        );
        Ok(asset)
    }

    async fn list(&self) -> Result<Vec<MediaAsset>, CoreError> {
        let query: Query = vec![
            ("select", MEDIA_COLUMNS.to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        let rows: Vec<MediaRow> = self.client.select(MEDIA_TABLE, &query).await?;
        Ok(map_rows(MEDIA_TABLE, rows))
    }

    async fn delete(&self, id: RecordId, url: &str) -> Result<(), CoreError> {
        match object_path_from_url(url) {
            Some(path) => {
                if let Err(e) = self.client.remove_objects(MEDIA_BUCKET, &[path]).await {
                    tracing::warn!(media_id = %id, path, error = %e, "Media blob removal failed");
                }
            }
            None => tracing::warn!(media_id = %id, url, "No object path in media URL"),
        }

        let query: Query = vec![("id", eq(id))];
        self.client.delete(MEDIA_TABLE, &query).await?;

        tracing::info!(media_id = %id, "Media deleted");
        Ok(())
    }
}
