//! Multipart form reading for file uploads.

use axum::extract::Multipart;
use lumen_core::media::UploadFile;

use crate::error::{AppError, AppResult};

/// Content type assumed when a part does not declare one.
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Collect every file part of the form, in submission order.
///
/// Non-file fields are ignored. A part without a file name gets `upload`.
pub async fn read_files(multipart: &mut Multipart) -> AppResult<Vec<UploadFile>> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_none() && field.content_type().is_none() {
            continue;
        }

        let name = field.file_name().unwrap_or("upload").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();
        // Over-size bodies fail here with 413.
        let bytes = field.bytes().await?;

        files.push(UploadFile {
            name,
            mime_type,
            bytes: bytes.to_vec(),
        });
    }

    Ok(files)
}

/// Like [`read_files`], but exactly one file is expected.
pub async fn read_single_file(multipart: &mut Multipart) -> AppResult<UploadFile> {
    read_files(multipart)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::BadRequest("Missing file in multipart form".into()))
}
