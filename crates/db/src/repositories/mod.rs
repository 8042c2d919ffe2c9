//! Table-level accessors, one per backend table.
//!
//! Each repository wraps a [`BackendClient`](crate::client::BackendClient)
//! already scoped to the calling user and implements the matching
//! `lumen_core::store` trait.

pub mod media_repo;
pub mod playlist_repo;
pub mod profile_repo;
pub mod screen_repo;

pub use media_repo::MediaRepo;
pub use playlist_repo::PlaylistRepo;
pub use profile_repo::ProfileRepo;
pub use screen_repo::ScreenRepo;

use crate::error::BackendError;

/// Map every row, dropping (and logging) the ones that do not fit the
/// domain type.
pub(crate) fn map_rows<R, T>(table: &'static str, rows: Vec<R>) -> Vec<T>
where
    T: TryFrom<R, Error = BackendError>,
{
    rows.into_iter()
        .filter_map(|row| match T::try_from(row) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(table, error = %e, "Skipping malformed row");
                None
            }
        })
        .collect()
}
