//! Row shapes of the backend tables.
//!
//! Rows are deserialized leniently (every column optional) and mapped into the
//! strict `lumen_core` types at this boundary. Insert payloads are separate
//! `New*` structs so only writable columns are ever sent.

pub mod media;
pub mod playlist;
pub mod profile;
pub mod screen;

use crate::error::BackendError;

/// Unwrap a column every row must carry.
pub(crate) fn required<T>(value: Option<T>, table: &str, column: &str) -> Result<T, BackendError> {
    value.ok_or_else(|| BackendError::Decode(format!("{table}.{column} is missing")))
}
