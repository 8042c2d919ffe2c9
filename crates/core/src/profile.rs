//! User profiles and the per-request caller context.

use serde::{Deserialize, Serialize};

use crate::media::with_extension;
use crate::roles::Role;
use crate::types::RecordId;

/// Blob-store bucket holding profile avatars.
pub const AVATAR_BUCKET: &str = "avatars";

/// A row of the `profiles` table, mapped into strict form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: RecordId,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Role,
}

/// The authenticated caller of an operation.
///
/// Built once per request from the bearer token and handed to whatever
/// needs to know who is acting; nothing reads the caller from global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: RecordId,
    pub email: Option<String>,
    pub role: Role,
    /// Token forwarded to the hosted backend so its row-level policies apply.
    pub access_token: String,
}

/// Blob name for a user's avatar: `{user_id}-{random}.{ext}`.
pub fn avatar_object_name(user_id: RecordId, original_name: &str) -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    with_extension(format!("{user_id}-{}", &random[..12]), original_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_name_is_scoped_to_user() {
        let user = uuid::Uuid::new_v4();
        let name = avatar_object_name(user, "me.JPG");
        assert!(name.starts_with(&format!("{user}-")));
        assert!(name.ends_with(".jpg"));
    }
}
