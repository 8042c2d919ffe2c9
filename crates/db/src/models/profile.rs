use lumen_core::profile::Profile;
use lumen_core::roles::Role;
use lumen_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};

use super::required;
use crate::error::BackendError;

/// A row from the `profiles` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRow {
    pub id: Option<RecordId>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Option<String>,
}

/// Just the `role` column, for the identity lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleRow {
    pub role: Option<String>,
}

/// Upsert payload for profile changes. Unset fields are left untouched.
#[derive(Debug, Serialize)]
pub struct ProfileUpsert<'a> {
    pub id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<&'a str>,
    pub updated_at: Timestamp,
}

/// The authenticated account as returned by the identity service.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRow {
    pub id: RecordId,
    pub email: Option<String>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = BackendError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let role = match row.role.as_deref() {
            None => Role::Client,
            Some(name) => Role::from_name(name).map_err(|e| BackendError::Decode(e.to_string()))?,
        };

        Ok(Profile {
            id: required(row.id, "profiles", "id")?,
            username: row.username,
            avatar_url: row.avatar_url,
            role,
        })
    }
}
