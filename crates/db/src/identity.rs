//! Identity service access: token resolution and credential changes.

use async_trait::async_trait;
use lumen_core::error::CoreError;
use lumen_core::profile::UserContext;
use lumen_core::retry::{retry_until_some, RetryPolicy};
use lumen_core::roles::Role;
use lumen_core::store::IdentityProvider;
use lumen_core::types::RecordId;
use lumen_core::validation::MIN_PASSWORD_LEN;

use crate::client::{eq, BackendClient, Query};
use crate::models::profile::{RoleRow, UserRow};

pub struct RestIdentity {
    client: BackendClient,
    role_lookup: RetryPolicy,
}

impl RestIdentity {
    pub fn new(client: BackendClient, role_lookup: RetryPolicy) -> Self {
        Self {
            client,
            role_lookup,
        }
    }

    /// Look up the role of `user_id`, retrying while the profile row is
    /// absent. Falls back to [`Role::Client`] only when the row never shows
    /// up; a failing backend is an error, not a missing profile.
    async fn lookup_role(
        &self,
        scoped: &BackendClient,
        user_id: RecordId,
    ) -> Result<Role, CoreError> {
        let query: Query = vec![("select", "role".to_string()), ("id", eq(user_id))];

        let found = retry_until_some(&self.role_lookup, |attempt| {
            let query = &query;
            async move {
                match scoped.select::<RoleRow>("profiles", query).await {
                    Ok(rows) => rows.into_iter().next().map(|row| Ok(row.role)),
                    Err(e) => {
                        tracing::warn!(%user_id, attempt, error = %e, "Role lookup failed");
                        Some(Err(e))
                    }
                }
            }
        })
        .await
        .transpose()?;

        let role = match found {
            Some(Some(name)) => Role::from_name(&name).unwrap_or_else(|e| {
                tracing::warn!(%user_id, error = %e, "Unrecognized role, using client");
                Role::Client
            }),
            Some(None) => {
                tracing::warn!(%user_id, "Profile has no role, using client");
                Role::Client
            }
            None => {
                tracing::warn!(%user_id, "Profile not found, using client role");
                Role::Client
            }
        };
        Ok(role)
    }
}

#[async_trait]
impl IdentityProvider for RestIdentity {
    async fn resolve(&self, access_token: &str) -> Result<UserContext, CoreError> {
        let scoped = self.client.for_token(access_token);
        let user: UserRow = scoped.get_user().await.map_err(|e| match CoreError::from(e) {
            CoreError::Unauthorized(_) => {
                CoreError::Unauthorized("Invalid or expired token".into())
            }
            other => other,
        })?;

        let role = self.lookup_role(&scoped, user.id).await?;

        Ok(UserContext {
            user_id: user.id,
            email: user.email,
            role,
            access_token: access_token.to_string(),
        })
    }

    async fn update_password(&self, ctx: &UserContext, password: &str) -> Result<(), CoreError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CoreError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let body = serde_json::json!({ "password": password });
        self.client
            .for_token(&ctx.access_token)
            .update_user(&body)
            .await?;

        tracing::info!(user_id = %ctx.user_id, "Password updated");
        Ok(())
    }
}
