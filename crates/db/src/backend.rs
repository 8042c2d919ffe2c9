//! [`Backend`] implementation over the REST client.

use std::sync::Arc;

use async_trait::async_trait;
use lumen_core::error::CoreError;
use lumen_core::profile::UserContext;
use lumen_core::retry::RetryPolicy;
use lumen_core::store::{
    Backend, IdentityProvider, MediaCatalog, PlaylistStore, ProfileStore, ScreenStore,
};

use crate::client::BackendClient;
use crate::identity::RestIdentity;
use crate::repositories::{MediaRepo, PlaylistRepo, ProfileRepo, ScreenRepo};

/// Hands out repositories scoped to the calling user's token.
pub struct RestBackend {
    client: BackendClient,
    role_lookup: RetryPolicy,
}

impl RestBackend {
    pub fn new(client: BackendClient, role_lookup: RetryPolicy) -> Self {
        Self {
            client,
            role_lookup,
        }
    }

    fn scoped(&self, ctx: &UserContext) -> BackendClient {
        self.client.for_token(&ctx.access_token)
    }
}

#[async_trait]
impl Backend for RestBackend {
    fn playlists(&self, ctx: &UserContext) -> Arc<dyn PlaylistStore> {
        Arc::new(PlaylistRepo::new(self.scoped(ctx)))
    }

    fn media(&self, ctx: &UserContext) -> Arc<dyn MediaCatalog> {
        Arc::new(MediaRepo::new(self.scoped(ctx)))
    }

    fn screens(&self, ctx: &UserContext) -> Arc<dyn ScreenStore> {
        Arc::new(ScreenRepo::new(self.scoped(ctx)))
    }

    fn profiles(&self, ctx: &UserContext) -> Arc<dyn ProfileStore> {
        Arc::new(ProfileRepo::new(self.scoped(ctx)))
    }

    fn identity(&self) -> Arc<dyn IdentityProvider> {
        Arc::new(RestIdentity::new(self.client.clone(), self.role_lookup.clone()))
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.client).await?;
        Ok(())
    }
}
