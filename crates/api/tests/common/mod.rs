#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use lumen_api::config::ServerConfig;
use lumen_api::router::build_app_router;
use lumen_api::sessions::EditorSessions;
use lumen_api::state::AppState;
use lumen_core::error::CoreError;
use lumen_core::media::{validate_media_mime, MediaAsset, MediaKind, UploadFile};
use lumen_core::playlist::{Playlist, PlaylistItem};
use lumen_core::profile::{Profile, UserContext};
use lumen_core::roles::Role;
use lumen_core::screen::{Screen, ScreenStatus};
use lumen_core::store::{
    Backend, IdentityProvider, MediaCatalog, PlaylistStore, ProfileStore, ScreenStore,
};
use lumen_core::types::RecordId;
use lumen_core::validation::{
    normalize_pairing_code, validate_playlist_name, validate_screen_name, validate_username,
};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const EDITOR_TOKEN: &str = "editor-token";
pub const OTHER_EDITOR_TOKEN: &str = "other-editor-token";
pub const CLIENT_TOKEN: &str = "client-token";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        backend_url: "http://backend.test".to_string(),
        backend_anon_key: "anon".to_string(),
        role_lookup_max_attempts: 1,
        session_idle_timeout_secs: 3600,
        session_sweep_interval_secs: 60,
        max_upload_mb: 1,
    }
}

/// Build the full application router over an in-memory backend.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app(backend: Arc<FakeBackend>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        backend,
        sessions: Arc::new(EditorSessions::new()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Send a multipart form with one part per `(file name, content type, bytes)`.
pub async fn post_multipart(
    app: &Router,
    uri: &str,
    token: &str,
    files: &[(&str, &str, &[u8])],
) -> Response<Body> {
    let boundary = "lumen-test-boundary";
    let mut body = Vec::new();
    for (name, content_type, bytes) in files {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"files\"; filename=\"{name}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Read the response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the JSON body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeData {
    pub media: Vec<MediaAsset>,
    pub playlists: Vec<Playlist>,
    pub screens: Vec<Screen>,
    pub profiles: Vec<Profile>,
    pub passwords: HashMap<RecordId, String>,
    /// When set, `replace_items` fails with a storage error.
    pub fail_saves: bool,
    /// Uploads of files with this name fail with a storage error.
    pub fail_upload_named: Option<String>,
    pub backend_down: bool,
}

/// In-memory stand-in for the hosted backend.
pub struct FakeBackend {
    pub data: Arc<Mutex<FakeData>>,
    users: HashMap<&'static str, UserContext>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        let users = [
            (ADMIN_TOKEN, Role::Admin),
            (EDITOR_TOKEN, Role::Editor),
            (OTHER_EDITOR_TOKEN, Role::Editor),
            (CLIENT_TOKEN, Role::Client),
        ]
        .into_iter()
        .map(|(token, role)| {
            let ctx = UserContext {
                user_id: uuid::Uuid::new_v4(),
                email: Some(format!("{token}@example.test")),
                role,
                access_token: token.to_string(),
            };
            (token, ctx)
        })
        .collect();

        Arc::new(Self {
            data: Arc::new(Mutex::new(FakeData::default())),
            users,
        })
    }

    pub fn user_id(&self, token: &str) -> RecordId {
        self.users[token].user_id
    }

    pub fn seed_media(&self, title: &str, kind: MediaKind, size_bytes: u64) -> MediaAsset {
        let asset = MediaAsset {
            id: uuid::Uuid::new_v4(),
            title: title.to_string(),
            kind,
            url: format!("http://backend.test/storage/v1/object/public/media/{title}"),
            size_bytes,
            created_at: chrono::Utc::now(),
            owner_id: None,
        };
        self.data.lock().unwrap().media.insert(0, asset.clone());
        asset
    }

    pub fn seed_playlist(&self, name: &str, items: Vec<PlaylistItem>) -> Playlist {
        let playlist = Playlist {
            id: uuid::Uuid::new_v4(),
            name: name.to_string(),
            items,
            owner_id: None,
            created_at: chrono::Utc::now(),
            updated_at: None,
        };
        self.data.lock().unwrap().playlists.insert(0, playlist.clone());
        playlist
    }

    pub fn seed_screen(&self, name: &str, status: ScreenStatus, assigned_to: RecordId) -> Screen {
        let screen = Screen {
            id: uuid::Uuid::new_v4(),
            name: name.to_string(),
            pairing_code: None,
            status,
            playlist_id: None,
            playlist_name: None,
            assigned_to: Some(assigned_to),
            last_seen: Some(chrono::Utc::now()),
            created_at: chrono::Utc::now(),
        };
        self.data.lock().unwrap().screens.insert(0, screen.clone());
        screen
    }

    pub fn playlist(&self, id: RecordId) -> Option<Playlist> {
        self.data
            .lock()
            .unwrap()
            .playlists
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    fn store(&self) -> FakeStore {
        FakeStore {
            data: Arc::clone(&self.data),
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    fn playlists(&self, _ctx: &UserContext) -> Arc<dyn PlaylistStore> {
        Arc::new(self.store())
    }

    fn media(&self, _ctx: &UserContext) -> Arc<dyn MediaCatalog> {
        Arc::new(self.store())
    }

    fn screens(&self, _ctx: &UserContext) -> Arc<dyn ScreenStore> {
        Arc::new(self.store())
    }

    fn profiles(&self, _ctx: &UserContext) -> Arc<dyn ProfileStore> {
        Arc::new(self.store())
    }

    fn identity(&self) -> Arc<dyn IdentityProvider> {
        Arc::new(FakeIdentity {
            users: self.users.clone(),
            data: Arc::clone(&self.data),
        })
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        if self.data.lock().unwrap().backend_down {
            return Err(CoreError::Storage("backend unreachable".into()));
        }
        Ok(())
    }
}

/// One shared store implementing every table accessor.
struct FakeStore {
    data: Arc<Mutex<FakeData>>,
}

fn storage_error(what: &str) -> CoreError {
    CoreError::Storage(format!("Backend API error (503): {what} unavailable"))
}

#[async_trait]
impl PlaylistStore for FakeStore {
    async fn create(&self, name: &str, owner_id: RecordId) -> Result<Playlist, CoreError> {
        let name = validate_playlist_name(name)?;
        let playlist = Playlist {
            id: uuid::Uuid::new_v4(),
            name,
            items: Vec::new(),
            owner_id: Some(owner_id),
            created_at: chrono::Utc::now(),
            updated_at: None,
        };
        self.data.lock().unwrap().playlists.insert(0, playlist.clone());
        Ok(playlist)
    }

    async fn list(&self) -> Result<Vec<Playlist>, CoreError> {
        Ok(self.data.lock().unwrap().playlists.clone())
    }

    async fn get(&self, id: RecordId) -> Result<Playlist, CoreError> {
        self.data
            .lock()
            .unwrap()
            .playlists
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "Playlist",
                id,
            })
    }

    async fn replace_items(&self, id: RecordId, items: &[PlaylistItem]) -> Result<(), CoreError> {
        let mut data = self.data.lock().unwrap();
        if data.fail_saves {
            return Err(storage_error("playlists"));
        }
        let playlist = data
            .playlists
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CoreError::NotFound {
                entity: "Playlist",
                id,
            })?;
        playlist.items = items.to_vec();
        playlist.updated_at = Some(chrono::Utc::now());
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> Result<(), CoreError> {
        self.data.lock().unwrap().playlists.retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait]
impl MediaCatalog for FakeStore {
    async fn upload(&self, owner_id: RecordId, file: &UploadFile) -> Result<MediaAsset, CoreError> {
        validate_media_mime(&file.mime_type)?;
        let mut data = self.data.lock().unwrap();
        if data.fail_upload_named.as_deref() == Some(file.name.as_str()) {
            return Err(storage_error("storage"));
        }
        let asset = MediaAsset {
            id: uuid::Uuid::new_v4(),
            title: file.name.clone(),
            kind: MediaKind::from_mime(&file.mime_type),
            url: format!("http://backend.test/storage/v1/object/public/media/{}", file.name),
            size_bytes: file.byte_size(),
            created_at: chrono::Utc::now(),
            owner_id: Some(owner_id),
        };
        data.media.insert(0, asset.clone());
        Ok(asset)
    }

    async fn list(&self) -> Result<Vec<MediaAsset>, CoreError> {
        Ok(self.data.lock().unwrap().media.clone())
    }

    async fn delete(&self, id: RecordId, _url: &str) -> Result<(), CoreError> {
        self.data.lock().unwrap().media.retain(|m| m.id != id);
        Ok(())
    }
}

#[async_trait]
impl ScreenStore for FakeStore {
    async fn list(&self) -> Result<Vec<Screen>, CoreError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .screens
            .iter()
            .cloned()
            .map(|mut screen| {
                screen.playlist_name = screen.playlist_id.and_then(|id| {
                    data.playlists
                        .iter()
                        .find(|p| p.id == id)
                        .map(|p| p.name.clone())
                });
                screen
            })
            .collect())
    }

    async fn list_assigned_to(&self, user_id: RecordId) -> Result<Vec<Screen>, CoreError> {
        Ok(ScreenStore::list(self)
            .await?
            .into_iter()
            .filter(|s| s.assigned_to == Some(user_id))
            .collect())
    }

    async fn pair(
        &self,
        name: &str,
        pairing_code: &str,
        owner_id: RecordId,
    ) -> Result<Screen, CoreError> {
        let screen = Screen {
            id: uuid::Uuid::new_v4(),
            name: validate_screen_name(name)?,
            pairing_code: Some(normalize_pairing_code(pairing_code)?),
            status: ScreenStatus::Offline,
            playlist_id: None,
            playlist_name: None,
            assigned_to: Some(owner_id),
            last_seen: None,
            created_at: chrono::Utc::now(),
        };
        self.data.lock().unwrap().screens.insert(0, screen.clone());
        Ok(screen)
    }

    async fn assign_playlist(
        &self,
        screen_id: RecordId,
        playlist_id: Option<RecordId>,
    ) -> Result<(), CoreError> {
        let mut data = self.data.lock().unwrap();
        let screen = data
            .screens
            .iter_mut()
            .find(|s| s.id == screen_id)
            .ok_or(CoreError::NotFound {
                entity: "Screen",
                id: screen_id,
            })?;
        screen.playlist_id = playlist_id;
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> Result<(), CoreError> {
        self.data.lock().unwrap().screens.retain(|s| s.id != id);
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for FakeStore {
    async fn get(&self, user_id: RecordId) -> Result<Option<Profile>, CoreError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .profiles
            .iter()
            .find(|p| p.id == user_id)
            .cloned())
    }

    async fn list_clients(&self) -> Result<Vec<Profile>, CoreError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .profiles
            .iter()
            .filter(|p| p.role == Role::Client)
            .cloned()
            .collect())
    }

    async fn update_username(
        &self,
        user_id: RecordId,
        username: &str,
    ) -> Result<Profile, CoreError> {
        let username = validate_username(username)?;
        let mut data = self.data.lock().unwrap();
        let profile = upsert_profile(&mut data, user_id);
        profile.username = Some(username);
        Ok(profile.clone())
    }

    async fn upload_avatar(
        &self,
        user_id: RecordId,
        file: &UploadFile,
    ) -> Result<Profile, CoreError> {
        validate_media_mime(&file.mime_type)?;
        let mut data = self.data.lock().unwrap();
        let profile = upsert_profile(&mut data, user_id);
        profile.avatar_url = Some(format!(
            "http://backend.test/storage/v1/object/public/avatars/{user_id}-{}",
            file.name
        ));
        Ok(profile.clone())
    }
}

fn upsert_profile(data: &mut FakeData, user_id: RecordId) -> &mut Profile {
    if let Some(index) = data.profiles.iter().position(|p| p.id == user_id) {
        return &mut data.profiles[index];
    }
    data.profiles.push(Profile {
        id: user_id,
        username: None,
        avatar_url: None,
        role: Role::Client,
    });
    let last = data.profiles.len() - 1;
    &mut data.profiles[last]
}

struct FakeIdentity {
    users: HashMap<&'static str, UserContext>,
    data: Arc<Mutex<FakeData>>,
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn resolve(&self, access_token: &str) -> Result<UserContext, CoreError> {
        self.users
            .get(access_token)
            .cloned()
            .ok_or_else(|| CoreError::Unauthorized("Invalid or expired token".into()))
    }

    async fn update_password(&self, ctx: &UserContext, password: &str) -> Result<(), CoreError> {
        self.data
            .lock()
            .unwrap()
            .passwords
            .insert(ctx.user_id, password.to_string());
        Ok(())
    }
}
