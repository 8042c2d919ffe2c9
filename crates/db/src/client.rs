//! HTTP client for the hosted backend.
//!
//! Wraps the three services the backend exposes under one base URL:
//!
//! - `/rest/v1/{table}`: PostgREST table API
//! - `/storage/v1/object/{bucket}/{path}`: object store
//! - `/auth/v1/*`: identity service
//!
//! Requests always carry the `apikey` header. The `Authorization` header holds
//! the caller's access token when the client is scoped with
//! [`BackendClient::for_token`], and the anon key otherwise.

use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::BackendError;

/// Media type that makes PostgREST return a single object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Query parameter list sent to PostgREST (`col=eq.value`, `order=...`).
pub type Query = Vec<(&'static str, String)>;

/// PostgREST equality filter value.
pub fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

/// HTTP client for one backend project.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .field("scoped", &self.access_token.is_some())
            .finish()
    }
}

impl BackendClient {
    /// Create a client for the project at `base_url`, e.g.
    /// `https://abc.backend.example`.
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, anon_key)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (shares the
    /// connection pool).
    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token: None,
        }
    }

    /// A copy of this client that acts as the user owning `access_token`.
    pub fn for_token(&self, access_token: &str) -> Self {
        Self {
            access_token: Some(access_token.to_string()),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- URLs ----

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    pub fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{bucket}/{path}", self.base_url)
    }

    /// Publicly readable URL of an object in a public bucket.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.base_url)
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    // ---- table API ----

    /// `GET /rest/v1/{table}` returning every matching row.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, BackendError> {
        let response = self
            .request(Method::GET, self.rest_url(table))
            .query(query)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `GET /rest/v1/{table}` expecting exactly one row. A miss surfaces as
    /// an API error with code `PGRST116`.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<T, BackendError> {
        let response = self
            .request(Method::GET, self.rest_url(table))
            .header(ACCEPT, SINGLE_OBJECT)
            .query(query)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `POST /rest/v1/{table}` returning the inserted row.
    pub async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let response = self
            .request(Method::POST, self.rest_url(table))
            .header("Prefer", "return=representation")
            .header(ACCEPT, SINGLE_OBJECT)
            .json(body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Insert, or merge into the row with the same primary key.
    pub async fn upsert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let response = self
            .request(Method::POST, self.rest_url(table))
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .header(ACCEPT, SINGLE_OBJECT)
            .json(body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `PATCH /rest/v1/{table}` returning the rows that were changed.
    pub async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
        body: &B,
    ) -> Result<Vec<T>, BackendError> {
        let response = self
            .request(Method::PATCH, self.rest_url(table))
            .header("Prefer", "return=representation")
            .query(query)
            .json(body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `DELETE /rest/v1/{table}` for every matching row.
    pub async fn delete(&self, table: &str, query: &Query) -> Result<(), BackendError> {
        let response = self
            .request(Method::DELETE, self.rest_url(table))
            .query(query)
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- object store ----

    /// Write a new object. Never overwrites an existing one.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        cache_control_secs: u32,
    ) -> Result<(), BackendError> {
        let response = self
            .request(Method::POST, self.object_url(bucket, path))
            .header(CONTENT_TYPE, content_type)
            .header(CACHE_CONTROL, format!("max-age={cache_control_secs}"))
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Remove objects by path.
    pub async fn remove_objects(&self, bucket: &str, paths: &[&str]) -> Result<(), BackendError> {
        let body = serde_json::json!({ "prefixes": paths });

        let response = self
            .request(
                Method::DELETE,
                format!("{}/storage/v1/object/{bucket}", self.base_url),
            )
            .json(&body)
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- identity ----

    /// `GET /auth/v1/user` for the scoped token.
    pub async fn get_user<T: DeserializeOwned>(&self) -> Result<T, BackendError> {
        let response = self.request(Method::GET, self.auth_url("user")).send().await?;
        Self::parse_response(response).await
    }

    /// `PUT /auth/v1/user` with attribute changes for the scoped token.
    pub async fn update_user<B: Serialize + ?Sized>(&self, body: &B) -> Result<(), BackendError> {
        let response = self
            .request(Method::PUT, self.auth_url("user"))
            .json(body)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// `GET /auth/v1/health`.
    pub async fn health(&self) -> Result<(), BackendError> {
        let response = self.request(Method::GET, self.auth_url("health")).send().await?;
        Self::check_status(response).await
    }

    // ---- private helpers ----

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        self.http
            .request(method, url)
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(bearer)
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`BackendError::Api`] carrying the status
    /// and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), BackendError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
