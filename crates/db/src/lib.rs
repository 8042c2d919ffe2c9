//! REST access to the hosted backend.
//!
//! Implements the collaborator traits of `lumen_core::store` against a
//! PostgREST-style table API, an object store and an identity service that
//! all live behind one base URL. Every request carries the project's anon key
//! and, for user-scoped accessors, the caller's bearer token so row-level
//! policies apply on the server.

pub mod backend;
pub mod client;
pub mod error;
pub mod identity;
pub mod models;
pub mod repositories;

pub use backend::RestBackend;
pub use client::BackendClient;
pub use error::BackendError;

/// Check that the backend is reachable.
pub async fn health_check(client: &BackendClient) -> Result<(), BackendError> {
    client.health().await
}
