//! `RestIdentity` against a local stub backend: role lookup retries and
//! error propagation.

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::StubBackend;
use lumen_core::error::CoreError;
use lumen_core::retry::RetryPolicy;
use lumen_core::roles::Role;
use lumen_core::store::IdentityProvider;
use lumen_db::identity::RestIdentity;
use serde_json::json;

const USER: &str = "GET /auth/v1/user";
const PROFILES: &str = "GET /rest/v1/profiles";

fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(2),
        multiplier: 2.0,
    }
}

async fn identity_with_user() -> (std::sync::Arc<StubBackend>, RestIdentity) {
    let (stub, client) = StubBackend::start().await;
    stub.reply(
        USER,
        StatusCode::OK,
        json!({ "id": "6f1c2d3e-0000-4000-8000-0000000000aa", "email": "a@example.com" }),
    );
    (stub, RestIdentity::new(client, fast_policy(3)))
}

#[tokio::test]
async fn resolves_role_from_profile() {
    let (stub, identity) = identity_with_user().await;
    stub.reply(PROFILES, StatusCode::OK, json!([{ "role": "admin" }]));

    let ctx = identity.resolve("token").await.unwrap();

    assert_eq!(ctx.role, Role::Admin);
    assert_eq!(ctx.email.as_deref(), Some("a@example.com"));
    assert_eq!(stub.count(PROFILES), 1);
}

#[tokio::test]
async fn late_profile_is_picked_up_on_retry() {
    let (stub, identity) = identity_with_user().await;
    stub.reply_once(PROFILES, StatusCode::OK, json!([]));
    stub.reply(PROFILES, StatusCode::OK, json!([{ "role": "editor" }]));

    let ctx = identity.resolve("token").await.unwrap();

    assert_eq!(ctx.role, Role::Editor);
    assert_eq!(stub.count(PROFILES), 2);
}

#[tokio::test]
async fn missing_profile_falls_back_to_client() {
    let (stub, identity) = identity_with_user().await;
    stub.reply(PROFILES, StatusCode::OK, json!([]));

    let ctx = identity.resolve("token").await.unwrap();

    assert_eq!(ctx.role, Role::Client);
    assert_eq!(stub.count(PROFILES), 3);
}

#[tokio::test]
async fn backend_failure_is_not_a_missing_profile() {
    let (stub, identity) = identity_with_user().await;
    stub.reply(
        PROFILES,
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "message": "db down" }),
    );

    let result = identity.resolve("token").await;

    assert_matches!(result, Err(CoreError::Storage(msg)) if msg.contains("db down"));
    assert_eq!(stub.count(PROFILES), 1);
}

#[tokio::test]
async fn rejected_token_is_unauthorized() {
    let (stub, client) = StubBackend::start().await;
    stub.reply(USER, StatusCode::UNAUTHORIZED, json!({ "msg": "bad jwt" }));
    let identity = RestIdentity::new(client, fast_policy(3));

    let result = identity.resolve("token").await;

    assert_matches!(result, Err(CoreError::Unauthorized(_)));
    assert_eq!(stub.count(PROFILES), 0);
}
