#![allow(dead_code)]

//! A local stand-in for the hosted backend.
//!
//! Serves every path from one fallback handler that records
//! `"{METHOD} {path}"` and answers with the first configured reply whose
//! route is a prefix of it, or `200 {}` when none matches.

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::{Json, Router};
use lumen_db::BackendClient;
use serde_json::{json, Value};

struct Reply {
    route: String,
    status: StatusCode,
    body: Value,
    once: bool,
}

#[derive(Default)]
pub struct StubBackend {
    requests: Mutex<Vec<String>>,
    replies: Mutex<Vec<Reply>>,
}

impl StubBackend {
    /// Bind to an ephemeral port and return the stub plus a client aimed at it.
    pub async fn start() -> (Arc<Self>, BackendClient) {
        let stub = Arc::new(Self::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&stub));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (stub, BackendClient::new(format!("http://{addr}"), "anon"))
    }

    /// Answer every request on `route` (e.g. `"POST /rest/v1/media"`).
    pub fn reply(&self, route: &str, status: StatusCode, body: Value) {
        self.push(route, status, body, false);
    }

    /// Answer only the next request on `route`.
    pub fn reply_once(&self, route: &str, status: StatusCode, body: Value) {
        self.push(route, status, body, true);
    }

    fn push(&self, route: &str, status: StatusCode, body: Value, once: bool) {
        self.replies.lock().unwrap().push(Reply {
            route: route.to_string(),
            status,
            body,
            once,
        });
    }

    /// Requests seen so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// How many requests started with `route`.
    pub fn count(&self, route: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.starts_with(route))
            .count()
    }
}

async fn handle(
    State(stub): State<Arc<StubBackend>>,
    method: Method,
    uri: Uri,
    _body: Bytes,
) -> (StatusCode, Json<Value>) {
    let seen = format!("{method} {}", uri.path());
    stub.requests.lock().unwrap().push(seen.clone());

    let mut replies = stub.replies.lock().unwrap();
    match replies.iter().position(|r| seen.starts_with(&r.route)) {
        Some(index) => {
            let (status, body) = (replies[index].status, replies[index].body.clone());
            if replies[index].once {
                replies.remove(index);
            }
            (status, Json(body))
        }
        None => (StatusCode::OK, Json(json!({}))),
    }
}
