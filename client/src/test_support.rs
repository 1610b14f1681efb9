//! Shared fixtures and a recording transport for unit tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Method;
use serde_json::Value;

use crate::error::ApiError;
use crate::net::api::{ApiRequest, ApiResponse, Transport};
use crate::net::types::{Role, Trip, TripStatus, User};
use crate::state::session::{Session, SessionStore};

// =============================================================================
// MockTransport
// =============================================================================

enum Reply {
    Respond(ApiResponse),
    NetworkDown(String),
}

/// Answers by `(method, path)`; unknown routes get a DRF-style 404.
/// Every request is recorded for later assertions.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<(Method, String), Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert((method, path.to_owned()), Reply::Respond(ApiResponse::new(status, body)));
        self
    }

    pub fn network_down(self, method: Method, path: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert((method, path.to_owned()), Reply::NetworkDown("connection refused".to_owned()));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self, method: &Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.method == method && r.path == path)
            .count()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let key = (request.method.clone(), request.path.clone());
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().get(&key) {
            Some(Reply::Respond(response)) => Ok(response.clone()),
            Some(Reply::NetworkDown(message)) => Err(ApiError::Network(message.clone())),
            None => Ok(ApiResponse::new(404, serde_json::json!({ "detail": "Not found." }))),
        }
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn rider() -> User {
    User {
        id: "1".to_owned(),
        username: "alice".to_owned(),
        first_name: "Alice".to_owned(),
        last_name: "Liddell".to_owned(),
        group: Role::Rider,
        photo: None,
    }
}

pub fn driver() -> User {
    User {
        id: "2".to_owned(),
        username: "bob".to_owned(),
        first_name: "Bob".to_owned(),
        last_name: "Driver".to_owned(),
        group: Role::Driver,
        photo: Some("/media/photos/bob.png".to_owned()),
    }
}

pub fn trip(id: &str, status: TripStatus) -> Trip {
    Trip {
        id: id.to_owned(),
        created: Some("2026-10-01T12:00:00Z".to_owned()),
        updated: Some("2026-10-01T12:05:00Z".to_owned()),
        pick_up_address: "123 Main Street".to_owned(),
        drop_off_address: "456 South Street".to_owned(),
        status,
        rider: Some(rider()),
        driver: (status != TripStatus::Requested).then(driver),
    }
}

pub fn trip_json(trip: &Trip) -> Value {
    serde_json::to_value(trip).unwrap()
}

pub fn session_for(user: User) -> SessionStore {
    let store = SessionStore::new();
    store.set(Session { user, token: "token-123".to_owned() });
    store
}

/// Unique path under the system temp dir; nothing is created.
pub fn temp_path(label: &str) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("rideshare-{label}-{}-{n}.json", std::process::id()))
}
