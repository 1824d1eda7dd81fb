//! In-process fake backend for the end-to-end tests.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use parking_lot::Mutex;
use passage::SessionClient;
use passage_infrastructure::{ClientConfig, FileTokenStore};
use serde_json::{Value, json};
use tempfile::TempDir;
use url::Url;

/// A request the backend received.
#[derive(Debug, Clone)]
pub struct Seen {
    pub path: &'static str,
    pub headers: Vec<(String, String)>,
}

impl Seen {
    /// Every value sent for `name`, in order.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn authorization(&self) -> Option<&str> {
        self.values("authorization").first().copied()
    }
}

struct Account {
    user: Value,
    password: String,
    token: String,
}

#[derive(Default)]
struct Inner {
    accounts: HashMap<String, Account>,
    sessions: HashMap<String, Value>,
    seen: Vec<Seen>,
    next_id: i64,
    down: bool,
}

/// Backend implementing `/register`, `/signin`, `/checksession` plus a
/// protected and a public route.
#[derive(Clone, Default)]
pub struct FakeBackend {
    inner: Arc<Mutex<Inner>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.inner.lock().next_id = 100;
        backend
    }

    /// Adds an account whose sign-in issues `token`.
    pub fn seed(&self, id: i64, name: &str, email: &str, password: &str, token: &str) {
        self.inner.lock().accounts.insert(
            email.to_string(),
            Account {
                user: json!({"id": id, "name": name}),
                password: password.to_string(),
                token: token.to_string(),
            },
        );
    }

    /// Invalidates `token` as if it had expired.
    pub fn revoke(&self, token: &str) {
        self.inner.lock().sessions.remove(token);
    }

    /// Makes every endpoint answer 503.
    pub fn set_down(&self, down: bool) {
        self.inner.lock().down = down;
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.inner.lock().seen.clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.inner
            .lock()
            .seen
            .iter()
            .filter(|s| s.path == path)
            .count()
    }

    pub fn last(&self, path: &str) -> Seen {
        self.seen()
            .into_iter()
            .rev()
            .find(|s| s.path == path)
            .unwrap()
    }

    /// Serves on an ephemeral local port and returns the base URL.
    pub async fn spawn(&self) -> Url {
        let router = Router::new()
            .route("/register", post(register))
            .route("/signin", post(sign_in))
            .route("/checksession", get(check_session))
            .route("/protected", get(protected))
            .route("/public", get(public))
            .with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    fn record(&self, path: &'static str, headers: &HeaderMap) -> bool {
        let headers = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let mut inner = self.inner.lock();
        inner.seen.push(Seen { path, headers });
        inner.down
    }

    fn session_user(&self, headers: &HeaderMap) -> Option<Value> {
        let token = headers
            .get("authorization")?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?;
        self.inner.lock().sessions.get(token).cloned()
    }
}

fn unavailable() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({"message": "maintenance"})),
    )
        .into_response()
}

async fn register(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if backend.record("/register", &headers) {
        return unavailable();
    }
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let mut inner = backend.inner.lock();
    if email.is_empty() || inner.accounts.contains_key(&email) {
        return (
            StatusCode::CONFLICT,
            Json(json!({"message": "email already registered"})),
        )
            .into_response();
    }
    inner.next_id += 1;
    let id = inner.next_id;
    inner.accounts.insert(
        email.clone(),
        Account {
            user: json!({"id": id, "name": body["name"]}),
            password: body["password"].as_str().unwrap_or_default().to_string(),
            token: format!("tok-{id}"),
        },
    );
    (StatusCode::CREATED, Json(json!({"message": "created"}))).into_response()
}

async fn sign_in(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if backend.record("/signin", &headers) {
        return unavailable();
    }
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let mut inner = backend.inner.lock();
    let Some(account) = inner.accounts.get(email) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "invalid credentials"})),
        )
            .into_response();
    };
    if account.password != password {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "invalid credentials"})),
        )
            .into_response();
    }
    let user = account.user.clone();
    let token = account.token.clone();
    inner.sessions.insert(token.clone(), user.clone());
    Json(json!({"user": user, "token": token})).into_response()
}

async fn check_session(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    if backend.record("/checksession", &headers) {
        return unavailable();
    }
    match backend.session_user(&headers) {
        Some(user) => Json(user).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid token"})),
        )
            .into_response(),
    }
}

async fn protected(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    if backend.record("/protected", &headers) {
        return unavailable();
    }
    match backend.session_user(&headers) {
        Some(_) => "secret data".into_response(),
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn public(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    backend.record("/public", &headers);
    "hello".into_response()
}

/// A client for `base_url` with its token file inside `dir`.
pub fn client_for(base_url: &Url, dir: &TempDir) -> SessionClient {
    SessionClient::from_config(&config_for(base_url, dir)).unwrap()
}

pub fn config_for(base_url: &Url, dir: &TempDir) -> ClientConfig {
    ClientConfig {
        base_url: base_url.to_string(),
        timeout_ms: 5_000,
        store_path: Some(dir.path().join("store.json")),
        ..ClientConfig::default()
    }
}

/// The token store the client in `dir` uses, opened independently.
pub fn store_in(dir: &TempDir) -> FileTokenStore {
    FileTokenStore::at(dir.path().join("store.json"))
}
