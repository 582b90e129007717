use std::{
    collections::HashMap,
    sync::{Arc, Mutex as StdMutex},
};

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use shared::{
    domain::{DeleteOutcome, ShortKey, ShortenResult, UNKNOWN_COUNT},
    error::ShortenerError,
};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    gateway::ShortenerApi,
    view::{ClipboardWriter, View},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ViewEvent {
    Count(i64),
    Result(Option<ShortenResult>),
    Notification(Option<String>),
}

#[derive(Default)]
pub(crate) struct RecordingView {
    events: StdMutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub(crate) fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().expect("view lock").clone()
    }

    pub(crate) fn last_count(&self) -> Option<i64> {
        self.events().into_iter().rev().find_map(|event| match event {
            ViewEvent::Count(count) => Some(count),
            _ => None,
        })
    }

    pub(crate) fn panel(&self) -> Option<ShortenResult> {
        self.events()
            .into_iter()
            .rev()
            .find_map(|event| match event {
                ViewEvent::Result(result) => Some(result),
                _ => None,
            })
            .flatten()
    }

    pub(crate) fn notification(&self) -> Option<String> {
        self.events()
            .into_iter()
            .rev()
            .find_map(|event| match event {
                ViewEvent::Notification(message) => Some(message),
                _ => None,
            })
            .flatten()
    }

    pub(crate) fn count_events(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, ViewEvent::Count(_)))
            .count()
    }

    pub(crate) fn result_events(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, ViewEvent::Result(_)))
            .count()
    }
}

impl View for RecordingView {
    fn set_count(&self, count: i64) {
        self.events
            .lock()
            .expect("view lock")
            .push(ViewEvent::Count(count));
    }

    fn set_result(&self, result: Option<&ShortenResult>) {
        self.events
            .lock()
            .expect("view lock")
            .push(ViewEvent::Result(result.cloned()));
    }

    fn set_notification(&self, message: Option<&str>) {
        self.events
            .lock()
            .expect("view lock")
            .push(ViewEvent::Notification(message.map(str::to_string)));
    }
}

#[derive(Default)]
pub(crate) struct FakeClipboard {
    pub(crate) fail_with: Option<String>,
    pub(crate) written: StdMutex<Vec<String>>,
}

impl FakeClipboard {
    pub(crate) fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            written: StdMutex::new(Vec::new()),
        }
    }

    pub(crate) fn written(&self) -> Vec<String> {
        self.written.lock().expect("clipboard lock").clone()
    }
}

impl ClipboardWriter for FakeClipboard {
    fn write_text(&self, text: &str) -> Result<(), ShortenerError> {
        if let Some(reason) = &self.fail_with {
            return Err(ShortenerError::Clipboard(reason.clone()));
        }
        self.written
            .lock()
            .expect("clipboard lock")
            .push(text.to_string());
        Ok(())
    }
}

/// Scripted gateway: answers from queued values and counts calls.
pub(crate) struct FakeApi {
    pub(crate) count: StdMutex<i64>,
    pub(crate) shorten_reply: StdMutex<Option<Result<ShortenResult, ShortenerError>>>,
    pub(crate) delete_reply: StdMutex<DeleteOutcome>,
    pub(crate) resolve_reply: StdMutex<Result<Option<String>, ShortenerError>>,
    pub(crate) shorten_calls: StdMutex<Vec<String>>,
    pub(crate) remove_calls: StdMutex<Vec<ShortKey>>,
    pub(crate) count_calls: StdMutex<usize>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            count: StdMutex::new(UNKNOWN_COUNT),
            shorten_reply: StdMutex::new(None),
            delete_reply: StdMutex::new(DeleteOutcome::Deleted),
            resolve_reply: StdMutex::new(Ok(None)),
            shorten_calls: StdMutex::new(Vec::new()),
            remove_calls: StdMutex::new(Vec::new()),
            count_calls: StdMutex::new(0),
        }
    }
}

impl FakeApi {
    pub(crate) fn with_count(self, count: i64) -> Self {
        *self.count.lock().expect("lock") = count;
        self
    }

    pub(crate) fn reply_shorten(&self, reply: Result<ShortenResult, ShortenerError>) {
        *self.shorten_reply.lock().expect("lock") = Some(reply);
    }

    pub(crate) fn reply_delete(&self, outcome: DeleteOutcome) {
        *self.delete_reply.lock().expect("lock") = outcome;
    }

    pub(crate) fn reply_resolve(&self, reply: Result<Option<String>, ShortenerError>) {
        *self.resolve_reply.lock().expect("lock") = reply;
    }

    pub(crate) fn set_count(&self, count: i64) {
        *self.count.lock().expect("lock") = count;
    }

    pub(crate) fn count_calls(&self) -> usize {
        *self.count_calls.lock().expect("lock")
    }

    pub(crate) fn shorten_calls(&self) -> Vec<String> {
        self.shorten_calls.lock().expect("lock").clone()
    }

    pub(crate) fn remove_calls(&self) -> Vec<ShortKey> {
        self.remove_calls.lock().expect("lock").clone()
    }
}

#[async_trait]
impl ShortenerApi for FakeApi {
    async fn fetch_count(&self) -> i64 {
        *self.count_calls.lock().expect("lock") += 1;
        *self.count.lock().expect("lock")
    }

    async fn shorten(&self, long_url: &str) -> Result<ShortenResult, ShortenerError> {
        if long_url.trim().is_empty() {
            return Err(ShortenerError::validation("Please enter a valid URL."));
        }
        self.shorten_calls
            .lock()
            .expect("lock")
            .push(long_url.to_string());
        self.shorten_reply
            .lock()
            .expect("lock")
            .clone()
            .unwrap_or_else(|| Err(ShortenerError::Network("no scripted reply".into())))
    }

    async fn remove(&self, key: &ShortKey) -> DeleteOutcome {
        self.remove_calls.lock().expect("lock").push(key.clone());
        *self.delete_reply.lock().expect("lock")
    }

    async fn resolve(&self, _key: &ShortKey) -> Result<Option<String>, ShortenerError> {
        self.resolve_reply.lock().expect("lock").clone()
    }
}

pub(crate) fn sample_result(key: &str, created: bool) -> ShortenResult {
    ShortenResult {
        key: ShortKey::new(key),
        short_url: format!("localhost:8080/{key}"),
        created,
        long_url: Some("https://example.com".to_string()),
    }
}

/// In-process stand-in for the shortening backend.
#[derive(Default)]
pub(crate) struct BackendState {
    pub(crate) links: HashMap<String, String>,
    pub(crate) next_id: usize,
    pub(crate) requests: usize,
    pub(crate) last_post_body: Option<Value>,
    pub(crate) post_override: Option<(StatusCode, String)>,
    pub(crate) delete_override: Option<StatusCode>,
    pub(crate) lookup_override: Option<StatusCode>,
    pub(crate) ping_body: Option<String>,
}

#[derive(Clone, Default)]
pub(crate) struct FakeBackend {
    pub(crate) state: Arc<Mutex<BackendState>>,
}

async fn ping(State(backend): State<FakeBackend>) -> Response {
    let mut state = backend.state.lock().await;
    state.requests += 1;
    match &state.ping_body {
        Some(body) => (StatusCode::OK, body.clone()).into_response(),
        None => Json(json!({ "count": state.links.len() })).into_response(),
    }
}

async fn create(State(backend): State<FakeBackend>, body: String) -> Response {
    let mut state = backend.state.lock().await;
    state.requests += 1;
    let payload: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    state.last_post_body = Some(payload.clone());
    if let Some((status, body)) = state.post_override.clone() {
        return (status, body).into_response();
    }
    let Some(long_url) = payload.get("url").and_then(Value::as_str).map(str::to_string) else {
        return (StatusCode::BAD_REQUEST, "\"Only 1 key allowed: 'url'\"\r\n").into_response();
    };
    if long_url.is_empty() {
        return (StatusCode::BAD_REQUEST, "\"Empty URL\"\r\n").into_response();
    }
    if let Some(key) = state
        .links
        .iter()
        .find_map(|(key, url)| (url == &long_url).then(|| key.clone()))
    {
        return (StatusCode::OK, Json(link_body(&key, &long_url))).into_response();
    }
    state.next_id += 1;
    let key = format!("k{}", state.next_id);
    state.links.insert(key.clone(), long_url.clone());
    (StatusCode::CREATED, Json(link_body(&key, &long_url))).into_response()
}

fn link_body(key: &str, long_url: &str) -> Value {
    json!({
        "key": key,
        "long_url": long_url,
        "short_url": format!("localhost:8080/{key}"),
    })
}

async fn lookup(State(backend): State<FakeBackend>, Path(key): Path<String>) -> Response {
    let mut state = backend.state.lock().await;
    state.requests += 1;
    if let Some(status) = state.lookup_override {
        return (status, "\"lookup unavailable\"").into_response();
    }
    match state.links.get(&key) {
        Some(long_url) => (StatusCode::FOUND, [(header::LOCATION, long_url.clone())]).into_response(),
        None => (StatusCode::NOT_FOUND, "\"URL not found\"\r\n").into_response(),
    }
}

async fn remove(State(backend): State<FakeBackend>, Path(key): Path<String>) -> Response {
    let mut state = backend.state.lock().await;
    state.requests += 1;
    if let Some(status) = state.delete_override {
        return status.into_response();
    }
    match state.links.remove(&key) {
        Some(_) => StatusCode::OK.into_response(),
        None => (StatusCode::NOT_FOUND, "\"URL Not found\"\r\n").into_response(),
    }
}

pub(crate) async fn spawn_backend() -> (String, FakeBackend) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let backend = FakeBackend::default();
    let app = Router::new()
        .route("/", axum::routing::post(create))
        .route("/ping", get(ping))
        .route("/:key", get(lookup).delete(remove))
        .with_state(backend.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), backend)
}

/// Address that refuses connections.
pub(crate) async fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}
