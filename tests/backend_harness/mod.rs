//! Fake storefront backend for client integration tests
//!
//! A small axum app on an ephemeral port that behaves like the dashboard's
//! REST API closely enough to exercise the reqwest client end to end:
//! per-resource response envelopes, `{message}` error bodies, sub-resource
//! verbs, multipart product uploads and the session cookie.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod backend_harness;
//! use backend_harness::*;
//!
//! let backend = FakeBackend::start().await;
//! backend.seed("tags", Envelope::Data, vec![json!({"_id": "t1", "name": "Sale"})]);
//! let api = backend.client();
//! ```

#![allow(dead_code)]

use axum::Router;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storefront::client::ApiClient;
use storefront::config::ApiConfig;
use tokio::net::TcpListener;

/// How list and single-record responses are wrapped
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope {
    /// `[...]` and `{...}`
    Bare,
    /// `{"success": true, "data": [...]}` and `{"success": true, "data": {...}}`
    Data,
}

/// How creates and updates answer once the write is stored
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WriteReply {
    /// The stored record, in the resource's envelope
    #[default]
    Echo,
    /// `{"message": "..."}` only
    Message,
    /// `204 No Content`
    Empty,
}

#[derive(Debug, Clone)]
pub struct Failure {
    pub status: StatusCode,
    pub message: Option<String>,
}

#[derive(Default)]
struct Resource {
    envelope: Option<Envelope>,
    records: Vec<Value>,
    writes: WriteReply,
    /// `(content type, body)` served for the list instead of the records
    raw_list: Option<(String, String)>,
}

#[derive(Default)]
struct BackendState {
    resources: HashMap<String, Resource>,
    failures: HashMap<String, Failure>,
    /// `METHOD path` of every request, in arrival order
    requests: Vec<String>,
    next_id: u64,
    last_upload: Option<Upload>,
}

/// What the last multipart request carried
#[derive(Debug, Clone, Default)]
pub struct Upload {
    pub fields: HashMap<String, String>,
    pub files: Vec<(String, usize)>,
}

type Shared = Arc<Mutex<BackendState>>;

pub struct FakeBackend {
    pub addr: SocketAddr,
    state: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState::default()));

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/logout", post(logout))
            .route("/api/{resource}", get(list).post(create))
            .route(
                "/api/{resource}/{id}",
                get(fetch_one).put(update).delete(remove),
            )
            .route(
                "/api/{resource}/{id}/{verb}",
                axum::routing::put(action).patch(action),
            )
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Small delay to let the server start
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: Some(format!("{}/", self.base_url())),
            timeout_secs: 5,
        })
        .unwrap()
    }

    pub fn seed(&self, resource: &str, envelope: Envelope, records: Vec<Value>) {
        let mut state = self.state.lock().unwrap();
        let entry = state.resources.entry(resource.to_string()).or_default();
        entry.envelope = Some(envelope);
        entry.records = records;
    }

    pub fn reply_to_writes(&self, resource: &str, reply: WriteReply) {
        let mut state = self.state.lock().unwrap();
        state.resources.entry(resource.to_string()).or_default().writes = reply;
    }

    /// Serve `body` as a 200 for `GET /api/{resource}` until [`restore_list`](Self::restore_list)
    pub fn serve_raw_list(&self, resource: &str, content_type: &str, body: &str) {
        let mut state = self.state.lock().unwrap();
        state.resources.entry(resource.to_string()).or_default().raw_list =
            Some((content_type.to_string(), body.to_string()));
    }

    pub fn restore_list(&self, resource: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(entry) = state.resources.get_mut(resource) {
            entry.raw_list = None;
        }
    }

    /// Every request to this resource fails until [`recover`](Self::recover)
    pub fn fail(&self, resource: &str, status: StatusCode, message: Option<&str>) {
        self.state.lock().unwrap().failures.insert(
            resource.to_string(),
            Failure {
                status,
                message: message.map(str::to_string),
            },
        );
    }

    pub fn recover(&self, resource: &str) {
        self.state.lock().unwrap().failures.remove(resource);
    }

    pub fn records(&self, resource: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .resources
            .get(resource)
            .map(|r| r.records.clone())
            .unwrap_or_default()
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_upload(&self) -> Option<Upload> {
        self.state.lock().unwrap().last_upload.clone()
    }
}

fn wrap(envelope: Envelope, body: Value) -> Value {
    match envelope {
        Envelope::Bare => body,
        Envelope::Data => json!({ "success": true, "data": body }),
    }
}

fn failure_response(failure: &Failure) -> Response {
    match &failure.message {
        Some(message) => (failure.status, axum::Json(json!({ "message": message }))).into_response(),
        None => (failure.status, "").into_response(),
    }
}

fn write_reply(reply: WriteReply, envelope: Envelope, status: StatusCode, record: Value) -> Response {
    match reply {
        WriteReply::Echo => (status, axum::Json(wrap(envelope, record))).into_response(),
        WriteReply::Message => {
            (status, axum::Json(json!({ "message": "Saved successfully" }))).into_response()
        }
        WriteReply::Empty => StatusCode::NO_CONTENT.into_response(),
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(json!({ "message": "Record not found" })),
    )
        .into_response()
}

/// Record the request and return the scripted failure, if any
fn begin(state: &mut BackendState, method: &str, path: String, resource: &str) -> Option<Response> {
    state.requests.push(format!("{} {}", method, path));
    state.failures.get(resource).map(failure_response)
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("_id").and_then(Value::as_str)
}

fn merge(record: &mut Value, payload: &Value) {
    if let (Some(target), Some(source)) = (record.as_object_mut(), payload.as_object()) {
        for (key, value) in source {
            if key != "_id" {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

async fn list(State(state): State<Shared>, Path(resource): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(failed) = begin(&mut state, "GET", format!("/api/{}", resource), &resource) {
        return failed;
    }
    let entry = state.resources.entry(resource).or_default();
    if let Some((content_type, body)) = &entry.raw_list {
        return ([(header::CONTENT_TYPE, content_type.clone())], body.clone()).into_response();
    }
    let body = Value::Array(entry.records.clone());
    axum::Json(wrap(entry.envelope.unwrap_or(Envelope::Bare), body)).into_response()
}

async fn fetch_one(
    State(state): State<Shared>,
    Path((resource, id)): Path<(String, String)>,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(failed) = begin(&mut state, "GET", format!("/api/{}/{}", resource, id), &resource) {
        return failed;
    }
    let entry = state.resources.entry(resource).or_default();
    let envelope = entry.envelope.unwrap_or(Envelope::Bare);
    match entry.records.iter().find(|r| record_id(r) == Some(id.as_str())) {
        Some(record) => axum::Json(wrap(envelope, record.clone())).into_response(),
        None => not_found(),
    }
}

async fn create(
    State(state): State<Shared>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Response {
    let is_multipart = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    let payload = if is_multipart {
        match parse_multipart(headers, body).await {
            Ok(upload) => {
                let mut object = Map::new();
                for (key, value) in &upload.fields {
                    let parsed = serde_json::from_str::<Value>(value)
                        .ok()
                        .filter(|v| v.is_number() || v.is_boolean() || v.is_array())
                        .unwrap_or_else(|| Value::String(value.clone()));
                    object.insert(key.clone(), parsed);
                }
                let images: Vec<Value> = upload
                    .files
                    .iter()
                    .map(|(name, _)| json!({ "url": format!("/uploads/{}", name) }))
                    .collect();
                object.insert("images".to_string(), Value::Array(images));
                state.lock().unwrap().last_upload = Some(upload);
                Value::Object(object)
            }
            Err(message) => {
                return (StatusCode::BAD_REQUEST, axum::Json(json!({ "message": message })))
                    .into_response();
            }
        }
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(payload) => payload,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    axum::Json(json!({ "message": e.to_string() })),
                )
                    .into_response();
            }
        }
    };

    let mut state = state.lock().unwrap();
    if let Some(failed) = begin(&mut state, "POST", format!("/api/{}", resource), &resource) {
        return failed;
    }

    state.next_id += 1;
    let id = format!("{}-{}", resource, state.next_id);
    let entry = state.resources.entry(resource).or_default();

    let duplicate_name = payload.get("name").and_then(Value::as_str).is_some_and(|name| {
        entry.records.iter().any(|r| {
            r.get("name")
                .and_then(Value::as_str)
                .is_some_and(|existing| existing.eq_ignore_ascii_case(name))
        })
    });
    if duplicate_name {
        return (
            StatusCode::CONFLICT,
            axum::Json(json!({ "message": "Name already taken" })),
        )
            .into_response();
    }

    let mut record = json!({ "_id": id, "createdAt": "2025-01-01T00:00:00Z" });
    merge(&mut record, &payload);
    entry.records.push(record.clone());

    let envelope = entry.envelope.unwrap_or(Envelope::Bare);
    write_reply(entry.writes, envelope, StatusCode::CREATED, record)
}

async fn parse_multipart(headers: HeaderMap, body: axum::body::Bytes) -> Result<Upload, String> {
    use axum::extract::FromRequest;

    let mut request = axum::http::Request::builder()
        .method("POST")
        .uri("/")
        .body(axum::body::Body::from(body))
        .map_err(|e| e.to_string())?;
    *request.headers_mut() = headers;

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| e.to_string())?;

    let mut upload = Upload::default();
    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let bytes = field.bytes().await.map_err(|e| e.to_string())?;
                upload.files.push((file_name, bytes.len()));
            }
            None => {
                let text = field.text().await.map_err(|e| e.to_string())?;
                upload.fields.insert(name, text);
            }
        }
    }
    Ok(upload)
}

async fn update(
    State(state): State<Shared>,
    Path((resource, id)): Path<(String, String)>,
    axum::Json(payload): axum::Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(failed) = begin(&mut state, "PUT", format!("/api/{}/{}", resource, id), &resource) {
        return failed;
    }
    let entry = state.resources.entry(resource).or_default();
    let envelope = entry.envelope.unwrap_or(Envelope::Bare);
    let reply = entry.writes;
    match entry.records.iter_mut().find(|r| record_id(r) == Some(id.as_str())) {
        Some(record) => {
            merge(record, &payload);
            write_reply(reply, envelope, StatusCode::OK, record.clone())
        }
        None => not_found(),
    }
}

async fn remove(
    State(state): State<Shared>,
    Path((resource, id)): Path<(String, String)>,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(failed) = begin(&mut state, "DELETE", format!("/api/{}/{}", resource, id), &resource) {
        return failed;
    }
    let entry = state.resources.entry(resource).or_default();
    let before = entry.records.len();
    entry.records.retain(|r| record_id(r) != Some(id.as_str()));
    if entry.records.len() == before {
        return not_found();
    }
    axum::Json(json!({ "message": "Deleted successfully" })).into_response()
}

/// `toggle-status` echoes the record; `edit-name` and friends only confirm
async fn action(
    State(state): State<Shared>,
    Path((resource, id, verb)): Path<(String, String, String)>,
    method: Method,
    body: axum::body::Bytes,
) -> Response {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let mut state = state.lock().unwrap();
    let path = format!("/api/{}/{}/{}", resource, id, verb);
    if let Some(failed) = begin(&mut state, method.as_str(), path, &resource) {
        return failed;
    }
    let entry = state.resources.entry(resource).or_default();
    let envelope = entry.envelope.unwrap_or(Envelope::Bare);
    let Some(record) = entry.records.iter_mut().find(|r| record_id(r) == Some(id.as_str())) else {
        return not_found();
    };

    match verb.as_str() {
        "toggle-status" => {
            let active = record.get("isActive").and_then(Value::as_bool).unwrap_or(false);
            record["isActive"] = Value::Bool(!active);
            axum::Json(wrap(envelope, record.clone())).into_response()
        }
        "status" => {
            merge(record, &payload);
            axum::Json(wrap(envelope, record.clone())).into_response()
        }
        _ => {
            merge(record, &payload);
            axum::Json(json!({ "message": "Updated successfully" })).into_response()
        }
    }
}

async fn login(axum::Json(body): axum::Json<Value>) -> Response {
    let username = body.get("username").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);
    if username == Some("admin") && password == Some("password123") {
        (
            [(
                header::SET_COOKIE,
                "session=valid; HttpOnly; Max-Age=86400; Path=/",
            )],
            axum::Json(json!({ "success": true })),
        )
            .into_response()
    } else {
        axum::Json(json!({ "success": false, "message": "Invalid credentials" })).into_response()
    }
}

async fn logout() -> Response {
    (
        [(header::SET_COOKIE, "session=; Max-Age=0; Path=/")],
        axum::Json(json!({ "success": true })),
    )
        .into_response()
}
