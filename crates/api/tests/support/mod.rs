//! A small axum stand-in for the Werkstatt backend.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    pub field: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Default)]
pub struct BackendState {
    pub files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    pub uploads: Arc<Mutex<Vec<ReceivedUpload>>>,
    /// Answer uploads without a `filename` field
    pub omit_upload_filename: bool,
}

pub fn plugins_payload() -> Value {
    json!([
        {
            "name": "example",
            "version": "0.1.0",
            "description": "Beispiel-Tool: Begrüßung und Echo",
            "enabled": true,
            "commands": [
                {
                    "name": "greet",
                    "description": "Gibt eine Begrüßung aus.",
                    "params": [
                        { "name": "name", "type": "string", "required": false, "description": "Name zum Grüßen", "default": "Welt" }
                    ]
                }
            ]
        },
        { "name": "kdpformat", "version": null, "description": "", "enabled": false, "commands": [] }
    ])
}

pub fn router(state: BackendState) -> Router {
    Router::new()
        .route("/plugins", get(list_plugins))
        .route("/run/{plugin}/{command}", post(run_command))
        .route("/files/upload", post(upload_file))
        .route("/files/download/{name}", get(download_file))
        .with_state(state)
}

/// Router whose every endpoint answers with `status` and an empty body.
pub fn failing_router(status: StatusCode) -> Router {
    Router::new().fallback(move || async move { status })
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let address = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve test backend");
    });
    format!("http://{address}")
}

/// A base URL nothing is listening on.
pub async fn unused_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let address = listener.local_addr().expect("listener address");
    drop(listener);
    format!("http://{address}")
}

async fn list_plugins() -> Json<Value> {
    Json(plugins_payload())
}

async fn run_command(Path((plugin, command)): Path<(String, String)>, Json(body): Json<Value>) -> Response {
    let args = body.get("args").cloned().unwrap_or(Value::Null);
    match (plugin.as_str(), command.as_str()) {
        ("example", "greet") => {
            let name = args.get("name").and_then(Value::as_str).unwrap_or("Welt").to_string();
            Json(json!({ "ok": true, "output": format!("Hallo, {name}!") })).into_response()
        }
        (_, "inspect") => Json(json!({ "ok": true, "output": { "plugin": plugin, "command": command, "args": args } })).into_response(),
        ("example", "boom") => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": "'msg' ist erforderlich" }))).into_response(),
        ("example", "bare") => StatusCode::BAD_GATEWAY.into_response(),
        ("example", "silent") => Json(json!({ "ok": true })).into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "detail": "Plugin not found or disabled" }))).into_response(),
    }
}

async fn upload_file(State(state): State<BackendState>, mut multipart: Multipart) -> Response {
    let mut stored_name = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let Ok(bytes) = field.bytes().await else {
            return StatusCode::BAD_REQUEST.into_response();
        };
        if field_name == "file" {
            state.files.lock().unwrap().insert(filename.clone(), bytes.to_vec());
            stored_name = Some(filename.clone());
        }
        state.uploads.lock().unwrap().push(ReceivedUpload {
            field: field_name,
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    match stored_name {
        Some(_) if state.omit_upload_filename => Json(json!({ "ok": true })).into_response(),
        Some(name) => Json(json!({ "ok": true, "filename": name, "path": format!("data/uploads/{name}") })).into_response(),
        None => (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": "file field missing" }))).into_response(),
    }
}

async fn download_file(State(state): State<BackendState>, Path(name): Path<String>) -> Response {
    match state.files.lock().unwrap().get(&name) {
        Some(bytes) => bytes.clone().into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "detail": "File not found" }))).into_response(),
    }
}
