mod support;

use axum::http::StatusCode;
use serde_json::{Value, json};
use support::BackendState;
use werkstatt_api::{ApiError, BackendKind, FileUpload, HttpBackend, WerkstattApi};
use werkstatt_types::CommandArgs;

async fn backend() -> (HttpBackend, BackendState) {
    let state = BackendState::default();
    let base = support::spawn(support::router(state.clone())).await;
    (HttpBackend::new(&base).expect("build http backend"), state)
}

fn args(pairs: &[(&str, Value)]) -> CommandArgs {
    pairs.iter().map(|(key, value)| (key.to_string(), value.clone())).collect()
}

#[tokio::test]
async fn lists_plugins_from_backend() {
    let (api, _) = backend().await;
    assert_eq!(api.kind(), BackendKind::Http);

    let plugins = api.get_plugins().await.unwrap();
    assert_eq!(plugins.len(), 2);
    assert_eq!(plugins[0].name, "example");
    assert_eq!(plugins[0].commands[0].params[0].default, Some(json!("Welt")));
    assert!(!plugins[1].enabled);
    assert!(plugins[1].version.is_none());
}

#[tokio::test]
async fn non_success_plugin_listing_reports_status() {
    let base = support::spawn(support::failing_router(StatusCode::SERVICE_UNAVAILABLE)).await;
    let api = HttpBackend::new(&base).unwrap();

    let error = api.get_plugins().await.unwrap_err();
    assert_eq!(error.status(), Some(503));
    assert_eq!(error.to_string(), "GET /plugins failed: 503");
}

#[tokio::test]
async fn run_command_returns_output_field() {
    let (api, _) = backend().await;

    let output = api.run_command("example", "greet", &args(&[("name", json!("Ana"))])).await.unwrap();
    assert_eq!(output, json!("Hallo, Ana!"));

    let output = api.run_command("example", "greet", &CommandArgs::new()).await.unwrap();
    assert_eq!(output, json!("Hallo, Welt!"));
}

#[tokio::test]
async fn run_command_encodes_path_segments_and_wraps_args() {
    let (api, _) = backend().await;

    let output = api
        .run_command("my plugin/ä", "inspect", &args(&[("path", json!("a b.pdf")), ("count", json!(2))]))
        .await
        .unwrap();
    assert_eq!(output["plugin"], json!("my plugin/ä"));
    assert_eq!(output["command"], json!("inspect"));
    assert_eq!(output["args"], json!({ "path": "a b.pdf", "count": 2 }));
}

#[tokio::test]
async fn missing_output_field_is_null() {
    let (api, _) = backend().await;
    let output = api.run_command("example", "silent", &CommandArgs::new()).await.unwrap();
    assert_eq!(output, Value::Null);
}

#[tokio::test]
async fn backend_detail_is_propagated() {
    let (api, _) = backend().await;

    let error = api.run_command("other", "x", &CommandArgs::new()).await.unwrap_err();
    assert!(matches!(error, ApiError::Backend { status: 404, .. }));
    assert_eq!(error.to_string(), "Plugin not found or disabled");

    let error = api.run_command("example", "boom", &CommandArgs::new()).await.unwrap_err();
    assert_eq!(error.status(), Some(500));
    assert_eq!(error.to_string(), "'msg' ist erforderlich");
}

#[tokio::test]
async fn run_failure_without_detail_falls_back_to_status() {
    let (api, _) = backend().await;
    let error = api.run_command("example", "bare", &CommandArgs::new()).await.unwrap_err();
    assert_eq!(error.to_string(), "POST /run failed: 502");
}

#[tokio::test]
async fn upload_sends_multipart_file_field() {
    let (api, state) = backend().await;

    let upload = FileUpload::new("Rechnung März.txt", b"Summe: 42".to_vec()).with_content_type("text/plain");
    let result = api.upload_file(upload).await.unwrap();

    assert_eq!(result.filename, "Rechnung März.txt");
    assert!(!result.is_blob());
    assert!(
        result.url.ends_with("/files/download/Rechnung%20M%C3%A4rz.txt"),
        "unexpected url {}",
        result.url
    );

    let received = state.uploads.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].field, "file");
    assert_eq!(received[0].filename, "Rechnung März.txt");
    assert_eq!(received[0].content_type.as_deref(), Some("text/plain"));
    assert_eq!(received[0].bytes, b"Summe: 42");

    let bytes = api.download(&result.url).await.unwrap();
    assert_eq!(bytes, b"Summe: 42");
}

#[tokio::test]
async fn upload_falls_back_to_local_filename() {
    let state = BackendState {
        omit_upload_filename: true,
        ..BackendState::default()
    };
    let base = support::spawn(support::router(state)).await;
    let api = HttpBackend::new(&base).unwrap();

    let result = api.upload_file(FileUpload::new("/tmp/scan.pdf", vec![0x25, 0x50])).await.unwrap();
    assert_eq!(result.filename, "scan.pdf");
    assert_eq!(result.url, format!("{base}/files/download/scan.pdf"));
}

#[tokio::test]
async fn failed_upload_reports_status() {
    let base = support::spawn(support::failing_router(StatusCode::PAYLOAD_TOO_LARGE)).await;
    let api = HttpBackend::new(&base).unwrap();

    let error = api.upload_file(FileUpload::new("big.bin", vec![0; 16])).await.unwrap_err();
    assert_eq!(error.to_string(), "POST /files/upload failed: 413");
}

#[tokio::test]
async fn download_url_needs_no_round_trip() {
    let base = support::unused_base_url().await;
    let api = HttpBackend::new(&base).unwrap();

    let url = api.get_download_url("never uploaded.txt").await.unwrap();
    assert_eq!(url, format!("{base}/files/download/never%20uploaded.txt"));
}

#[tokio::test]
async fn download_of_unknown_file_reports_status() {
    let (api, _) = backend().await;
    let url = api.get_download_url("missing.txt").await.unwrap();
    let error = api.download(&url).await.unwrap_err();
    assert_eq!(error.to_string(), "GET /files/download failed: 404");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let base = support::unused_base_url().await;
    let api = HttpBackend::new(&base).unwrap();

    let error = api.get_plugins().await.unwrap_err();
    assert!(matches!(error, ApiError::Network(_)), "unexpected error {error:?}");
    assert!(error.to_string().starts_with("Network error"));
}

#[tokio::test]
async fn malformed_listing_is_a_decode_error() {
    let base = support::spawn(axum::Router::new().route(
        "/plugins",
        axum::routing::get(|| async { axum::Json(json!({ "plugins": [] })) }),
    ))
    .await;
    let api = HttpBackend::new(&base).unwrap();

    let error = api.get_plugins().await.unwrap_err();
    assert!(matches!(error, ApiError::Decode { path: "/plugins", .. }));
}
