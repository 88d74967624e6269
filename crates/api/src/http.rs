//! Network-backed implementation of [`WerkstattApi`].
//!
//! Every call goes to the configured base URL:
//!
//! - `GET /plugins`
//! - `POST /run/{plugin}/{command}` with `{ "args": {...} }`
//! - `POST /files/upload` as multipart with a `file` field
//! - `GET /files/download/{filename}`

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, header};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use werkstatt_types::wire::{ErrorBody, RunRequest, RunResponse, UploadResponse};
use werkstatt_types::{CommandArgs, PluginDescriptor, UploadResult};

use crate::config::normalize_base_url;
use crate::{ApiError, BackendKind, FileUpload, WerkstattApi};

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single path segment.
pub fn encode_component(segment: &str) -> String {
    utf8_percent_encode(segment, URI_COMPONENT).to_string()
}

/// Thin wrapper around a configured `reqwest::Client` for the Werkstatt
/// backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    http: Client,
    user_agent: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            http,
            user_agent: format!("werkstatt/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Download endpoint for `filename`; no existence check is made.
    pub fn download_url_for(&self, filename: &str) -> String {
        format!("{}/files/download/{}", self.base_url, encode_component(filename))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!(%url, "building request");
        self.http.request(method, url).header(header::USER_AGENT, &self.user_agent)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        builder.send().await.map_err(|error| {
            warn!(%error, "request failed before a response arrived");
            ApiError::Network(error)
        })
    }
}

#[async_trait]
impl WerkstattApi for HttpBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Http
    }

    async fn get_plugins(&self) -> Result<Vec<PluginDescriptor>, ApiError> {
        let url = format!("{}/plugins", self.base_url);
        let response = self.send(self.request(Method::GET, &url)).await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "GET /plugins failed");
            return Err(ApiError::Status {
                method: "GET",
                path: "/plugins",
                status: status.as_u16(),
            });
        }
        decode_json(response, "/plugins").await
    }

    async fn run_command(&self, plugin: &str, command: &str, args: &CommandArgs) -> Result<Value, ApiError> {
        let url = format!(
            "{}/run/{}/{}",
            self.base_url,
            encode_component(plugin),
            encode_component(command)
        );
        let builder = self.request(Method::POST, &url).json(&RunRequest { args });
        let response = self.send(builder).await?;
        let status = response.status();
        if !status.is_success() {
            // The body is best effort: an unreadable or non-JSON body falls
            // back to the generic status message.
            let body = response.bytes().await.unwrap_or_default();
            let error_body: ErrorBody = serde_json::from_slice(&body).unwrap_or_default();
            warn!(status = status.as_u16(), plugin, command, "POST /run failed");
            return Err(match error_body.message() {
                Some(detail) => ApiError::Backend {
                    status: status.as_u16(),
                    detail,
                },
                None => ApiError::Status {
                    method: "POST",
                    path: "/run",
                    status: status.as_u16(),
                },
            });
        }
        let body: RunResponse = decode_json(response, "/run").await?;
        Ok(body.output)
    }

    async fn upload_file(&self, file: FileUpload) -> Result<UploadResult, ApiError> {
        let (filename, content_type, bytes) = file.into_parts();
        let part = Part::bytes(bytes).file_name(filename.clone()).mime_str(&content_type)?;
        let form = Form::new().part("file", part);

        let url = format!("{}/files/upload", self.base_url);
        let response = self.send(self.request(Method::POST, &url).multipart(form)).await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), %filename, "POST /files/upload failed");
            return Err(ApiError::Status {
                method: "POST",
                path: "/files/upload",
                status: status.as_u16(),
            });
        }
        let body: UploadResponse = decode_json(response, "/files/upload").await?;
        let filename = body.filename.filter(|name| !name.is_empty()).unwrap_or(filename);
        let url = self.download_url_for(&filename);
        Ok(UploadResult { filename, url })
    }

    async fn get_download_url(&self, filename: &str) -> Result<String, ApiError> {
        Ok(self.download_url_for(filename))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.send(self.request(Method::GET, url)).await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), %url, "download failed");
            return Err(ApiError::Status {
                method: "GET",
                path: "/files/download",
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response, path: &'static str) -> Result<T, ApiError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|error| ApiError::Decode {
        path,
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_component_matches_encode_uri_component() {
        assert_eq!(encode_component("example"), "example");
        assert_eq!(encode_component("my file (1).pdf"), "my%20file%20(1).pdf");
        assert_eq!(encode_component("a/b?c#d"), "a%2Fb%3Fc%23d");
        assert_eq!(encode_component("grüße"), "gr%C3%BC%C3%9Fe");
        assert_eq!(encode_component("x-y_z.!~*'"), "x-y_z.!~*'");
    }

    #[test]
    fn download_url_is_composed_from_base() {
        let backend = HttpBackend::new("http://127.0.0.1:8000/").unwrap();
        assert_eq!(backend.base_url(), "http://127.0.0.1:8000");
        assert_eq!(
            backend.download_url_for("Rechnung März.pdf"),
            "http://127.0.0.1:8000/files/download/Rechnung%20M%C3%A4rz.pdf"
        );
    }

    #[test]
    fn new_rejects_invalid_base_url() {
        assert!(matches!(HttpBackend::new("::"), Err(ApiError::Config(_))));
    }
}
