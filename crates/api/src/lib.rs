//! Werkstatt API client.
//!
//! This crate exposes the four operations the front-ends need:
//!
//! - [`WerkstattApi::get_plugins`]: list the backend's plugin registry
//! - [`WerkstattApi::run_command`]: execute a plugin command with arguments
//! - [`WerkstattApi::upload_file`]: upload a file and get a retrieval URL
//! - [`WerkstattApi::get_download_url`]: resolve the URL of an uploaded file
//!
//! plus [`WerkstattApi::download`] to fetch the bytes behind such a URL.
//!
//! Two implementations satisfy the contract: [`HttpBackend`] talks to a real
//! server, [`MockBackend`] keeps everything in memory. [`connect`] picks one
//! from an [`ApiConfig`] once at start-up; callers only ever see
//! `Arc<dyn WerkstattApi>`.
//!
//! # Example
//!
//! ```ignore
//! use werkstatt_api::{ApiConfig, connect};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api = connect(&ApiConfig::mock())?;
//!     for plugin in api.get_plugins().await? {
//!         println!("{}", plugin.title());
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;
use werkstatt_types::{CommandArgs, PluginDescriptor, UploadResult};

pub mod config;
mod error;
pub mod http;
pub mod mock;
mod upload;

pub use config::ApiConfig;
pub use error::ApiError;
pub use http::HttpBackend;
pub use mock::MockBackend;
pub use upload::{FileUpload, sanitize_filename};

/// Which implementation serves the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Http,
    Mock,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Mock => "mock",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The client contract shared by the HTTP backend and the mock.
#[async_trait]
pub trait WerkstattApi: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Fetch the plugin registry.
    async fn get_plugins(&self) -> Result<Vec<PluginDescriptor>, ApiError>;

    /// Execute `command` of `plugin`. The output is a string or any JSON
    /// structure the plugin returns.
    async fn run_command(&self, plugin: &str, command: &str, args: &CommandArgs) -> Result<Value, ApiError>;

    async fn upload_file(&self, file: FileUpload) -> Result<UploadResult, ApiError>;

    /// URL under which `filename` can be retrieved.
    async fn get_download_url(&self, filename: &str) -> Result<String, ApiError>;

    /// Fetch the bytes behind a URL returned by [`Self::upload_file`] or
    /// [`Self::get_download_url`].
    async fn download(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

/// Build the client selected by `config`.
pub fn connect(config: &ApiConfig) -> Result<Arc<dyn WerkstattApi>, ApiError> {
    if config.use_mock {
        info!("using in-memory mock backend");
        return Ok(Arc::new(MockBackend::new()));
    }
    info!(base_url = %config.base_url, "using HTTP backend");
    Ok(Arc::new(HttpBackend::new(&config.base_url)?))
}
