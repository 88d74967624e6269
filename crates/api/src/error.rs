use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by either backend.
///
/// Every variant renders to the message shown to the user; none of them are
/// retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, reset, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status without a backend-provided message.
    #[error("{method} {path} failed: {status}")]
    Status {
        method: &'static str,
        path: &'static str,
        status: u16,
    },

    /// Backend-reported domain error carrying its `detail` message.
    #[error("{detail}")]
    Backend { status: u16, detail: String },

    #[error("Plugin not found")]
    PluginNotFound { plugin: String },

    #[error("Command not found")]
    CommandNotFound { plugin: String, command: String },

    #[error("'{0}' ist erforderlich")]
    MissingArgument(String),

    #[error("File not found")]
    FileNotFound { filename: String },

    /// A success response whose body does not match the contract.
    #[error("Invalid response from {path}: {message}")]
    Decode { path: &'static str, message: String },

    #[error("{0}")]
    Config(String),

    #[error("File access failed for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// HTTP status attached to the failure, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}
