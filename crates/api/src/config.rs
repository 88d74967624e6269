//! Backend selection and base URL resolution.
//!
//! Configuration is read once at start-up from the environment, optionally
//! overridden by command-line flags, and never changes afterwards.

use std::env;

use url::Url;

use crate::ApiError;

/// Environment variable holding the backend base URL.
pub const API_BASE_ENV: &str = "WERKSTATT_API_BASE";
/// Environment variable switching to the in-memory mock (`1` or `true`).
pub const USE_MOCK_ENV: &str = "WERKSTATT_USE_MOCK";
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    /// Serve every operation from the in-memory mock
    pub use_mock: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            use_mock: false,
        }
    }
}

impl ApiConfig {
    /// Build a configuration, validating the base URL unless the mock is
    /// selected.
    pub fn new(base_url: impl Into<String>, use_mock: bool) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let base_url = if use_mock {
            base_url.trim().trim_end_matches('/').to_string()
        } else {
            normalize_base_url(&base_url)?
        };
        Ok(Self { base_url, use_mock })
    }

    /// Configuration for the in-memory mock.
    pub fn mock() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            use_mock: true,
        }
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::resolve(None, None)
    }

    /// Resolve the configuration. Explicit overrides take precedence over
    /// `WERKSTATT_API_BASE` and `WERKSTATT_USE_MOCK`.
    pub fn resolve(base_override: Option<String>, mock_override: Option<bool>) -> Result<Self, ApiError> {
        let base_url = base_override
            .or_else(|| env::var(API_BASE_ENV).ok().filter(|value| !value.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let use_mock = mock_override.unwrap_or_else(|| env::var(USE_MOCK_ENV).map(|value| parse_flag(&value)).unwrap_or(false));
        Self::new(base_url, use_mock)
    }
}

/// `1` and `true` (any case) enable a flag; everything else disables it.
pub fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    value == "1" || value.eq_ignore_ascii_case("true")
}

/// Validate that a base URL is usable and strip trailing slashes.
///
/// Rules:
/// - must parse as an absolute URL with a host
/// - scheme must be `http`; the client is built without a TLS connector, so
///   `https` is refused here instead of failing on every request
pub fn normalize_base_url(base: &str) -> Result<String, ApiError> {
    let trimmed = base.trim();
    let parsed = Url::parse(trimmed).map_err(|error| ApiError::Config(format!("Invalid {API_BASE_ENV} URL '{trimmed}': {error}")))?;

    match parsed.scheme() {
        "http" => {}
        "https" => {
            return Err(ApiError::Config(format!(
                "{API_BASE_ENV} '{trimmed}' uses https, but this build has no TLS support; use http"
            )));
        }
        other => {
            return Err(ApiError::Config(format!("{API_BASE_ENV} must use http; got '{other}://'")));
        }
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ApiError::Config(format!("{API_BASE_ENV} must include a host")));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
