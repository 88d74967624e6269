use std::env;
use std::path::PathBuf;

use dirs_next::{download_dir, home_dir};

/// Environment variable overriding where downloaded files are written.
pub const DOWNLOAD_DIR_ENV: &str = "WERKSTATT_DOWNLOAD_DIR";

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Resolve the download directory: `WERKSTATT_DOWNLOAD_DIR`, then the
/// platform download directory, then the current directory.
pub fn default_download_dir() -> PathBuf {
    if let Ok(path) = env::var(DOWNLOAD_DIR_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }
    download_dir().unwrap_or_else(|| PathBuf::from("."))
}
