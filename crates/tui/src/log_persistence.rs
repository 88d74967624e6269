//! Log file used while the shell owns the terminal.
//!
//! The shell cannot log to stderr once the alternate screen is active, so the
//! binary points its tracing subscriber at the file opened here. The file is
//! appended to across sessions and rotated when it grows past
//! [`MAX_LOG_BYTES`].

use std::env;
use std::fs::{File, OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Environment variable overriding the shell log file path.
pub const LOG_PATH_ENV: &str = "WERKSTATT_LOG_PATH";

/// Size at which the current file is moved aside on the next open.
pub const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;
const MAX_ROTATED_FILES: usize = 3;

/// `WERKSTATT_LOG_PATH`, else `<data dir>/werkstatt/werkstatt.log`, else a
/// file in the current directory.
pub fn log_path() -> PathBuf {
    if let Some(path) = env::var_os(LOG_PATH_ENV)
        && !path.is_empty()
    {
        return PathBuf::from(path);
    }
    dirs_next::data_dir()
        .map(|dir| dir.join("werkstatt"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("werkstatt.log")
}

/// Open the log file for appending, creating parent directories and rotating
/// an oversized file first.
pub fn open_log_file() -> anyhow::Result<(PathBuf, File)> {
    let path = log_path();
    let file = open_at(&path, MAX_LOG_BYTES)?;
    Ok((path, file))
}

fn open_at(path: &Path, max_bytes: u64) -> anyhow::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let size = std::fs::metadata(path).map(|metadata| metadata.len()).unwrap_or_default();
    if size >= max_bytes {
        rotate_files(path).with_context(|| format!("rotating {}", path.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}

/// Shift `log.1 → log.2 …` and move the current file to `log.1`; the oldest
/// rotated file is dropped.
fn rotate_files(path: &Path) -> std::io::Result<()> {
    for index in (1..=MAX_ROTATED_FILES).rev() {
        let source = if index == 1 {
            path.to_path_buf()
        } else {
            rotated_path(path, index - 1)
        };
        if !source.exists() {
            continue;
        }
        let destination = rotated_path(path, index);
        if destination.exists() {
            std::fs::remove_file(&destination)?;
        }
        std::fs::rename(source, destination)?;
    }
    Ok(())
}

fn rotated_path(base: &Path, index: usize) -> PathBuf {
    PathBuf::from(format!("{}.{}", base.display(), index))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn rotated_path_appends_index_suffix() {
        let path = rotated_path(Path::new("/tmp/werkstatt.log"), 3);
        assert_eq!(path.to_string_lossy(), "/tmp/werkstatt.log.3");
    }

    #[test]
    fn log_path_honors_override() {
        temp_env::with_var(LOG_PATH_ENV, Some("/var/tmp/shell.log"), || {
            assert_eq!(log_path(), PathBuf::from("/var/tmp/shell.log"));
        });
        temp_env::with_var(LOG_PATH_ENV, Some(""), || {
            assert!(log_path().ends_with("werkstatt.log"));
        });
    }

    #[test]
    fn open_creates_directories_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("werkstatt.log");

        let mut file = open_at(&path, MAX_LOG_BYTES).unwrap();
        writeln!(file, "first").unwrap();
        drop(file);
        let mut file = open_at(&path, MAX_LOG_BYTES).unwrap();
        writeln!(file, "second").unwrap();
        drop(file);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn oversized_file_is_rotated_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("werkstatt.log");
        std::fs::write(&path, "old session\n").unwrap();
        std::fs::write(rotated_path(&path, 1), "older\n").unwrap();

        let file = open_at(&path, 4).unwrap();
        drop(file);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
        assert_eq!(std::fs::read_to_string(rotated_path(&path, 1)).unwrap(), "old session\n");
        assert_eq!(std::fs::read_to_string(rotated_path(&path, 2)).unwrap(), "older\n");
    }

    #[test]
    fn open_reports_unusable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        assert!(open_at(&blocker.join("werkstatt.log"), MAX_LOG_BYTES).is_err());
    }
}
