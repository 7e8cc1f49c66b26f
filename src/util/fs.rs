//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::core::errors::GenerateError;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Read a file to string, giving up after `timeout`.
///
/// The read runs on a helper thread. On timeout the thread is left to
/// finish on its own and the caller gets [`GenerateError::ReadTimeout`].
pub fn read_to_string_timeout(path: &Path, timeout: Duration) -> Result<String, GenerateError> {
    let (tx, rx) = mpsc::channel();
    let owned = path.to_path_buf();

    std::thread::Builder::new()
        .name("resforge-read".to_string())
        .spawn(move || {
            let _ = tx.send(fs::read_to_string(&owned));
        })
        .map_err(|source| GenerateError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    match rx.recv_timeout(timeout) {
        Ok(Ok(contents)) => Ok(contents),
        Ok(Err(source)) => Err(GenerateError::Io {
            path: path.to_path_buf(),
            source,
        }),
        Err(RecvTimeoutError::Timeout) => Err(GenerateError::ReadTimeout {
            path: path.to_path_buf(),
            timeout_ms: timeout.as_millis() as u64,
        }),
        Err(RecvTimeoutError::Disconnected) => Err(GenerateError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::other("reader thread exited without a result"),
        }),
    }
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Relative path with `/` separators on every platform.
pub fn invariant_relative_path(base: &Path, path: &Path) -> String {
    relative_path(base, path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether a file or directory name is hidden (starts with `.`).
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
