//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur while reading or writing incremental build state.
///
/// Missing files are never errors here: a missing artifact or dependency is
/// a staleness signal and a missing manifest is simply absent. This enum
/// covers the I/O failures that remain.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while reading metadata or a manifest.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }
}
