//! Error types for compiler dispatch.

use std::path::PathBuf;

use kiln_cache::CacheError;

/// Errors that abort dispatching a variant.
///
/// A compiler that runs and fails is not an error here; it is reported by
/// [`TaskBarrier::join_all`](crate::TaskBarrier::join_all).
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The compiler executable could not be started.
    #[error("failed to launch {program}: {source}")]
    Spawn {
        /// The executable that failed to start.
        program: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Reading staleness state or writing a manifest failed.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Creating the scratch directory for include listing failed.
    #[error("failed to create scratch directory: {0}")]
    Scratch(std::io::Error),
}
