//! Internal invariant violations.

/// Result of an operation that only fails if Kiln itself is wrong.
pub type KilnResult<T> = Result<T, InternalError>;

/// A broken internal invariant, such as a walked file that does not lie
/// under the input root it was found in.
///
/// Shader trees and compiler failures never produce this error.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// What invariant was violated.
    pub message: String,
}

impl InternalError {
    /// Creates an internal error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
