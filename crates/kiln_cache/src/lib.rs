//! Incremental compilation state for shader artifacts.
//!
//! Every compiled artifact carries a sidecar dependency manifest listing the
//! files it included when it was last compiled. The staleness evaluator
//! compares modification times of the source, the artifact and every
//! recorded dependency to decide whether the artifact must be rebuilt.

#![warn(missing_docs)]

pub mod error;
pub mod manifest;
pub mod staleness;

pub use error::CacheError;
pub use manifest::{DependencyManifest, MANIFEST_EXT};
pub use staleness::{is_stale, StaleReason, Staleness};
