//! Deciding whether an artifact must be recompiled.
//!
//! Policy, in order:
//!
//! 1. A missing artifact is stale.
//! 2. A source modified at or after the artifact is stale.
//! 3. Without a manifest there is nothing else to compare, so the artifact
//!    is fresh.
//! 4. Any recorded dependency that no longer exists, or was modified at or
//!    after the artifact, makes it stale.
//!
//! Dependencies are compared whenever the source itself is older than the
//! artifact, so touching any recorded header always forces a rebuild.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::CacheError;
use crate::manifest::DependencyManifest;

/// Why an artifact was judged stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleReason {
    /// The artifact has never been built (or was removed).
    MissingArtifact,
    /// The source was modified at or after the artifact.
    SourceModified,
    /// A recorded dependency no longer exists.
    MissingDependency(PathBuf),
    /// A recorded dependency was modified at or after the artifact.
    DependencyModified(PathBuf),
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaleReason::MissingArtifact => f.write_str("artifact does not exist"),
            StaleReason::SourceModified => f.write_str("source is newer than artifact"),
            StaleReason::MissingDependency(path) => {
                write!(f, "dependency {} does not exist", path.display())
            }
            StaleReason::DependencyModified(path) => {
                write!(f, "dependency {} has been modified", path.display())
            }
        }
    }
}

/// Verdict of the staleness evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staleness {
    /// The artifact is up to date.
    Fresh,
    /// The artifact must be recompiled.
    Stale(StaleReason),
}

impl Staleness {
    /// Returns `true` if recompilation is required.
    pub fn is_stale(&self) -> bool {
        matches!(self, Staleness::Stale(_))
    }
}

/// Evaluates whether `artifact`, compiled from `source`, must be rebuilt.
///
/// Only metadata read failures on paths that exist are errors; missing
/// files are verdicts.
pub fn is_stale(source: &Path, artifact: &Path) -> Result<Staleness, CacheError> {
    let Some(artifact_time) = modified(artifact)? else {
        return Ok(Staleness::Stale(StaleReason::MissingArtifact));
    };

    // A vanished source is treated like a touched one; the compiler reports it.
    match modified(source)? {
        Some(source_time) if source_time < artifact_time => {}
        _ => return Ok(Staleness::Stale(StaleReason::SourceModified)),
    }

    let Some(manifest) = DependencyManifest::load(artifact)? else {
        log::debug!("no dependency manifest for {}", artifact.display());
        return Ok(Staleness::Fresh);
    };

    for dependency in manifest.iter() {
        match modified(dependency)? {
            None => {
                return Ok(Staleness::Stale(StaleReason::MissingDependency(
                    dependency.to_path_buf(),
                )))
            }
            Some(time) if time >= artifact_time => {
                return Ok(Staleness::Stale(StaleReason::DependencyModified(
                    dependency.to_path_buf(),
                )))
            }
            Some(_) => {}
        }
    }

    Ok(Staleness::Fresh)
}

/// Returns the modification time of `path`, or `None` if it does not exist.
fn modified(path: &Path) -> Result<Option<SystemTime>, CacheError> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(CacheError::io(path, e)),
    };
    metadata
        .modified()
        .map(Some)
        .map_err(|e| CacheError::io(path, e))
}
