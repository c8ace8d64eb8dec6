//! Per-artifact dependency manifests.
//!
//! A manifest sits next to its artifact with the artifact's last suffix
//! replaced by `.deps` (`brick_gi.closesthit.spv` → `brick_gi.closesthit.deps`).
//! It is plain text with one dependency path per line, rewritten in full
//! after every compile attempt.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::CacheError;

/// Extension of manifest files.
pub const MANIFEST_EXT: &str = "deps";

/// The deduplicated set of files an artifact included when last compiled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyManifest {
    dependencies: BTreeSet<PathBuf>,
}

impl DependencyManifest {
    /// Creates an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the manifest path belonging to `artifact`.
    pub fn path_for(artifact: &Path) -> PathBuf {
        artifact.with_extension(MANIFEST_EXT)
    }

    /// Returns `true` if `dependency` is recorded.
    pub fn contains(&self, dependency: &Path) -> bool {
        self.dependencies.contains(dependency)
    }

    /// Number of distinct dependencies.
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Returns `true` if no dependency is recorded.
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Iterates over the recorded dependencies.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dependencies.iter().map(PathBuf::as_path)
    }

    /// Loads the manifest of `artifact`.
    ///
    /// Returns `Ok(None)` if no manifest has been written yet. Blank lines are
    /// skipped; duplicate lines collapse.
    pub fn load(artifact: &Path) -> Result<Option<Self>, CacheError> {
        let path = Self::path_for(artifact);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::io(path, e)),
        };
        Ok(Some(Self::parse(&content)))
    }

    /// Parses manifest text.
    pub fn parse(content: &str) -> Self {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect()
    }

    /// Writes the manifest of `artifact`, replacing any previous content.
    pub fn save(&self, artifact: &Path) -> Result<(), CacheError> {
        let path = Self::path_for(artifact);
        let mut text = String::new();
        for dependency in &self.dependencies {
            text.push_str(&dependency.to_string_lossy());
            text.push('\n');
        }
        std::fs::write(&path, text).map_err(|e| CacheError::io(path, e))
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for DependencyManifest {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            dependencies: iter.into_iter().map(Into::into).collect(),
        }
    }
}
