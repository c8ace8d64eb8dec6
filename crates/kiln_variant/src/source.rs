//! Shader source files under the input root.

use std::path::{Path, PathBuf};

use kiln_common::{InternalError, KilnResult};

use crate::category::{classify, ShaderCategory};

/// A file under the input root, with its derived category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAsset {
    path: PathBuf,
    relative: PathBuf,
    suffixes: Vec<String>,
    category: ShaderCategory,
}

impl SourceAsset {
    /// Describes `path`, which must lie under `input_root`.
    pub fn new(input_root: &Path, path: &Path) -> KilnResult<Self> {
        let relative = path
            .strip_prefix(input_root)
            .map_err(|_| {
                InternalError::new(format!(
                    "{} is not under input root {}",
                    path.display(),
                    input_root.display()
                ))
            })?
            .to_path_buf();
        Ok(Self {
            path: path.to_path_buf(),
            suffixes: suffix_chain(path),
            category: classify(path),
            relative,
        })
    }

    /// Full path of the source file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the input root.
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// The last suffix, if any.
    pub fn terminal_suffix(&self) -> Option<&str> {
        self.suffixes.last().map(String::as_str)
    }

    /// The category that decides how this file expands.
    pub fn category(&self) -> ShaderCategory {
        self.category
    }
}

/// Splits a file name into its dotted suffixes: `rtgi.rt.slang` → `["rt", "slang"]`.
///
/// Leading dots belong to the name (`.clang-format` has no suffix) and
/// empty segments are dropped.
pub fn suffix_chain(path: &Path) -> Vec<String> {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return Vec::new();
    };
    name.trim_start_matches('.')
        .split('.')
        .skip(1)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
