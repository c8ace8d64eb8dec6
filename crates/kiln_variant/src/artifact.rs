//! Output paths of compiled artifacts.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use kiln_common::{Stage, SPIRV_SUFFIX};

use crate::category::SLANG_SUFFIX;
use crate::source::SourceAsset;

/// A compiled artifact path under the output root.
///
/// The artifact sits at the same relative directory as its source, so the
/// path is a pure function of the source's relative path and the variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputArtifact {
    path: PathBuf,
}

impl OutputArtifact {
    /// The base artifact of `source` before variant expansion.
    ///
    /// Slang sources swap `.slang` for `.spv` (`brick.slang` → `brick.spv`);
    /// other shaders keep their stage suffix (`fog.vert` → `fog.vert.spv`).
    pub fn base(output_root: &Path, source: &SourceAsset) -> Self {
        let mirrored = output_root.join(source.relative());
        let path = if source.terminal_suffix() == Some(SLANG_SUFFIX) {
            mirrored.with_extension(&SPIRV_SUFFIX[1..])
        } else {
            let mut name = mirrored
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_default();
            name.push(SPIRV_SUFFIX);
            mirrored.with_file_name(name)
        };
        Self { path }
    }

    /// Derives a variant artifact: the base stem, then `stem_suffix`, then
    /// the stage's output suffix (`brick` + `_gi_masked` + `.anyhit.spv`).
    pub fn for_variant(&self, stem_suffix: &str, stage: Stage) -> Self {
        let mut name: OsString = self
            .path
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_default();
        name.push(stem_suffix);
        name.push(stage.output_suffix());
        Self {
            path: self.path.with_file_name(name),
        }
    }

    /// The artifact path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The directory the artifact is written into.
    pub fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }
}
