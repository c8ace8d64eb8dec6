//! Source classification.

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::source::suffix_chain;
use crate::table::{self, Backend, VariantDescriptor};

/// File stem of the hand-written sky pipeline.
pub const SKY_STEM: &str = "sky_unified";

/// Suffix segment marking a ray-tracing pipeline source (`rtgi.rt.slang`).
pub const RAY_TRACE_MARKER: &str = "rt";

/// Terminal suffix of Slang sources.
pub const SLANG_SUFFIX: &str = "slang";

/// Directory whose Slang sources are multi-pass materials.
pub const MATERIALS_DIR: &str = "materials";

/// Terminal suffixes of legacy GLSL raster and compute sources.
pub const LEGACY_SUFFIXES: [&str; 4] = ["vert", "geom", "frag", "comp"];

/// How a source file expands into compiled artifacts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderCategory {
    /// The sky pipeline: one fragment stage and two miss stages.
    Sky,
    /// A ray-tracing pipeline compiled to its ray-generation stage.
    RayTracePipeline,
    /// A material compiled once per pass, stage and masking mode.
    Material,
    /// Any other Slang source, compiled once with entry point `main`.
    Generic,
    /// A GLSL stage source compiled by the legacy backend.
    LegacyRaster,
    /// Not a shader.
    Unrecognized,
}

impl ShaderCategory {
    /// The variant table for this category.
    pub fn variants(self) -> &'static [VariantDescriptor] {
        match self {
            ShaderCategory::Sky => table::SKY,
            ShaderCategory::RayTracePipeline => table::RAY_TRACE_PIPELINE,
            ShaderCategory::Material => table::MATERIAL,
            ShaderCategory::Generic => table::GENERIC,
            ShaderCategory::LegacyRaster => table::LEGACY_RASTER,
            ShaderCategory::Unrecognized => &[],
        }
    }

    /// The compiler that builds every variant of this category.
    pub fn backend(self) -> Backend {
        match self {
            ShaderCategory::LegacyRaster => Backend::Glsl,
            _ => Backend::Slang,
        }
    }

    /// Returns `true` for anything that compiles.
    pub fn is_shader(self) -> bool {
        self != ShaderCategory::Unrecognized
    }
}

impl fmt::Display for ShaderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderCategory::Sky => "sky pipeline",
            ShaderCategory::RayTracePipeline => "ray-tracing pipeline",
            ShaderCategory::Material => "material",
            ShaderCategory::Generic => "slang",
            ShaderCategory::LegacyRaster => "glsl",
            ShaderCategory::Unrecognized => "unrecognized",
        };
        f.write_str(name)
    }
}

/// Classifies a source path. The first matching rule wins:
///
/// 1. stem `sky_unified` → [`ShaderCategory::Sky`]
/// 2. a `.rt` suffix anywhere in the chain → [`ShaderCategory::RayTracePipeline`]
/// 3. `.slang` inside a `materials` directory → [`ShaderCategory::Material`]
/// 4. any other `.slang` → [`ShaderCategory::Generic`]
/// 5. `.vert`, `.geom`, `.frag`, `.comp` → [`ShaderCategory::LegacyRaster`]
pub fn classify(path: &Path) -> ShaderCategory {
    if path.file_stem().and_then(|s| s.to_str()) == Some(SKY_STEM) {
        return ShaderCategory::Sky;
    }

    let suffixes = suffix_chain(path);
    if suffixes.iter().any(|s| s == RAY_TRACE_MARKER) {
        return ShaderCategory::RayTracePipeline;
    }

    match suffixes.last().map(String::as_str) {
        Some(SLANG_SUFFIX) => {
            let parent = path
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str());
            if parent == Some(MATERIALS_DIR) {
                ShaderCategory::Material
            } else {
                ShaderCategory::Generic
            }
        }
        Some(suffix) if LEGACY_SUFFIXES.contains(&suffix) => ShaderCategory::LegacyRaster,
        _ => ShaderCategory::Unrecognized,
    }
}
