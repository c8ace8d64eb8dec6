//! Pipeline stages and the artifact suffixes they compile to.

use serde::Serialize;
use std::fmt;

/// Suffix shared by every compiled SPIR-V artifact.
pub const SPIRV_SUFFIX: &str = ".spv";

/// The pipeline stage a compiled artifact is loaded into.
///
/// The stage decides the artifact's output suffix: the renderer locates
/// `brick_gbuffer.frag.spv` by stage, so the mapping here is part of the
/// on-disk contract with the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Vertex shader (`.vert.spv`).
    Vertex,
    /// Fragment shader (`.frag.spv`).
    Fragment,
    /// Ray-tracing miss shader (`.miss.spv`).
    Miss,
    /// Ray-tracing any-hit shader (`.anyhit.spv`).
    AnyHit,
    /// Ray-tracing closest-hit shader (`.closesthit.spv`).
    ClosestHit,
    /// Stage implied by the source itself; the artifact only gains `.spv`.
    Raw,
}

impl Stage {
    /// Returns the full output suffix, including the trailing `.spv`.
    pub fn output_suffix(self) -> &'static str {
        match self {
            Stage::Vertex => ".vert.spv",
            Stage::Fragment => ".frag.spv",
            Stage::Miss => ".miss.spv",
            Stage::AnyHit => ".anyhit.spv",
            Stage::ClosestHit => ".closesthit.spv",
            Stage::Raw => SPIRV_SUFFIX,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
            Stage::Miss => "miss",
            Stage::AnyHit => "any-hit",
            Stage::ClosestHit => "closest-hit",
            Stage::Raw => "raw",
        };
        f.write_str(name)
    }
}
