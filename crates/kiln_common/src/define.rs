//! Preprocessor define vocabulary shared by every variant table.

use serde::Serialize;
use std::fmt;

/// Prefix prepended to every define token unless configured otherwise.
pub const DEFAULT_DEFINE_PREFIX: &str = "SAH_";

/// A preprocessor macro that selects one shader configuration.
///
/// Each define is passed to the compiler as `<prefix><TOKEN>=1`. The token
/// spellings match the `#if` guards used in the shader sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Define {
    /// Any ray-tracing stage.
    RayTracing,
    /// Ray-traced occlusion (shadow/AO rays).
    RayTraceOcclusion,
    /// Ray-traced global illumination.
    RayTraceGlobalIllumination,
    /// Depth-only output; colour attachments are not written.
    DepthOnly,
    /// Alpha-tested (cutout) geometry.
    AlphaMasked,
    /// Cascaded shadow map rendering.
    CascadedShadowMap,
    /// One draw renders several views via multiview.
    Multiview,
    /// The main camera view.
    MainView,
    /// Reflective shadow map (flux/normal output for light injection).
    ReflectiveShadowMap,
}

impl Define {
    /// Returns the macro name without prefix, as the shader sources test it.
    pub fn token(self) -> &'static str {
        match self {
            Define::RayTracing => "RT",
            Define::RayTraceOcclusion => "RT_OCCLUSION",
            Define::RayTraceGlobalIllumination => "RT_GI",
            Define::DepthOnly => "DEPTH_ONLY",
            Define::AlphaMasked => "MASKED",
            Define::CascadedShadowMap => "CSM",
            Define::Multiview => "MULTIVIEW",
            Define::MainView => "MAIN_VIEW",
            Define::ReflectiveShadowMap => "RSM",
        }
    }

    /// Renders the `-D` argument value, e.g. `SAH_RT_GI=1`.
    pub fn render(self, prefix: &str) -> String {
        format!("{prefix}{}=1", self.token())
    }
}

impl fmt::Display for Define {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
