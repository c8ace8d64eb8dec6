//! Variant tables, one per shader category.
//!
//! Adding a pass or a stage is a matter of adding a row here. Rows are
//! compiled in table order.

use kiln_common::{Define, Stage};
use serde::Serialize;

use Define::*;

/// The external compiler that builds a variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The Slang compiler: entry point selection, defines, include listing.
    Slang,
    /// The GLSL reference compiler: the stage is implied by the source suffix.
    Glsl,
}

/// One row of a variant table.
#[derive(Debug, PartialEq, Eq)]
pub struct VariantDescriptor {
    /// Appended to the base output stem (`_gbuffer_masked`), possibly empty.
    pub stem_suffix: &'static str,
    /// Pipeline stage; decides the output suffix.
    pub stage: Stage,
    /// Entry point symbol, `None` when the backend cannot select one.
    pub entry_point: Option<&'static str>,
    /// Preprocessor defines enabled for this variant.
    pub defines: &'static [Define],
}

const fn row(
    stem_suffix: &'static str,
    stage: Stage,
    entry_point: &'static str,
    defines: &'static [Define],
) -> VariantDescriptor {
    VariantDescriptor {
        stem_suffix,
        stage,
        entry_point: Some(entry_point),
        defines,
    }
}

const VS: &str = "main_vs";
const FS: &str = "main_fs";
const MISS: &str = "main_miss";
const ANYHIT: &str = "main_anyhit";
const CLOSESTHIT: &str = "main_closesthit";

const SHADOW: &[Define] = &[DepthOnly, CascadedShadowMap, Multiview];
const SHADOW_MASKED: &[Define] = &[DepthOnly, AlphaMasked, CascadedShadowMap, Multiview];
const RSM: &[Define] = &[ReflectiveShadowMap, Multiview];
const RSM_MASKED: &[Define] = &[AlphaMasked, ReflectiveShadowMap, Multiview];
const PREPASS: &[Define] = &[DepthOnly, MainView];
const PREPASS_MASKED: &[Define] = &[DepthOnly, AlphaMasked, MainView];
const GBUFFER: &[Define] = &[MainView];
const GBUFFER_MASKED: &[Define] = &[AlphaMasked, MainView];
const OCCLUSION: &[Define] = &[RayTracing, RayTraceOcclusion];
const OCCLUSION_MASKED: &[Define] = &[RayTracing, RayTraceOcclusion, AlphaMasked];
const GI: &[Define] = &[RayTracing, RayTraceGlobalIllumination];
const GI_MASKED: &[Define] = &[RayTracing, RayTraceGlobalIllumination, AlphaMasked];

/// The sky: lit in the main view, and as the miss shader of both ray types.
pub const SKY: &[VariantDescriptor] = &[
    row("", Stage::Fragment, FS, &[MainView]),
    row("_occlusion", Stage::Miss, MISS, OCCLUSION),
    row("_gi", Stage::Miss, MISS, GI),
];

/// A ray-tracing pipeline source compiles to its ray-generation stage.
pub const RAY_TRACE_PIPELINE: &[VariantDescriptor] =
    &[row("", Stage::Raw, "main_raygen", &[RayTracing])];

/// Materials, one block per pass.
///
/// Masked sub-variants alpha-test, so they gain a fragment or any-hit stage
/// that the opaque ones do without. The reflective shadow map and gbuffer
/// passes write colour and always have a fragment stage.
pub const MATERIAL: &[VariantDescriptor] = &[
    // Shadow
    row("_shadow", Stage::Vertex, VS, SHADOW),
    row("_shadow_masked", Stage::Vertex, VS, SHADOW_MASKED),
    row("_shadow_masked", Stage::Fragment, FS, SHADOW_MASKED),
    // Reflective shadow map
    row("_rsm", Stage::Vertex, VS, RSM),
    row("_rsm", Stage::Fragment, FS, RSM),
    row("_rsm_masked", Stage::Vertex, VS, RSM_MASKED),
    row("_rsm_masked", Stage::Fragment, FS, RSM_MASKED),
    // Depth prepass
    row("_prepass", Stage::Vertex, VS, PREPASS),
    row("_prepass_masked", Stage::Vertex, VS, PREPASS_MASKED),
    row("_prepass_masked", Stage::Fragment, FS, PREPASS_MASKED),
    // Gbuffer
    row("_gbuffer", Stage::Vertex, VS, GBUFFER),
    row("_gbuffer", Stage::Fragment, FS, GBUFFER),
    row("_gbuffer_masked", Stage::Vertex, VS, GBUFFER_MASKED),
    row("_gbuffer_masked", Stage::Fragment, FS, GBUFFER_MASKED),
    // Ray traced occlusion
    row("_occlusion", Stage::ClosestHit, CLOSESTHIT, OCCLUSION),
    row("_occlusion_masked", Stage::AnyHit, ANYHIT, OCCLUSION_MASKED),
    row("_occlusion_masked", Stage::ClosestHit, CLOSESTHIT, OCCLUSION_MASKED),
    // Ray traced GI
    row("_gi", Stage::ClosestHit, CLOSESTHIT, GI),
    row("_gi_masked", Stage::AnyHit, ANYHIT, GI_MASKED),
    row("_gi_masked", Stage::ClosestHit, CLOSESTHIT, GI_MASKED),
];

/// Plain Slang sources.
pub const GENERIC: &[VariantDescriptor] = &[row("", Stage::Raw, "main", &[])];

/// GLSL sources: no entry point, no defines.
pub const LEGACY_RASTER: &[VariantDescriptor] = &[VariantDescriptor {
    stem_suffix: "",
    stage: Stage::Raw,
    entry_point: None,
    defines: &[],
}];
