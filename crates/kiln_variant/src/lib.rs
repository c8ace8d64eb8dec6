//! Shader classification and variant expansion.
//!
//! A source file is classified into a [`ShaderCategory`] by one pure
//! function, and each category maps to a static table of
//! [`VariantDescriptor`]s. Expanding a [`SourceAsset`] pairs every
//! descriptor with the artifact path it compiles to.

#![warn(missing_docs)]

pub mod artifact;
pub mod category;
pub mod source;
pub mod table;

pub use artifact::OutputArtifact;
pub use category::{classify, ShaderCategory};
pub use source::SourceAsset;
pub use table::{Backend, VariantDescriptor};

use std::path::Path;

/// One concrete compilation of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// The table row this variant was generated from.
    pub descriptor: &'static VariantDescriptor,
    /// Which compiler builds it.
    pub backend: Backend,
    /// Where the compiled binary is written.
    pub artifact: OutputArtifact,
}

/// Expands `asset` into every variant its category requires.
///
/// Unrecognized files expand to nothing.
pub fn expand(asset: &SourceAsset, output_root: &Path) -> Vec<Variant> {
    let category = asset.category();
    let base = OutputArtifact::base(output_root, asset);
    category
        .variants()
        .iter()
        .map(|descriptor| Variant {
            descriptor,
            backend: category.backend(),
            artifact: base.for_variant(descriptor.stem_suffix, descriptor.stage),
        })
        .collect()
}
