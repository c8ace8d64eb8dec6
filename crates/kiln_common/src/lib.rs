//! Shared foundational types used across the Kiln shader toolchain.
//!
//! This crate provides the pipeline-stage vocabulary that names compiled
//! artifacts, the preprocessor define vocabulary shared by every variant
//! table, and the common internal error type.

#![warn(missing_docs)]

pub mod define;
pub mod result;
pub mod stage;

pub use define::{Define, DEFAULT_DEFINE_PREFIX};
pub use result::{InternalError, KilnResult};
pub use stage::{Stage, SPIRV_SUFFIX};
