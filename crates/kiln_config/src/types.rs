//! Configuration types deserialized from `kiln.toml`.

use kiln_common::DEFAULT_DEFINE_PREFIX;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

/// The top-level build configuration parsed from `kiln.toml`.
///
/// Every section is optional; an empty file (or no file at all) yields the
/// defaults used by the stock Vulkan SDK tooling.
#[derive(Debug, Default, Deserialize)]
pub struct KilnConfig {
    /// Where the shader compilers live.
    #[serde(default)]
    pub toolkit: ToolkitConfig,
    /// Flags shared by every compile command.
    #[serde(default)]
    pub compile: CompileConfig,
    /// Additional search paths.
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Overrides for toolkit discovery.
#[derive(Debug, Default, Deserialize)]
pub struct ToolkitConfig {
    /// Toolkit root used instead of the `VULKAN_SDK` environment variable.
    pub root: Option<PathBuf>,
    /// Explicit path to the Slang compiler.
    pub slangc: Option<PathBuf>,
    /// Explicit path to the GLSL reference compiler.
    pub glslang: Option<PathBuf>,
}

/// Settings that shape every compiler command line.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    /// Emit debug information (`-g`).
    pub debug_info: bool,
    /// Run the optimizer. When false, `-O0` (Slang) and `-Od` (GLSL) are passed.
    pub optimize: bool,
    /// Use scalar block layout for Vulkan buffers (`-fvk-use-scalar-layout`).
    pub scalar_layout: bool,
    /// Prefix prepended to every variant define.
    pub define_prefix: String,
    /// Slang `-target` value.
    pub slang_target: String,
    /// GLSL `--target-env` value.
    pub glsl_target_env: String,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            debug_info: true,
            optimize: false,
            scalar_layout: true,
            define_prefix: DEFAULT_DEFINE_PREFIX.to_string(),
            slang_target: "spirv".to_string(),
            glsl_target_env: "vulkan1.3".to_string(),
        }
    }
}

/// Extra include directories.
#[derive(Debug, Default, Deserialize)]
pub struct PathsConfig {
    /// Include directories, relative to the directory holding `kiln.toml`.
    ///
    /// Accepts either a single string or a list of strings.
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub include: Vec<String>,
}

impl KilnConfig {
    /// Resolves the configured include directories against `base_dir`.
    ///
    /// Absolute entries are kept as-is.
    pub fn include_dirs(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.paths
            .include
            .iter()
            .map(|dir| base_dir.join(dir))
            .collect()
    }
}

/// Deserializes a field that can be either a single string or a list of strings.
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}
