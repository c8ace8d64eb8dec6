//! Locating the external shader compilers.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::ToolkitConfig;

/// Environment variable naming the Vulkan SDK root.
pub const TOOLKIT_ENV_VAR: &str = "VULKAN_SDK";

/// Absolute paths of the two compiler executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolkit {
    /// Slang compiler used for every `.slang` variant.
    pub slangc: PathBuf,
    /// GLSL reference compiler used for legacy raster shaders.
    pub glslang: PathBuf,
}

impl Toolkit {
    /// Discovers the toolkit from the configuration and the process environment.
    pub fn discover(config: &ToolkitConfig) -> Result<Self, ConfigError> {
        let env_root = std::env::var_os(TOOLKIT_ENV_VAR).map(PathBuf::from);
        Self::resolve(config, env_root)
    }

    /// Resolves compiler paths from explicit overrides, falling back to
    /// `<root>/bin/<tool>` (`<root>\Bin\<tool>.exe` on Windows).
    ///
    /// The root is only required for executables that are not overridden.
    pub fn resolve(config: &ToolkitConfig, env_root: Option<PathBuf>) -> Result<Self, ConfigError> {
        let root = config.root.clone().or(env_root);
        let locate = |explicit: &Option<PathBuf>, tool: &str| -> Result<PathBuf, ConfigError> {
            if let Some(path) = explicit {
                return Ok(path.clone());
            }
            match &root {
                Some(root) => Ok(tool_path(root, tool)),
                None => Err(ConfigError::MissingToolkit(TOOLKIT_ENV_VAR.to_string())),
            }
        };

        let toolkit = Self {
            slangc: locate(&config.slangc, "slangc")?,
            glslang: locate(&config.glslang, "glslangValidator")?,
        };
        log::info!("using Slang compiler {}", toolkit.slangc.display());
        log::info!("using GLSL compiler {}", toolkit.glslang.display());
        Ok(toolkit)
    }
}

fn tool_path(root: &Path, tool: &str) -> PathBuf {
    if cfg!(windows) {
        root.join("Bin").join(format!("{tool}.exe"))
    } else {
        root.join("bin").join(tool)
    }
}
