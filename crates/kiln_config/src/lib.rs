//! Parsing and validation of `kiln.toml` build settings, and discovery of
//! the external shader compilers.
//!
//! The configuration file is optional: every setting has a default that
//! reproduces the stock Vulkan SDK command lines. Toolkit discovery is the
//! only step that can fail before any shader is looked at.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod toolkit;
pub mod types;

pub use error::ConfigError;
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use toolkit::{Toolkit, TOOLKIT_ENV_VAR};
pub use types::*;
