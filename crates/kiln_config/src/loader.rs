//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::KilnConfig;
use std::path::{Path, PathBuf};

/// File name looked up in the shader input root.
pub const CONFIG_FILE_NAME: &str = "kiln.toml";

/// Returns `<input_dir>/kiln.toml` if it exists.
pub fn find_config(input_dir: &Path) -> Option<PathBuf> {
    let path = input_dir.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}

/// Loads and validates a configuration file.
pub fn load_config(config_path: &Path) -> Result<KilnConfig, ConfigError> {
    let content = std::fs::read_to_string(config_path)?;
    log::debug!("loaded configuration from {}", config_path.display());
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<KilnConfig, ConfigError> {
    let config: KilnConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates values that would otherwise produce broken compiler command lines.
fn validate_config(config: &KilnConfig) -> Result<(), ConfigError> {
    let prefix = &config.compile.define_prefix;
    if prefix.starts_with(|c: char| c.is_ascii_digit())
        || !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ConfigError::ValidationError(format!(
            "define_prefix '{prefix}' is not a valid macro name prefix"
        )));
    }
    if config.compile.glsl_target_env.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "glsl_target_env must not be empty".to_string(),
        ));
    }
    if config.compile.slang_target.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "slang_target must not be empty".to_string(),
        ));
    }
    Ok(())
}
