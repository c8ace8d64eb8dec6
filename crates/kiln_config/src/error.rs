//! Error types for configuration loading and toolkit discovery.

/// Errors that can occur when loading `kiln.toml` or locating the compilers.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// No toolkit root was configured and the environment variable is unset.
    #[error("{0} is not set and kiln.toml does not name the shader compilers")]
    MissingToolkit(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}
