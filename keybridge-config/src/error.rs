//! Error type for keybridge-config

use std::fmt;

/// Everything that can go wrong while loading the bridge config
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// File I/O error
    FileRead { path: String, message: String },
    /// TOML parsing error
    TomlParse { path: String, message: String },
    /// A value was parsed but is out of range
    Validation { field: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileRead { path, message } => {
                write!(f, "Failed to read config file '{}': {}", path, message)
            }
            ConfigError::TomlParse { path, message } => {
                write!(f, "Failed to parse '{}': {}", path, message)
            }
            ConfigError::Validation { field, message } => {
                write!(f, "Validation error in '{}': {}", field, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
