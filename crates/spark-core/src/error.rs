//! Error types for Spark

use thiserror::Error;

/// The main error type for Spark operations
#[derive(Debug, Error)]
pub enum SparkError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid field type: expected {expected} for '{field}'")]
    InvalidFieldType { field: String, expected: String },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Spark operations
pub type Result<T> = std::result::Result<T, SparkError>;

impl From<toml::de::Error> for SparkError {
    fn from(err: toml::de::Error) -> Self {
        SparkError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for SparkError {
    fn from(err: toml::ser::Error) -> Self {
        SparkError::TomlSerError(err.to_string())
    }
}
