//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading `fragkit.toml` or checking its values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid fragkit.toml")]
    Toml(#[from] toml::de::Error),

    #[error("invalid fragkit settings: {0}")]
    Validation(String),
}
