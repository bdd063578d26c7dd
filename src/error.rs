// src/error.rs
//
// Error types. Only caller contract violations and settings problems are
// errors; malformed markup never is (it is passed through verbatim).

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the formatting entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("position {position} is outside the source text (length {len})")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("position {0} is not on a character boundary")]
    NotCharBoundary(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised while loading settings files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

pub type FormatResult<T> = Result<T, FormatError>;

pub type ConfigResult<T> = Result<T, ConfigError>;
