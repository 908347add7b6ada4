//! Error types for gfwlist.

use std::io;

use thiserror::Error;

/// Main error type for gfwlist operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("metrics error: {0}")]
    Metrics(String),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Validation errors for configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("refresh_interval_secs must be greater than 0")]
    ZeroRefreshInterval,

    #[error("request_timeout_secs must be greater than 0")]
    ZeroRequestTimeout,

    #[error("inline rule cannot be empty")]
    EmptyRule,

    #[error("list source has empty file path")]
    EmptySourcePath,

    #[error("list source has empty URL")]
    EmptySourceUrl,

    #[error("list source has invalid URL (must start with http:// or https://): {url:?}")]
    InvalidSourceUrl { url: String },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;
