//! Error types for the tafsir translation pipeline.
//!
//! Uses `thiserror` for structured error definitions that provide
//! clear context about what went wrong.

use thiserror::Error;

/// Error type for translation provider calls.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// HTTP request to the provider failed
    #[error("Translation request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Provider returned an error response
    #[error("Provider error: {0}")]
    ApiError(String),

    /// Failed to parse the provider response
    #[error("Failed to parse provider response: {0}")]
    ParseError(String),

    /// Provider answered with no translated text
    #[error("Provider returned an empty result")]
    EmptyResult,
}

/// Error type for configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse config file
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Invalid configuration value
    #[error("Invalid config value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Config directory not found
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Error type for translation cache operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to read a cache entry
    #[error("Failed to read cache entry: {0}")]
    ReadError(std::io::Error),

    /// Failed to write a cache entry
    #[error("Failed to write cache entry: {0}")]
    WriteError(std::io::Error),
}

/// Error type for tafsir corpus loading.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// Failed to read the data directory
    #[error("Failed to read tafsir data: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configured data directory does not exist
    #[error("Data directory not found: {0}")]
    MissingDataDir(String),
}

/// Result type alias using anyhow for application-level error handling.
pub type Result<T> = anyhow::Result<T>;
