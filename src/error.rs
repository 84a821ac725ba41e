//! Error types for the campaign generation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Library and download errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Image fetch failed for {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    #[error("Image fetch returned status {status} for {url}")]
    FetchStatus { url: String, status: u16 },

    #[error("Failed to create image download client: {0}")]
    ClientInit(String),

    #[error("Invalid asset name: {0:?}")]
    InvalidName(String),

    #[error("Failed to write asset {path:?}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Model output that does not match the campaign schema
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Model response is empty")]
    EmptyResponse,

    #[error("Model response is not a JSON campaign array: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Model response contained no campaigns")]
    NoCampaigns,

    #[error("Campaign {index} has invalid {field}: {value:?}")]
    InvalidField {
        index: usize,
        field: &'static str,
        value: String,
    },
}

/// Archive packaging errors
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Archive I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Provider, configuration and command-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Provider model not found: {0}")]
    ProviderModelNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Packaging failed: {0}")]
    PackageError(#[from] PackageError),

    #[error("Invalid campaign records: {0}")]
    InvalidRecords(String),

    #[error("Failed to read {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
