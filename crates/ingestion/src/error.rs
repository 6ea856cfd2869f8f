//! Error types for the ingestion crate.

use thiserror::Error;

/// Errors that can occur while fetching or unpacking source data.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid archive: {0}")]
    Archive(String),

    #[error("Failed to write file: {0}")]
    FileWrite(#[from] std::io::Error),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestionError>;
