//! Error types for the basemap crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BasemapError {
    #[error("Failed to download {layer}: {source}")]
    Download {
        layer: &'static str,
        #[source]
        source: ingestion::IngestionError,
    },

    #[error("Failed to read shapefile {path}: {message}")]
    Shapefile { path: String, message: String },

    #[error("Cache error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BasemapError>;
