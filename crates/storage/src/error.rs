//! Error types for the storage crate.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize metadata: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to encode image: {0}")]
    Render(#[from] renderer::RenderError),

    #[error("Unknown sink mode '{0}' (expected auto, helpers or plain)")]
    UnknownSinkMode(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
