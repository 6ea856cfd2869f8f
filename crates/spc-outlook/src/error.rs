//! Error types for outlook loading and rendering.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutlookError {
    #[error(transparent)]
    Fetch(#[from] ingestion::IngestionError),

    #[error("No .info descriptor in {0}")]
    MissingInfo(PathBuf),

    #[error("Malformed .info descriptor: {0}")]
    MalformedInfo(String),

    #[error("Shapefile {shapefile} is missing its {extension} companion")]
    MissingCompanion {
        shapefile: PathBuf,
        extension: &'static str,
    },

    #[error("Failed to read shapefile {path}: {message}")]
    Shapefile { path: PathBuf, message: String },

    #[error("Shapefile {path} has no usable '{field}' attribute")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("Unknown outlook hazard suffix '{0}'")]
    UnknownHazard(String),

    #[error("Category {code} has more than one style")]
    ConflictingStyles { code: i64 },

    #[error("Invalid color '{0}' in outlook attributes")]
    InvalidColor(String),

    #[error("Issue time not found on the outlook index page")]
    IssueTimeNotFound,

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Render(#[from] renderer::RenderError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OutlookError>;
