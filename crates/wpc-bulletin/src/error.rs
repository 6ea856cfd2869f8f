//! Error types for bulletin parsing and the station layer.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BulletinError {
    #[error(transparent)]
    Fetch(#[from] ingestion::IngestionError),

    #[error("Bulletin has no VALID line")]
    MissingValidTime,

    #[error("Invalid VALID stamp '{0}'")]
    InvalidValidTime(String),

    #[error("Invalid coordinate group '{0}'")]
    InvalidCoordinate(String),

    #[error("Invalid pressure value '{0}'")]
    InvalidPressure(String),

    #[error("{kind} line has no coordinates")]
    EmptyBoundary { kind: &'static str },

    #[error("Invalid METAR catalog: {0}")]
    Catalog(String),

    #[error("No METAR collection near {0}")]
    NoMetarCollection(String),

    #[error("Invalid airport table: {0}")]
    Airports(#[from] csv::Error),

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

pub type Result<T> = std::result::Result<T, BulletinError>;
