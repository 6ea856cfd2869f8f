//! Source data ingestion.
//!
//! Provides the pieces shared by the product pipelines:
//!
//! - HTTP fetching of bundles, bulletins and index pages
//! - Zip extraction into scratch directories

pub mod archive;
pub mod error;
pub mod fetch;

// Re-exports
pub use archive::extract_zip;
pub use error::{IngestionError, Result};
pub use fetch::HttpFetcher;
