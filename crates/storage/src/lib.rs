//! Output storage for forecast products.
//!
//! Provides:
//! - The idempotency gate over date/hour partitioned run directories
//! - Sidecar metadata records for the downstream display system
//! - Sink strategies that dress and save rendered images

pub mod error;
pub mod fs;
pub mod gate;
pub mod metadata;
pub mod sink;

pub use error::{Result, StorageError};
pub use fs::write_atomic;
pub use gate::{is_complete, IdempotencyGate};
pub use metadata::{ProductFrame, ProductMetadata, ProductRunRecord, EMPTY_CORNERS};
pub use sink::{HelperSink, PlainSink, ProductSink, SinkMode};
