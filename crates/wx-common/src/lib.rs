//! Common types and utilities shared by the forecast product pipelines.

pub mod bbox;
pub mod product;
pub mod time;

pub use bbox::{BoundingBox, CONUS_EXTENT};
pub use product::{OutputTree, ProductDestination, ProductId};
pub use time::{partition_dir, truncate_to_hour, valid_line};
