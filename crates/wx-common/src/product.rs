//! Product identifiers and their places in the output tree.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::partition_dir;

/// Numeric product id understood by the downstream display system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Top-level output tree a product is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputTree {
    /// Finished, decorated images (`output/products`)
    Products,
    /// Geo-referenced transparent overlays (`output/gisproducts`)
    GisProducts,
}

impl OutputTree {
    pub fn dir_name(&self) -> &'static str {
        match self {
            OutputTree::Products => "products",
            OutputTree::GisProducts => "gisproducts",
        }
    }
}

/// Where a product's images live: `output/<tree>/<segments...>/YYYY/MM/DD/HH00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductDestination {
    pub id: ProductId,
    pub tree: OutputTree,
    pub segments: &'static [&'static str],
}

impl ProductDestination {
    pub const fn new(id: u32, tree: OutputTree, segments: &'static [&'static str]) -> Self {
        Self {
            id: ProductId(id),
            tree,
            segments,
        }
    }

    /// Product family directory, above the date partitions.
    pub fn family_dir(&self, base_path: &Path) -> PathBuf {
        let mut path = base_path.join("output").join(self.tree.dir_name());
        for segment in self.segments {
            path.push(segment);
        }
        path
    }

    /// Directory holding every image of one run.
    pub fn run_dir(&self, base_path: &Path, time: DateTime<Utc>) -> PathBuf {
        self.family_dir(base_path).join(partition_dir(time))
    }
}
