//! Sidecar metadata records for the downstream display system.
//!
//! Each product keeps one record per run at
//! `output/metadata/products/<id>/<YYYYMMDDHH00>.json`. Images written during
//! the run are listed as frames inside it; writing the same image again
//! replaces its frame.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use wx_common::ProductId;

use crate::error::{Result, StorageError};
use crate::fs::write_atomic;

/// Corner coordinates for products that are not geo-referenced.
pub const EMPTY_CORNERS: [&str; 2] = ["0,0", "0,0"];

/// One rendered image as the display system sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductMetadata {
    pub product_id: ProductId,
    /// Run time, truncated to the hour.
    pub issue_time: DateTime<Utc>,
    pub image_filename: String,
    pub valid_until: DateTime<Utc>,
    /// `"lat,lon"` of the lower-left and upper-right corners.
    pub corner_coordinates: [String; 2],
    pub refresh_interval_seconds: u64,
}

/// An image entry inside a run record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFrame {
    pub image_filename: String,
    pub valid_until: DateTime<Utc>,
    pub corner_coordinates: [String; 2],
}

/// On-disk record of one product run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRunRecord {
    pub product_id: ProductId,
    pub issue_time: DateTime<Utc>,
    pub refresh_interval_seconds: u64,
    pub frames: Vec<ProductFrame>,
}

impl ProductRunRecord {
    /// `output/metadata/products/<id>/<YYYYMMDDHH00>.json`
    pub fn path(base_path: &Path, product_id: ProductId, issue_time: DateTime<Utc>) -> PathBuf {
        base_path
            .join("output")
            .join("metadata")
            .join("products")
            .join(product_id.to_string())
            .join(format!("{}.json", issue_time.format("%Y%m%d%H00")))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let json = std::fs::read(path).map_err(|e| StorageError::io(path, e))?;
        Ok(serde_json::from_slice(&json)?)
    }

    pub fn frame(&self, image_filename: &str) -> Option<&ProductFrame> {
        self.frames.iter().find(|f| f.image_filename == image_filename)
    }

    fn upsert(&mut self, frame: ProductFrame) {
        match self
            .frames
            .iter_mut()
            .find(|f| f.image_filename == frame.image_filename)
        {
            Some(existing) => *existing = frame,
            None => self.frames.push(frame),
        }
    }
}

impl ProductMetadata {
    pub fn new(
        product_id: ProductId,
        issue_time: DateTime<Utc>,
        image_filename: impl Into<String>,
        valid_until: DateTime<Utc>,
        corner_coordinates: [String; 2],
        refresh_interval_seconds: u64,
    ) -> Self {
        Self {
            product_id,
            issue_time: wx_common::truncate_to_hour(issue_time),
            image_filename: image_filename.into(),
            valid_until,
            corner_coordinates,
            refresh_interval_seconds,
        }
    }

    pub fn empty_corners() -> [String; 2] {
        EMPTY_CORNERS.map(String::from)
    }

    /// Path of the run record this image belongs to.
    pub fn path(&self, base_path: &Path) -> PathBuf {
        ProductRunRecord::path(base_path, self.product_id, self.issue_time)
    }

    fn frame(&self) -> ProductFrame {
        ProductFrame {
            image_filename: self.image_filename.clone(),
            valid_until: self.valid_until,
            corner_coordinates: self.corner_coordinates.clone(),
        }
    }

    /// Merge this image into its run record below `base_path`, returning the
    /// record path.
    pub fn write(&self, base_path: &Path) -> Result<PathBuf> {
        let path = self.path(base_path);
        let mut record = if path.exists() {
            ProductRunRecord::read(&path)?
        } else {
            ProductRunRecord {
                product_id: self.product_id,
                issue_time: self.issue_time,
                refresh_interval_seconds: self.refresh_interval_seconds,
                frames: Vec::new(),
            }
        };
        record.refresh_interval_seconds = self.refresh_interval_seconds;
        record.upsert(self.frame());

        let json = serde_json::to_vec_pretty(&record)?;
        write_atomic(&path, &json)?;
        info!(
            product_id = %self.product_id,
            image = %self.image_filename,
            frames = record.frames.len(),
            path = %path.display(),
            "Wrote product metadata"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(image: &str) -> ProductMetadata {
        ProductMetadata::new(
            ProductId(1203),
            Utc.with_ymd_and_hms(2023, 6, 18, 16, 12, 3).unwrap(),
            image,
            Utc.with_ymd_and_hms(2023, 6, 19, 12, 0, 0).unwrap(),
            ProductMetadata::empty_corners(),
            3600,
        )
    }

    #[test]
    fn test_issue_time_truncated() {
        let meta = sample("day1.png");
        assert_eq!(meta.issue_time, Utc.with_ymd_and_hms(2023, 6, 18, 16, 0, 0).unwrap());
    }

    #[test]
    fn test_metadata_path() {
        assert_eq!(
            sample("day1.png").path(Path::new("/srv/hdwx")),
            PathBuf::from("/srv/hdwx/output/metadata/products/1203/202306181600.json")
        );
    }

    #[test]
    fn test_images_share_one_run_record() {
        let dir = tempfile::tempdir().unwrap();
        let first = sample("day1.png").write(dir.path()).unwrap();
        let second = sample("day2.png").write(dir.path()).unwrap();
        assert_eq!(first, second);

        let record = ProductRunRecord::read(&first).unwrap();
        assert_eq!(record.product_id, ProductId(1203));
        assert_eq!(record.refresh_interval_seconds, 3600);
        let names: Vec<&str> = record.frames.iter().map(|f| f.image_filename.as_str()).collect();
        assert_eq!(names, vec!["day1.png", "day2.png"]);
    }

    #[test]
    fn test_rewrite_replaces_frame() {
        let dir = tempfile::tempdir().unwrap();
        sample("day1.png").write(dir.path()).unwrap();
        let mut again = sample("day1.png");
        again.corner_coordinates = ["20,-130".to_string(), "50,-60".to_string()];
        let path = again.write(dir.path()).unwrap();

        let record = ProductRunRecord::read(&path).unwrap();
        assert_eq!(record.frames.len(), 1);
        assert_eq!(record.frames[0].corner_coordinates[1], "50,-60");
    }

    #[test]
    fn test_json_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample("day1.png").write(dir.path()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["product_id"], 1203);
        assert_eq!(json["refresh_interval_seconds"], 3600);
        assert_eq!(json["frames"][0]["image_filename"], "day1.png");
        assert_eq!(json["frames"][0]["corner_coordinates"][0], "0,0");
    }
}
