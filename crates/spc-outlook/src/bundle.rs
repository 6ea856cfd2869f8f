//! Fetching and scanning zipped outlook bundles.

use std::fs;
use std::path::{Path, PathBuf};

use ingestion::{extract_zip, HttpFetcher};
use tracing::{debug, info};

use crate::error::{OutlookError, Result};
use crate::info::ValidityWindow;

/// An extracted bundle: its validity window and shapefiles sorted by name.
#[derive(Debug, Clone)]
pub struct OutlookBundle {
    pub dir: PathBuf,
    pub window: ValidityWindow,
    pub shapefiles: Vec<PathBuf>,
}

impl OutlookBundle {
    /// Scan an extracted bundle directory.
    pub fn scan(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir).map_err(|source| OutlookError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut info = None;
        let mut shapefiles = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| OutlookError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?
                .path();
            match path.extension().and_then(|e| e.to_str()) {
                Some("info") => info = Some(path),
                Some("shp") => shapefiles.push(path),
                _ => {}
            }
        }
        shapefiles.sort();

        let info = info.ok_or_else(|| OutlookError::MissingInfo(dir.to_path_buf()))?;
        let window = ValidityWindow::read(&info)?;
        debug!(dir = %dir.display(), shapefiles = shapefiles.len(), "Scanned outlook bundle");
        Ok(Self {
            dir: dir.to_path_buf(),
            window,
            shapefiles,
        })
    }

    /// Download `url` and unpack it into `dir`.
    pub async fn fetch(fetcher: &HttpFetcher, url: &str, dir: &Path) -> Result<Self> {
        let bytes = fetcher.get_bytes(url).await?;
        let files = extract_zip(&bytes, dir)?;
        info!(url, files = files.len(), dir = %dir.display(), "Extracted outlook bundle");
        Self::scan(dir)
    }
}

/// File name of `path`, or an empty string.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
