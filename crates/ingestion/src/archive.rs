//! Zip bundle extraction.
//!
//! Shapefile bundles are unpacked flat into a scratch directory so the
//! `.shp` and its `.dbf`/`.shx`/`.prj` siblings sit side by side.

use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use crate::error::{IngestionError, Result};

/// Extract every file entry of `data` into `dest`, returning the written
/// paths in archive order.
///
/// Directory components inside the archive are dropped.
pub fn extract_zip(data: &[u8], dest: &Path) -> Result<Vec<PathBuf>> {
    let mut archive =
        ZipArchive::new(Cursor::new(data)).map_err(|e| IngestionError::Archive(e.to_string()))?;
    fs::create_dir_all(dest)?;

    let mut written = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| IngestionError::Archive(e.to_string()))?;
        if entry.is_dir() {
            continue;
        }

        let name = entry
            .enclosed_name()
            .and_then(|p| p.file_name().map(PathBuf::from))
            .ok_or_else(|| IngestionError::Archive(format!("unsafe entry name {}", entry.name())))?;

        let mut contents = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut contents)?;

        let path = dest.join(name);
        fs::write(&path, contents)?;
        debug!(path = %path.display(), "Extracted");
        written.push(path);
    }

    Ok(written)
}
