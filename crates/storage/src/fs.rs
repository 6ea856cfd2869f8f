//! Atomic file writes.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StorageError};

/// Hidden sibling used while a file is being written.
pub fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.partial", name))
}

/// Write `data` to a hidden temporary file next to `path`, then rename it
/// into place. Parent directories are created as needed.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
    }

    let tmp = temp_path(path);
    fs::write(&tmp, data).map_err(|e| StorageError::io(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(StorageError::io(path, e));
    }

    debug!(path = %path.display(), bytes = data.len(), "Wrote file");
    Ok(())
}
