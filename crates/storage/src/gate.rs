//! Idempotency gate over run directories.
//!
//! A run directory is complete once it holds at least one regular file whose
//! name does not start with a dot. Sinks write through hidden temporary
//! files, so an interrupted write never marks a directory complete.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;
use wx_common::ProductDestination;

/// Whether `dir` exists and contains a non-hidden regular file.
pub fn is_complete(dir: &Path) -> bool {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return false,
    };

    entries.filter_map(|entry| entry.ok()).any(|entry| {
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        !hidden && is_file
    })
}

/// The set of run directories one invocation would fill.
#[derive(Debug, Clone, Default)]
pub struct IdempotencyGate {
    targets: Vec<PathBuf>,
}

impl IdempotencyGate {
    pub fn new(targets: Vec<PathBuf>) -> Self {
        Self { targets }
    }

    /// Run directories of every destination for one timestamp.
    pub fn for_destinations<'a, I>(base_path: &Path, destinations: I, time: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a ProductDestination>,
    {
        let mut targets: Vec<PathBuf> = Vec::new();
        for dest in destinations {
            let dir = dest.run_dir(base_path, time);
            if !targets.contains(&dir) {
                targets.push(dir);
            }
        }
        Self { targets }
    }

    pub fn targets(&self) -> &[PathBuf] {
        &self.targets
    }

    /// True when every target is complete. An empty gate never short-circuits.
    pub fn already_produced(&self) -> bool {
        if self.targets.is_empty() {
            return false;
        }
        self.targets.iter().all(|dir| {
            let complete = is_complete(dir);
            debug!(dir = %dir.display(), complete, "Checked run directory");
            complete
        })
    }
}
