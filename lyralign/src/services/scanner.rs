//! Track scanner
//!
//! Discovers MP3 files to process in batch mode. The scan is shallow by
//! default and skips files whose stem carries an output suffix, so a second
//! run over the same directory does not re-process its own results.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Stem suffixes that mark an already-processed copy.
const OUTPUT_SUFFIXES: [&str; 2] = ["_aligned", "_improved"];

/// Track scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Finds MP3 files awaiting alignment.
pub struct TrackScanner;

impl TrackScanner {
    /// Create a new track scanner.
    pub fn new() -> Self {
        Self
    }

    /// Scan a directory for candidate MP3 files.
    ///
    /// # Arguments
    /// * `root` - Directory to scan
    /// * `recursive` - Descend into subdirectories when true; otherwise only
    ///   the directory itself is searched
    ///
    /// # Returns
    /// Candidate paths in sorted order. Unreadable entries are logged and
    /// skipped rather than aborting the scan.
    ///
    /// # Errors
    /// Returns an error if `root` does not exist or is not a directory.
    pub fn scan(&self, root: &Path, recursive: bool) -> Result<Vec<PathBuf>, ScanError> {
        if !root.exists() {
            return Err(ScanError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(false).max_depth(max_depth) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("error accessing entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_file() && is_candidate(entry.path()) {
                files.push(entry.path().to_path_buf());
            }
        }

        files.sort();
        debug!(root = %root.display(), count = files.len(), "scan complete");
        Ok(files)
    }
}

impl Default for TrackScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// True for MP3 files that are not themselves tool output.
fn is_candidate(path: &Path) -> bool {
    let is_mp3 = path
        .extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("mp3"))
        .unwrap_or(false);
    if !is_mp3 {
        return false;
    }

    match path.file_stem() {
        Some(stem) => {
            let stem = stem.to_string_lossy();
            !OUTPUT_SUFFIXES.iter().any(|suffix| stem.ends_with(suffix))
        }
        None => false,
    }
}

// ============================================================================
// Tests
// ============================================================================
