//! Audio duration probe
//!
//! Reads the total playing time of an audio file using lofty. Duration is the
//! only property the aligner needs from the container itself; callers that
//! cannot probe a file substitute [`FALLBACK_DURATION_SECONDS`] instead of
//! failing the pipeline.

use std::path::Path;

use lofty::prelude::*;
use lofty::probe::Probe;
use thiserror::Error;
use tracing::debug;

/// Duration assumed when a file cannot be probed (three minutes).
pub const FALLBACK_DURATION_SECONDS: f64 = 180.0;

/// Duration probe errors
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The container could not be opened or parsed.
    #[error("failed to read file: {0}")]
    Read(String),
}

/// Probes audio files for their total duration.
pub struct MediaProbe;

impl MediaProbe {
    /// Create a new media probe.
    pub fn new() -> Self {
        Self
    }

    /// Read the total duration of an audio file in seconds.
    ///
    /// # Arguments
    /// * `path` - Path to the audio file
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or parsed. Callers are
    /// expected to fall back to [`FALLBACK_DURATION_SECONDS`] on failure.
    pub fn duration_seconds(&self, path: &Path) -> Result<f64, ProbeError> {
        let tagged_file = Probe::open(path)
            .map_err(|e| ProbeError::Read(e.to_string()))?
            .read()
            .map_err(|e| ProbeError::Read(e.to_string()))?;

        let duration = tagged_file.properties().duration().as_secs_f64();
        debug!(file = %path.display(), duration_s = duration, "probed audio duration");
        Ok(duration)
    }
}

impl Default for MediaProbe {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
