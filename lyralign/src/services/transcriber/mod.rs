//! Speech transcription backend
//!
//! Defines the [`Transcriber`] capability the alignment workflow depends on,
//! plus the whisper.cpp implementation behind the `whisper` cargo feature.
//! Builds without the feature still link and run; the backend then reports
//! itself unavailable and callers fall back to duration-based alignment.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use lyralign_common::TranscriptWord;
use thiserror::Error;

#[cfg(feature = "whisper")]
mod audio;
mod whisper;

pub use whisper::WhisperTranscriber;

/// Errors that can occur during transcription
#[derive(Debug, Error)]
pub enum TranscribeError {
    /// Model file not found on disk
    #[error("model file not found: {0}")]
    ModelNotFound(PathBuf),

    /// Failed to load the model
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Model name not in the catalog
    #[error("unknown model size: {0}")]
    UnknownModel(String),

    /// Failed to decode audio into engine input
    #[error("failed to read audio: {0}")]
    Audio(String),

    /// Recognition inference failed
    #[error("transcription failed: {0}")]
    Engine(String),

    /// Built without the `whisper` feature
    #[error("transcription backend not enabled; rebuild with --features whisper")]
    BackendDisabled,
}

/// Capability to turn an audio file into time-stamped words.
///
/// The workflow owns exactly one transcriber for its whole lifetime, so an
/// implementation may cache expensive state (such as a loaded model) across
/// calls.
pub trait Transcriber {
    /// Transcribe an audio file into an ordered word sequence.
    ///
    /// # Errors
    /// Returns an error if the backend is unavailable, the model cannot be
    /// loaded, or the audio cannot be decoded. Callers treat failure as "no
    /// transcript" rather than aborting.
    fn transcribe(&self, path: &Path) -> Result<Vec<TranscriptWord>, TranscribeError>;
}

/// Available model sizes for the whisper backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum WhisperModel {
    /// Tiny model (~75MB) - fastest, lowest accuracy
    Tiny,
    /// Base model (~142MB) - good balance
    #[default]
    Base,
    /// Small model (~466MB) - better accuracy
    Small,
    /// Medium model (~1.5GB) - high accuracy
    Medium,
    /// Large model (~2.9GB) - highest accuracy
    Large,
}

impl WhisperModel {
    /// Returns the filename for this model size
    pub fn filename(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "ggml-tiny.bin",
            WhisperModel::Base => "ggml-base.bin",
            WhisperModel::Small => "ggml-small.bin",
            WhisperModel::Medium => "ggml-medium.bin",
            WhisperModel::Large => "ggml-large.bin",
        }
    }

    /// Returns the model name for logging/display
    pub fn name(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "tiny",
            WhisperModel::Base => "base",
            WhisperModel::Small => "small",
            WhisperModel::Medium => "medium",
            WhisperModel::Large => "large",
        }
    }

    /// Full path of this model inside a models directory
    pub fn path_in(&self, models_dir: &Path) -> PathBuf {
        models_dir.join(self.filename())
    }
}

impl fmt::Display for WhisperModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WhisperModel {
    type Err = TranscribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tiny" => Ok(WhisperModel::Tiny),
            "base" => Ok(WhisperModel::Base),
            "small" => Ok(WhisperModel::Small),
            "medium" => Ok(WhisperModel::Medium),
            "large" => Ok(WhisperModel::Large),
            _ => Err(TranscribeError::UnknownModel(s.to_string())),
        }
    }
}

/// Checks if the whisper backend was compiled in
pub fn is_backend_available() -> bool {
    cfg!(feature = "whisper")
}

// ============================================================================
// Tests
// ============================================================================
