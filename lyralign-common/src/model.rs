//! Shared data model for the alignment pipeline
//!
//! All types here are immutable value records: they are produced once by a
//! pipeline stage and never mutated afterward.

use serde::{Deserialize, Serialize};

/// A single recognized spoken token with its position on the audio timeline.
///
/// Produced by the transcription backend. Sequences of these are ordered by
/// time; the alignment engine assumes nearby indices are nearby in time but
/// does not enforce monotonicity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptWord {
    /// Recognized text for this token
    pub text: String,
    /// Start position in seconds from the beginning of the track
    pub start: f64,
    /// End position in seconds (>= start)
    pub end: f64,
}

impl TranscriptWord {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// One lyric line placed on the audio timeline.
///
/// Produced exactly once per surviving input line. `confidence` is a local
/// per-line quality signal only; matcher-derived values may exceed 1.0 and
/// are deliberately not clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedLine {
    /// Line text as emitted by the alignment strategy
    pub text: String,
    /// Start position in seconds
    pub start: f64,
    /// End position in seconds (>= start, clamped to total duration)
    pub end: f64,
    /// Per-line quality signal
    pub confidence: f32,
}

impl AlignedLine {
    pub fn new(text: impl Into<String>, start: f64, end: f64, confidence: f32) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            confidence,
        }
    }
}

/// Ordered alignment output, one entry per surviving input line
pub type AlignmentResult = Vec<AlignedLine>;
