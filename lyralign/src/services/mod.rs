//! Service modules for the alignment workflow
//!
//! Everything here touches the outside world: file tags, audio containers,
//! the filesystem, and the speech recognition engine. The alignment engine
//! itself stays pure and lives in [`crate::engine`].

pub mod lyrics_store;
pub mod media_probe;
pub mod scanner;
pub mod transcriber;

pub use lyrics_store::{aligned_output_path, LyricsStore, TagError};
pub use media_probe::{MediaProbe, ProbeError, FALLBACK_DURATION_SECONDS};
pub use scanner::{ScanError, TrackScanner};
pub use transcriber::{
    is_backend_available, TranscribeError, Transcriber, WhisperModel, WhisperTranscriber,
};
