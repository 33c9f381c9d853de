//! Per-track alignment workflow
//!
//! Drives one file through the whole pipeline: extract embedded lyrics,
//! clean them, probe the duration, transcribe, align, format, and embed the
//! result into an output copy. Recoverable upstream failures (no duration,
//! no transcript) degrade to the duration strategy instead of failing the
//! track; only missing lyrics and tag I/O abort it.

use std::path::{Path, PathBuf};

use lyralign_common::{lrc, AlignmentResult};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::engine;
use crate::services::{
    LyricsStore, MediaProbe, TagError, Transcriber, FALLBACK_DURATION_SECONDS,
};
use crate::text::clean_and_split;

/// Workflow errors
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The file has no usable lyric text in its tags
    #[error("no embedded lyrics found in {0}")]
    NoLyrics(PathBuf),

    /// Tag read or write failure
    #[error("tag operation failed: {0}")]
    Tag(#[from] TagError),
}

/// Result of aligning one track.
#[derive(Debug, Clone, Serialize)]
pub struct AlignmentReport {
    /// Source file that was processed
    pub source: PathBuf,

    /// Written output copy, or `None` on a dry run
    pub output: Option<PathBuf>,

    /// Number of transcript words the recognition engine produced
    pub transcript_words: usize,

    /// Aligned entries in output order
    pub entries: AlignmentResult,

    /// Rendered timestamped text, one line per entry
    pub formatted: String,
}

/// Processes tracks one at a time with a shared transcriber.
pub struct TrackProcessor<T: Transcriber> {
    transcriber: T,
    lyrics: LyricsStore,
    probe: MediaProbe,
}

impl<T: Transcriber> TrackProcessor<T> {
    /// Create a processor around a transcriber.
    ///
    /// The transcriber is shared across every processed file, so a backend
    /// that caches its model pays the load cost once per run.
    pub fn new(transcriber: T) -> Self {
        Self {
            transcriber,
            lyrics: LyricsStore::new(),
            probe: MediaProbe::new(),
        }
    }

    /// Align one track and (unless `dry_run`) embed the result.
    ///
    /// # Arguments
    /// * `source` - Audio file with embedded lyrics
    /// * `output` - Output path override, or `None` for the default sibling
    /// * `dry_run` - Compute and report without writing any file
    ///
    /// # Errors
    /// Returns [`WorkflowError::NoLyrics`] when the file has no lyric text
    /// (or nothing survives cleaning), and [`WorkflowError::Tag`] on tag I/O
    /// failure. Duration and transcription failures are downgraded to the
    /// duration fallback and do not abort the track.
    pub fn process(
        &self,
        source: &Path,
        output: Option<&Path>,
        dry_run: bool,
    ) -> Result<AlignmentReport, WorkflowError> {
        info!(file = %source.display(), "processing track");

        let raw = self
            .lyrics
            .extract(source)?
            .ok_or_else(|| WorkflowError::NoLyrics(source.to_path_buf()))?;

        let lines = clean_and_split(&raw);
        if lines.is_empty() {
            return Err(WorkflowError::NoLyrics(source.to_path_buf()));
        }
        debug!(file = %source.display(), lines = lines.len(), "cleaned lyric lines");

        let duration = match self.probe.duration_seconds(source) {
            Ok(duration) => duration,
            Err(e) => {
                warn!(
                    file = %source.display(),
                    error = %e,
                    fallback_s = FALLBACK_DURATION_SECONDS,
                    "duration probe failed, using fallback duration"
                );
                FALLBACK_DURATION_SECONDS
            }
        };

        let transcript = match self.transcriber.transcribe(source) {
            Ok(words) => words,
            Err(e) => {
                warn!(
                    file = %source.display(),
                    error = %e,
                    "transcription unavailable, falling back to duration strategy"
                );
                Vec::new()
            }
        };

        let entries = engine::align(&lines, &transcript, duration);
        let formatted = lrc::format_lyrics(&entries);

        let output_path = if dry_run {
            None
        } else {
            Some(self.lyrics.embed(source, &formatted, output)?)
        };

        info!(
            file = %source.display(),
            entries = entries.len(),
            output = ?output_path,
            "track aligned"
        );
        Ok(AlignmentReport {
            source: source.to_path_buf(),
            output: output_path,
            transcript_words: transcript.len(),
            entries,
            formatted,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::TranscribeError;
    use id3::{frame::Lyrics, Tag, TagLike, Version};
    use lyralign_common::TranscriptWord;
    use std::fs;

    /// Transcriber double returning a fixed word sequence, or an error.
    struct FakeTranscriber {
        words: Result<Vec<TranscriptWord>, ()>,
    }

    impl FakeTranscriber {
        fn with_words(words: Vec<TranscriptWord>) -> Self {
            Self { words: Ok(words) }
        }

        fn failing() -> Self {
            Self { words: Err(()) }
        }
    }

    impl Transcriber for FakeTranscriber {
        fn transcribe(&self, _path: &Path) -> Result<Vec<TranscriptWord>, TranscribeError> {
            match &self.words {
                Ok(words) => Ok(words.clone()),
                Err(()) => Err(TranscribeError::BackendDisabled),
            }
        }
    }

    /// Write a minimal file whose only content is an ID3 tag with lyrics.
    fn lyric_file(dir: &Path, name: &str, lyrics: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"").unwrap();
        let mut tag = Tag::new();
        tag.add_frame(Lyrics {
            lang: "eng".to_string(),
            description: String::new(),
            text: lyrics.to_string(),
        });
        tag.write_to_path(&path, Version::Id3v24).unwrap();
        path
    }

    #[test]
    fn test_file_without_lyrics_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bare.mp3");
        fs::write(&path, b"").unwrap();

        let processor = TrackProcessor::new(FakeTranscriber::failing());
        let result = processor.process(&path, None, true);
        assert!(matches!(result, Err(WorkflowError::NoLyrics(_))));
    }

    #[test]
    fn test_lyrics_reduced_to_nothing_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = lyric_file(dir.path(), "annotated.mp3", "[Verse 1]\n(instrumental)\n");

        let processor = TrackProcessor::new(FakeTranscriber::failing());
        let result = processor.process(&path, None, true);
        assert!(matches!(result, Err(WorkflowError::NoLyrics(_))));
    }

    #[test]
    fn test_failed_transcription_falls_back_to_duration_strategy() {
        let dir = tempfile::tempdir().unwrap();
        let path = lyric_file(dir.path(), "song.mp3", "Hello world\nGoodnight moon\n");

        let processor = TrackProcessor::new(FakeTranscriber::failing());
        let report = processor.process(&path, None, true).unwrap();

        assert_eq!(report.transcript_words, 0);
        assert_eq!(report.entries.len(), 2);
        for entry in &report.entries {
            assert_eq!(entry.confidence, 0.7);
        }
        assert!(report.formatted.starts_with("[00:00.000] "));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = lyric_file(dir.path(), "song.mp3", "Hello world\n");

        let processor = TrackProcessor::new(FakeTranscriber::failing());
        let report = processor.process(&path, None, true).unwrap();

        assert!(report.output.is_none());
        assert!(!dir.path().join("song_aligned.mp3").exists());
    }

    #[test]
    fn test_embed_writes_aligned_copy() {
        let dir = tempfile::tempdir().unwrap();
        let path = lyric_file(dir.path(), "song.mp3", "Hello world\nGoodnight moon\n");

        let processor = TrackProcessor::new(FakeTranscriber::failing());
        let report = processor.process(&path, None, false).unwrap();

        let output = report.output.unwrap();
        assert_eq!(output, dir.path().join("song_aligned.mp3"));
        assert!(output.exists());

        // The copy carries the formatted text, retrievable like any lyrics.
        let stored = LyricsStore::new().extract(&output).unwrap().unwrap();
        assert_eq!(stored, report.formatted);
    }

    #[test]
    fn test_large_transcript_drives_matching() {
        let dir = tempfile::tempdir().unwrap();
        let path = lyric_file(dir.path(), "song.mp3", "Hello world\n");

        // 60 words, so matching engages; the line sits at 2.0-2.6s.
        let mut words = Vec::new();
        for k in 0..30 {
            words.push(TranscriptWord::new(format!("zzq{}", k), k as f64 * 0.06, 1.9));
        }
        words.push(TranscriptWord::new("hello", 2.0, 2.3));
        words.push(TranscriptWord::new("world", 2.3, 2.6));
        for k in 30..58 {
            words.push(TranscriptWord::new(format!("zzq{}", k), 3.0, 29.0));
        }

        let processor = TrackProcessor::new(FakeTranscriber::with_words(words));
        let report = processor.process(&path, None, true).unwrap();

        assert_eq!(report.transcript_words, 60);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].start, 2.0);
        assert_eq!(report.entries[0].end, 2.6);
        assert!(report.entries[0].confidence >= 1.0);
    }

    #[test]
    fn test_explicit_output_path_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        let path = lyric_file(dir.path(), "song.mp3", "Hello world\n");
        let target = dir.path().join("custom.mp3");

        let processor = TrackProcessor::new(FakeTranscriber::failing());
        let report = processor.process(&path, Some(&target), false).unwrap();

        assert_eq!(report.output.as_deref(), Some(target.as_path()));
        assert!(target.exists());
    }
}
