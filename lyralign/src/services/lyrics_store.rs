//! Embedded Lyrics Store
//!
//! Reads and writes lyric text stored in ID3 tags using the `id3` crate.
//!
//! Extraction checks the canonical unsynchronized-lyrics frame first, then a
//! set of well-known `TXXX` keys used by common taggers, then any remaining
//! `USLT` frame regardless of language. Embedding writes the timestamped text
//! under two redundant frames (`USLT` + `TXXX`) so that players which only
//! read one of the two conventions still find it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use id3::frame::{ExtendedText, Lyrics};
use id3::{Tag, TagLike, Version};
use thiserror::Error;
use tracing::{debug, info};

/// Language code written into the `USLT` frame.
const LYRICS_LANGUAGE: &str = "eng";

/// Description attached to the `USLT` frame written by [`LyricsStore::embed`].
const USLT_DESCRIPTION: &str = "Aligned lyrics";

/// Description of the redundant `TXXX` frame written alongside the `USLT`.
const TXXX_DESCRIPTION: &str = "TIMESTAMPED_LYRICS";

/// `TXXX` descriptions probed during extraction, in preference order.
const TXXX_LYRIC_KEYS: [&str; 3] = ["LYRICS", "UNSYNCEDLYRICS", "SYNCEDLYRICS"];

/// Suffix appended to the file stem of the default output path.
const ALIGNED_SUFFIX: &str = "_aligned";

/// Errors from reading or writing lyric tags.
#[derive(Debug, Error)]
pub enum TagError {
    /// Copying the source file to the output path failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The ID3 tag could not be read or written.
    #[error("tag error: {0}")]
    Tag(#[from] id3::Error),
}

/// Reads and writes lyrics embedded in audio file tags.
pub struct LyricsStore;

impl LyricsStore {
    /// Create a new lyrics store.
    pub fn new() -> Self {
        Self
    }

    /// Extract embedded lyric text from an audio file.
    ///
    /// # Arguments
    /// * `path` - Path to the audio file
    ///
    /// # Returns
    /// The raw lyric text of the first non-blank frame found, or `None` when
    /// the file carries no tag or no lyric frames. Absence of lyrics is a
    /// normal condition, not an error.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its tag is corrupt.
    pub fn extract(&self, path: &Path) -> Result<Option<String>, TagError> {
        let tag = match Tag::read_from_path(path) {
            Ok(tag) => tag,
            Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => {
                debug!(file = ?path, "no ID3 tag present");
                return Ok(None);
            }
            Err(e) => return Err(TagError::Tag(e)),
        };

        // Canonical frame: English unsynchronized lyrics with no description.
        for lyrics in tag.lyrics() {
            if lyrics.lang == LYRICS_LANGUAGE
                && lyrics.description.is_empty()
                && !lyrics.text.trim().is_empty()
            {
                debug!(file = ?path, "found lyrics in USLT frame");
                return Ok(Some(lyrics.text.clone()));
            }
        }

        // TXXX keys written by common taggers, most specific first.
        for key in TXXX_LYRIC_KEYS {
            for ext in tag.extended_texts() {
                if ext.description == key && !ext.value.trim().is_empty() {
                    debug!(file = ?path, key = key, "found lyrics in TXXX frame");
                    return Ok(Some(ext.value.clone()));
                }
            }
        }

        // Last resort: any USLT frame, whatever its language or description.
        for lyrics in tag.lyrics() {
            if !lyrics.text.trim().is_empty() {
                debug!(file = ?path, lang = %lyrics.lang, "found lyrics in non-canonical USLT frame");
                return Ok(Some(lyrics.text.clone()));
            }
        }

        debug!(file = ?path, "tag present but no lyric frames");
        Ok(None)
    }

    /// Embed timestamped lyric text into a copy of the source file.
    ///
    /// The source file is never modified: it is copied to `output` (or to the
    /// default `<stem>_aligned.<ext>` sibling when `output` is `None`) and the
    /// copy receives the new frames. Any existing `USLT` frames on the copy
    /// are replaced; the tag is written as ID3v2.4.
    ///
    /// # Arguments
    /// * `source` - Audio file to copy
    /// * `formatted` - Timestamped lyric text to embed
    /// * `output` - Explicit output path, or `None` for the default
    ///
    /// # Returns
    /// The path of the written output file.
    ///
    /// # Errors
    /// Returns an error if the copy fails or the tag cannot be written.
    pub fn embed(
        &self,
        source: &Path,
        formatted: &str,
        output: Option<&Path>,
    ) -> Result<PathBuf, TagError> {
        let output_path = match output {
            Some(path) => path.to_path_buf(),
            None => aligned_output_path(source),
        };

        std::fs::copy(source, &output_path)?;

        let mut tag = match Tag::read_from_path(&output_path) {
            Ok(tag) => tag,
            Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => Tag::new(),
            Err(e) => return Err(TagError::Tag(e)),
        };

        tag.remove("USLT");
        tag.add_frame(Lyrics {
            lang: LYRICS_LANGUAGE.to_string(),
            description: USLT_DESCRIPTION.to_string(),
            text: formatted.to_string(),
        });
        tag.add_frame(ExtendedText {
            description: TXXX_DESCRIPTION.to_string(),
            value: formatted.to_string(),
        });
        tag.write_to_path(&output_path, Version::Id3v24)?;

        info!(output = ?output_path, "embedded timestamped lyrics");
        Ok(output_path)
    }
}

impl Default for LyricsStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Default output path for an aligned copy: `<stem>_aligned.<ext>`.
pub fn aligned_output_path(source: &Path) -> PathBuf {
    let mut name = source
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(ALIGNED_SUFFIX);
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    source.with_file_name(name)
}

// ============================================================================
// Tests
// ============================================================================
