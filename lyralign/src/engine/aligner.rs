//! Alignment orchestration
//!
//! Chooses the alignment strategy from transcript quality and drives
//! per-line matching with estimator fallback. Two terminal strategies, a
//! plain conditional, no retries:
//!
//! - Transcript path: the transcript carries enough words to window-match
//!   each line, falling back to a per-line estimate when a line finds no
//!   acceptable window.
//! - Duration path: too few transcript words to trust; every line gets a
//!   proportional slot of the track.

use lyralign_common::{AlignedLine, AlignmentResult, TranscriptWord};
use tracing::{debug, info};

use super::estimator::{
    estimate_line, DURATION_STRATEGY_CONFIDENCE, LINE_FALLBACK_CONFIDENCE,
};
use super::matcher::find_best_match;

/// A transcript must exceed this many words before window matching is
/// trusted at all
const TRANSCRIPT_WORD_THRESHOLD: usize = 50;

/// Align lyric lines to the transcript timeline.
///
/// Lines that are empty after trimming are filtered out first (the kept
/// entries retain their original text). With a transcript of more than 50
/// words each line is window-matched; otherwise the whole set is laid out
/// proportionally over `total_duration`.
///
/// In the transcript path a matched line is emitted with its lower-cased
/// token join as text; an unmatched line falls back to an estimated slot at
/// the position of the entries emitted so far. Lines that tokenize to zero
/// words are dropped, shrinking the output.
pub fn align(
    lines: &[String],
    transcript: &[TranscriptWord],
    total_duration: f64,
) -> AlignmentResult {
    let filtered: Vec<&str> = lines
        .iter()
        .map(String::as_str)
        .filter(|line| !line.trim().is_empty())
        .collect();

    if filtered.is_empty() {
        return Vec::new();
    }

    if transcript.len() > TRANSCRIPT_WORD_THRESHOLD {
        info!(
            transcript_words = transcript.len(),
            lines = filtered.len(),
            "Aligning lines against transcript"
        );
        align_with_transcript(&filtered, transcript, total_duration)
    } else {
        info!(
            transcript_words = transcript.len(),
            lines = filtered.len(),
            duration_s = total_duration,
            "Transcript too sparse, using duration-based alignment"
        );
        filtered
            .iter()
            .enumerate()
            .map(|(index, line)| {
                estimate_line(
                    index,
                    line,
                    total_duration,
                    filtered.len(),
                    DURATION_STRATEGY_CONFIDENCE,
                )
            })
            .collect()
    }
}

fn align_with_transcript(
    lines: &[&str],
    transcript: &[TranscriptWord],
    total_duration: f64,
) -> Vec<AlignedLine> {
    let total_lines = lines.len();
    let mut aligned: Vec<AlignedLine> = Vec::with_capacity(total_lines);

    for line in lines {
        let words: Vec<String> = line
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if words.is_empty() {
            continue;
        }

        match find_best_match(&words, transcript) {
            Some(found) => {
                debug!(
                    line = %line,
                    start = found.start,
                    end = found.end,
                    confidence = found.confidence,
                    "Matched line to transcript window"
                );
                aligned.push(AlignedLine::new(
                    words.join(" "),
                    found.start,
                    found.end,
                    found.confidence,
                ));
            }
            None => {
                debug!(line = %line, "No transcript window, estimating slot");
                aligned.push(estimate_line(
                    aligned.len(),
                    line,
                    total_duration,
                    total_lines,
                    LINE_FALLBACK_CONFIDENCE,
                ));
            }
        }
    }

    aligned
}
