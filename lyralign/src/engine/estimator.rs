//! Duration-proportional timeline estimation
//!
//! When no usable transcript exists, or a single line fails to match, line
//! timing is synthesized from total track duration: every line gets an equal
//! base slot, stretched slightly for wordier lines and clamped at the end of
//! the track.

use lyralign_common::AlignedLine;

/// Confidence for the whole-set duration strategy
pub const DURATION_STRATEGY_CONFIDENCE: f32 = 0.7;

/// Confidence for a single-line fallback inside the transcript path
pub const LINE_FALLBACK_CONFIDENCE: f32 = 0.5;

/// Per-word slot stretch, seconds
const SECONDS_PER_WORD: f64 = 0.2;

/// Upper bound on the per-line stretch, seconds
const MAX_VARIATION: f64 = 1.0;

/// Estimate timing for one line by its slot position.
///
/// `base = total_duration / total_lines`; the line starts at `index * base`
/// and ends one base slot later plus up to one second of word-count
/// stretch, clamped to `total_duration`. `total_lines` must be non-zero
/// (callers pass the size of a non-empty filtered line set).
///
/// `index` is whatever slot the caller assigns; the transcript path passes
/// its emitted-entry count here, which is not necessarily the line's
/// original position.
pub fn estimate_line(
    index: usize,
    line_text: &str,
    total_duration: f64,
    total_lines: usize,
    confidence: f32,
) -> AlignedLine {
    let base = total_duration / total_lines as f64;
    let word_count = line_text.split_whitespace().count();
    let variation = (word_count as f64 * SECONDS_PER_WORD).min(MAX_VARIATION);

    let start = index as f64 * base;
    let mut end = start + base + variation;
    if end > total_duration {
        end = total_duration;
    }

    AlignedLine::new(line_text, start, end, confidence)
}
