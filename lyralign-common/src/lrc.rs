//! LRC-style timestamp rendering
//!
//! Produces the `[MM:SS.mmm] text` line format consumed downstream. The
//! shape is fixed: every rendered line matches `\[\d{2}:\d{2}\.\d{3}\] .*`
//! (minutes above 99 widen the field rather than truncate).

use crate::model::AlignedLine;

/// Render a position in seconds as an LRC timestamp.
///
/// Minutes are `floor(seconds / 60)` zero-padded to 2 digits; the remainder
/// is zero-padded to width 6 with exactly 3 fractional digits. Negative
/// inputs render as zero (the data model guarantees non-negative positions).
///
/// # Examples
///
/// ```
/// use lyralign_common::lrc::format_timestamp;
///
/// assert_eq!(format_timestamp(0.0), "[00:00.000]");
/// assert_eq!(format_timestamp(65.4), "[01:05.400]");
/// assert_eq!(format_timestamp(125.456), "[02:05.456]");
/// ```
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u64;
    let remainder = seconds % 60.0;
    format!("[{:02}:{:06.3}]", minutes, remainder)
}

/// Render aligned lines as timestamped lyric text.
///
/// One `[MM:SS.mmm] text` line per entry, joined by newline, in input
/// order. Only `start` is emitted; `end` and `confidence` exist for
/// internal consumption and testing.
pub fn format_lyrics(entries: &[AlignedLine]) -> String {
    entries
        .iter()
        .map(|entry| format!("{} {}", format_timestamp(entry.start), entry.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse an LRC timestamp back into seconds.
///
/// Accepts the exact shape produced by [`format_timestamp`]. Returns `None`
/// for anything else. Useful for consumers verifying embedded output.
pub fn parse_timestamp(input: &str) -> Option<f64> {
    let inner = input.strip_prefix('[')?.strip_suffix(']')?;
    let (minutes, seconds) = inner.split_once(':')?;
    if minutes.len() < 2 || seconds.len() != 6 || seconds.as_bytes()[2] != b'.' {
        return None;
    }
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: f64 = seconds.parse().ok()?;
    Some(minutes as f64 * 60.0 + seconds)
}
