//! Alignment engine
//!
//! Pure, synchronous core: maps ordered lyric lines onto an ordered
//! word-level transcript timeline, or onto a synthetic duration-derived
//! timeline when the transcript is too sparse. No I/O happens here; the
//! services layer feeds it and persists its output.

pub mod aligner;
pub mod estimator;
pub mod matcher;
pub mod similarity;

pub use aligner::align;
pub use estimator::{estimate_line, DURATION_STRATEGY_CONFIDENCE, LINE_FALLBACK_CONFIDENCE};
pub use matcher::{find_best_match, LineMatch};
pub use similarity::{normalize_word, words_similar};
