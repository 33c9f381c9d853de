//! Windowed line matching
//!
//! Slides a lyric line's words across the transcript and scores each window
//! position. The best-scoring window above threshold supplies the line's
//! timing; ties keep the earliest window.

use super::similarity::words_similar;
use lyralign_common::TranscriptWord;

/// Minimum tokens a line needs to be window-matched at all
const MIN_LINE_WORDS: usize = 2;

/// A window is only acceptable when score >= this fraction of the line length
const SCORE_THRESHOLD_RATIO: f64 = 0.6;

/// Bonus added for every position while the consecutive-hit run is at least
/// this long
const CONSECUTIVE_RUN_MIN: u32 = 2;
const CONSECUTIVE_BONUS: f64 = 0.5;

/// Timing and quality of a matched line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMatch {
    /// Start of the first window word, seconds
    pub start: f64,
    /// End of the last window word, seconds
    pub end: f64,
    /// best_score / line word count; may exceed 1.0 via run bonuses
    pub confidence: f32,
}

/// Find the best transcript window for one lyric line.
///
/// `line_words` must already be lower-cased (the orchestrator tokenizes).
/// Lines with fewer than 2 words return `None` immediately; single words
/// match too many places to window reliably.
///
/// Scoring per window: +1 for every position whose transcript word and line
/// word contain one another or pass the fuzzy test, plus 0.5 for every
/// position while the consecutive-hit run stands at 2 or longer; a miss
/// resets the run, so each later position of an unbroken run keeps adding.
/// A window is accepted when its score reaches 60% of the line length and
/// strictly exceeds the best so far, so the earliest maximal window wins.
pub fn find_best_match(line_words: &[String], transcript: &[TranscriptWord]) -> Option<LineMatch> {
    if line_words.len() < MIN_LINE_WORDS {
        return None;
    }
    if transcript.len() < line_words.len() {
        return None;
    }

    let threshold = SCORE_THRESHOLD_RATIO * line_words.len() as f64;
    let mut best_score = 0.0_f64;
    let mut best_span: Option<(f64, f64)> = None;

    for i in 0..=(transcript.len() - line_words.len()) {
        let mut score = 0.0_f64;
        let mut consecutive = 0_u32;

        for (j, line_word) in line_words.iter().enumerate() {
            if i + j < transcript.len() {
                let transcript_word = transcript[i + j].text.to_lowercase();
                let transcript_word = transcript_word.trim();

                let hit = transcript_word.contains(line_word.as_str())
                    || line_word.contains(transcript_word)
                    || words_similar(line_word, transcript_word);

                if hit {
                    score += 1.0;
                    consecutive += 1;
                } else {
                    consecutive = 0;
                }
            }

            // Run bonus, evaluated every position independent of the hit test
            if consecutive >= CONSECUTIVE_RUN_MIN {
                score += CONSECUTIVE_BONUS;
            }
        }

        if score >= threshold && score > best_score {
            best_score = score;
            let last = (i + line_words.len() - 1).min(transcript.len() - 1);
            best_span = Some((transcript[i].start, transcript[last].end));
        }
    }

    best_span.map(|(start, end)| LineMatch {
        start,
        end,
        confidence: (best_score / line_words.len() as f64) as f32,
    })
}
