//! Alignment Engine Integration Tests
//!
//! Exercises both alignment strategies through the public API.
//!
//! **Test Coverage:**
//! - Strategy selection around the transcript size threshold
//! - Duration-strategy spacing, end clamping, and confidences
//! - Window matching on realistic transcripts with filler words
//! - Per-line fallback inside the transcript-driven path
//! - Similarity properties (reflexivity, symmetry on stable pairs)
//! - Rendered timestamp format, including the parse round-trip

use lyralign::engine::{
    self, words_similar, DURATION_STRATEGY_CONFIDENCE, LINE_FALLBACK_CONFIDENCE,
};
use lyralign_common::lrc::{format_lyrics, format_timestamp, parse_timestamp};
use lyralign_common::TranscriptWord;

fn lines(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

/// Filler words that cannot hit real lyric tokens: no letter overlap with
/// the lines under test and no substring relation in either direction.
fn filler(count: usize, start: f64, step: f64) -> Vec<TranscriptWord> {
    (0..count)
        .map(|k| {
            let t = start + k as f64 * step;
            TranscriptWord::new(format!("zzq{}", k), t, t + step)
        })
        .collect()
}

// =============================================================================
// Strategy Selection
// =============================================================================

#[test]
fn test_fifty_word_transcript_uses_duration_strategy() {
    let lyric_lines = lines(&["Hello world", "Goodnight moon"]);
    // 50 words of "hello" would match trivially if the matcher ran at all.
    let transcript: Vec<TranscriptWord> = (0..50)
        .map(|k| TranscriptWord::new("hello", k as f64, k as f64 + 0.5))
        .collect();

    let aligned = engine::align(&lyric_lines, &transcript, 100.0);

    assert_eq!(aligned.len(), 2);
    for entry in &aligned {
        assert_eq!(entry.confidence, DURATION_STRATEGY_CONFIDENCE);
    }
    // The duration strategy emits the stored line text unchanged.
    assert_eq!(aligned[0].text, "Hello world");
}

#[test]
fn test_empty_transcript_uses_duration_strategy() {
    let lyric_lines = lines(&["one two", "three four"]);
    let aligned = engine::align(&lyric_lines, &[], 60.0);

    assert_eq!(aligned.len(), 2);
    assert_eq!(aligned[0].start, 0.0);
    assert_eq!(aligned[1].start, 30.0);
}

#[test]
fn test_blank_lines_are_filtered_out() {
    let lyric_lines = lines(&["   ", "real line here", ""]);
    let aligned = engine::align(&lyric_lines, &[], 60.0);

    assert_eq!(aligned.len(), 1);
    assert_eq!(aligned[0].text, "real line here");
}

#[test]
fn test_no_lines_no_output() {
    assert!(engine::align(&[], &filler(60, 0.0, 0.5), 60.0).is_empty());
    assert!(engine::align(&lines(&["", "  "]), &[], 60.0).is_empty());
}

// =============================================================================
// Duration Strategy
// =============================================================================

#[test]
fn test_duration_strategy_spacing_and_clamp() {
    // 10 transcript words stays under the matching threshold; 4 lines of two
    // words each spread over 40 seconds.
    let lyric_lines = lines(&["one two", "three four", "five six", "seven eight"]);
    let transcript = filler(10, 0.0, 0.1);

    let aligned = engine::align(&lyric_lines, &transcript, 40.0);

    assert_eq!(aligned.len(), 4);
    let starts: Vec<f64> = aligned.iter().map(|e| e.start).collect();
    assert_eq!(starts, vec![0.0, 10.0, 20.0, 30.0]);

    // base 10s plus 0.4s variation for two-word lines; last entry clamped.
    assert!((aligned[0].end - 10.4).abs() < 1e-9);
    assert!((aligned[1].end - 20.4).abs() < 1e-9);
    assert!((aligned[2].end - 30.4).abs() < 1e-9);
    assert_eq!(aligned[3].end, 40.0);

    for entry in &aligned {
        assert_eq!(entry.confidence, DURATION_STRATEGY_CONFIDENCE);
        assert!(entry.end <= 40.0);
    }
}

#[test]
fn test_end_never_exceeds_duration() {
    // A long final line would overrun by base + variation without the clamp.
    let lyric_lines = lines(&["short one", "a b c d e f g h i j"]);
    let aligned = engine::align(&lyric_lines, &[], 10.0);

    assert_eq!(aligned.len(), 2);
    assert_eq!(aligned[1].start, 5.0);
    assert_eq!(aligned[1].end, 10.0);
}

#[test]
fn test_zero_duration_collapses_timeline() {
    let lyric_lines = lines(&["one two", "three four"]);
    let aligned = engine::align(&lyric_lines, &[], 0.0);

    for entry in &aligned {
        assert_eq!(entry.start, 0.0);
        assert_eq!(entry.end, 0.0);
    }
}

// =============================================================================
// Transcript-Driven Matching
// =============================================================================

#[test]
fn test_two_line_scenario_with_sixty_words() {
    let lyric_lines = lines(&["hello world", "goodnight moon"]);

    let mut transcript = Vec::new();
    for k in 0..10 {
        transcript.push(TranscriptWord::new(
            format!("zzq{}", k),
            0.19 * k as f64,
            0.19 * (k + 1) as f64,
        ));
    }
    transcript.push(TranscriptWord::new("hello", 2.0, 2.3));
    transcript.push(TranscriptWord::new("world", 2.3, 2.6));
    for k in 10..30 {
        transcript.push(TranscriptWord::new(
            format!("zzq{}", k),
            2.6 + 0.35 * (k - 10) as f64,
            9.9,
        ));
    }
    transcript.push(TranscriptWord::new("goodnight", 10.0, 10.4));
    transcript.push(TranscriptWord::new("moon", 10.4, 10.8));
    for k in 30..56 {
        transcript.push(TranscriptWord::new(
            format!("zzq{}", k),
            11.0 + 0.7 * (k - 30) as f64,
            30.0,
        ));
    }
    assert_eq!(transcript.len(), 60);

    let aligned = engine::align(&lyric_lines, &transcript, 30.0);

    assert_eq!(aligned.len(), 2);
    assert_eq!(aligned[0].start, 2.0);
    assert_eq!(aligned[0].end, 2.6);
    assert!(aligned[0].confidence >= 1.0);
    assert_eq!(aligned[1].start, 10.0);
    assert_eq!(aligned[1].end, 10.8);
    assert!(aligned[1].confidence >= 1.0);

    let formatted = format_lyrics(&aligned);
    let mut rendered = formatted.lines();
    assert_eq!(rendered.next(), Some("[00:02.000] hello world"));
    assert_eq!(rendered.next(), Some("[00:10.000] goodnight moon"));
    assert_eq!(rendered.next(), None);
}

#[test]
fn test_matched_and_fallback_lines_mix() {
    // The first line exists in the transcript; the second does not and takes
    // per-line fallback timing with its own confidence.
    let lyric_lines = lines(&["Hello World", "Wilfer Dromble"]);

    let mut transcript = vec![
        TranscriptWord::new("hello", 2.0, 2.3),
        TranscriptWord::new("world", 2.3, 2.6),
    ];
    transcript.extend(filler(58, 3.0, 0.4));
    assert_eq!(transcript.len(), 60);

    let aligned = engine::align(&lyric_lines, &transcript, 30.0);

    assert_eq!(aligned.len(), 2);
    // Matched lines emit the lowercased token join.
    assert_eq!(aligned[0].text, "hello world");
    assert_eq!(aligned[0].start, 2.0);
    assert!((aligned[0].confidence - 1.25).abs() < 1e-6);
    // Fallback lines keep the stored text and slot at index * base.
    assert_eq!(aligned[1].text, "Wilfer Dromble");
    assert_eq!(aligned[1].start, 15.0);
    assert_eq!(aligned[1].confidence, LINE_FALLBACK_CONFIDENCE);
}

#[test]
fn test_single_token_line_always_falls_back() {
    let lyric_lines = lines(&["hello"]);
    // Plenty of exact occurrences, but one-token lines are never matched.
    let mut transcript = filler(59, 0.0, 0.5);
    transcript.push(TranscriptWord::new("hello", 29.5, 30.0));

    let aligned = engine::align(&lyric_lines, &transcript, 30.0);

    assert_eq!(aligned.len(), 1);
    assert_eq!(aligned[0].confidence, LINE_FALLBACK_CONFIDENCE);
    assert_eq!(aligned[0].text, "hello");
    assert_eq!(aligned[0].start, 0.0);
}

// =============================================================================
// Similarity Properties
// =============================================================================

#[test]
fn test_similarity_is_reflexive() {
    for word in ["hello", "goodnight", "x", "ab"] {
        assert!(words_similar(word, word), "must be reflexive for {:?}", word);
    }
}

#[test]
fn test_similarity_is_symmetric_on_stable_pairs() {
    for (a, b) in [
        ("hello", "helo"),
        ("heart", "earth"),
        ("stone", "glyph"),
        ("cat", "act"),
        ("world", "worlds"),
    ] {
        assert_eq!(
            words_similar(a, b),
            words_similar(b, a),
            "symmetry for {:?}/{:?}",
            a,
            b
        );
    }
}

// =============================================================================
// Timestamp Format
// =============================================================================

#[test]
fn test_formatter_boundary_value() {
    assert_eq!(format_timestamp(65.4), "[01:05.400]");
}

#[test]
fn test_formatted_lines_parse_back_to_starts() {
    let lyric_lines = lines(&["one two", "three four", "five six"]);
    let aligned = engine::align(&lyric_lines, &[], 200.0);
    let formatted = format_lyrics(&aligned);

    for (rendered, entry) in formatted.lines().zip(&aligned) {
        let stamp = &rendered[..11];
        let parsed = parse_timestamp(stamp).expect("timestamp must parse");
        assert!(
            (parsed - entry.start).abs() < 0.001,
            "{} should round-trip to {}",
            stamp,
            entry.start
        );
    }
}
