//! Fuzzy word equivalence
//!
//! Decides whether a recognized transcript word and a written lyric word are
//! "the same" under rules tolerant of minor spelling and punctuation
//! differences. Pure functions; results are reproducible bit-for-bit for
//! identical inputs, which the matcher's scoring depends on.

/// Minimum normalized length (exclusive) for the shared-character rule
const MIN_FUZZY_LEN: usize = 3;

/// Required fraction of shared characters relative to the shorter word
const SHARED_CHAR_RATIO: f64 = 0.7;

/// Normalize a word for comparison: lower-case, then keep only alphanumeric
/// characters and underscores.
pub fn normalize_word(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Fuzzy equivalence test between two words.
///
/// Both inputs are normalized first. Rules apply in order, first hit wins:
/// 1. Equal after normalization.
/// 2. One is a substring of the other (either direction; an empty
///    normalized word is a substring of anything).
/// 3. Both longer than 3 characters and the characters of `word_a` found
///    anywhere in `word_b` (each occurrence in `word_a` counted) reach 70%
///    of the shorter length.
///
/// Symmetric for rules 1 and 2 by construction; rule 3 counts from
/// `word_a`'s side but membership against the full other word keeps the
/// outcome symmetric in practice for the duplicate-free case.
pub fn words_similar(word_a: &str, word_b: &str) -> bool {
    let a = normalize_word(word_a);
    let b = normalize_word(word_b);

    if a == b {
        return true;
    }

    if a.contains(&b) || b.contains(&a) {
        return true;
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a > MIN_FUZZY_LEN && len_b > MIN_FUZZY_LEN {
        let shared = a.chars().filter(|c| b.contains(*c)).count();
        return shared as f64 >= SHARED_CHAR_RATIO * len_a.min(len_b) as f64;
    }

    false
}
