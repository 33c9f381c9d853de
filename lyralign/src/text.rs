//! Lyric text cleaning
//!
//! Stored lyrics carry structural annotations like `[Chorus]`, `[Verse 1]`
//! or `(backing vocals)` that are not sung text. Cleaning removes those
//! spans and splits the remainder into trimmed, non-empty lines ready for
//! alignment.

/// Clean raw lyric text and split it into alignable lines.
///
/// Bracketed `[...]` spans are removed first, then parenthetical `(...)`
/// spans. A span never crosses a line break; an opener with no closer on
/// its own line is kept verbatim. Lines that are empty after cleaning and
/// trimming are dropped. Interior whitespace is preserved.
pub fn clean_and_split(raw: &str) -> Vec<String> {
    let text = strip_spans(raw, '[', ']');
    let text = strip_spans(&text, '(', ')');

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove every `open`..`close` span that closes on the same line.
///
/// Shortest-span semantics: a span runs from an opener to the nearest
/// following closer, so an inner opener is simply consumed. Stray closers
/// and unclosed openers pass through untouched.
fn strip_spans(text: &str, open: char, close: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices();

    while let Some((idx, c)) = chars.next() {
        if c != open {
            out.push(c);
            continue;
        }

        let rest = &text[idx + open.len_utf8()..];
        let closer = rest
            .char_indices()
            .take_while(|(_, c)| *c != '\n')
            .find(|(_, c)| *c == close);

        match closer {
            Some((offset, _)) => {
                // Skip the span body and the closer itself
                let mut remaining = offset + close.len_utf8();
                while remaining > 0 {
                    if let Some((_, skipped)) = chars.next() {
                        remaining -= skipped.len_utf8();
                    } else {
                        break;
                    }
                }
            }
            None => out.push(c),
        }
    }

    out
}
