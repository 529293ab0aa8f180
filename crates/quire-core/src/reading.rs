//! Word counts and reading-time estimates for post bodies.

use serde::Serialize;

/// Reading speed used when the site does not configure one.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Statistics derived from a post body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadingStats {
    pub words: usize,
    /// Whole minutes, rounded up. Never zero.
    pub minutes: u32,
}

/// Count words and estimate reading time at `words_per_minute`.
///
/// A `words_per_minute` of zero is treated as one.
#[must_use]
pub fn reading_stats(text: &str, words_per_minute: u32) -> ReadingStats {
    let words = count_words(text);
    let wpm = u64::from(words_per_minute.max(1));
    let minutes = (words as u64).div_ceil(wpm).max(1);
    ReadingStats {
        words,
        minutes: u32::try_from(minutes).unwrap_or(u32::MAX),
    }
}

/// Count the words in `text`.
///
/// CJK ideographs, kana and hangul syllables count as one word each. Any
/// other run of non-whitespace counts once if it holds a letter or digit,
/// so stray punctuation such as `-` or `>` is ignored.
#[must_use]
pub fn count_words(text: &str) -> usize {
    let mut words = 0;
    for token in text.split_whitespace() {
        let mut run_has_alnum = false;
        for c in token.chars() {
            if is_cjk(c) {
                words += usize::from(run_has_alnum) + 1;
                run_has_alnum = false;
            } else if c.is_alphanumeric() {
                run_has_alnum = true;
            }
        }
        words += usize::from(run_has_alnum);
    }
    words
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{AC00}'..='\u{D7AF}'
        | '\u{F900}'..='\u{FAFF}')
}
