/*!
 * Character classes shared by every segmentation stage.
 *
 * The sets are process-wide and read-only. A boundary between two pieces of
 * text is "safe" when breaking there cannot land inside a word: the right
 * side opens with whitespace, or the left side closes with whitespace,
 * sentence-ending punctuation or a minor breaker.
 */

use once_cell::sync::Lazy;
use std::collections::HashSet;

// @const: Sentence terminators across scripts
pub static SENTENCE_ENDERS: Lazy<HashSet<char>> =
    Lazy::new(|| ['。', '.', '！', '!', '？', '?', '｡'].into_iter().collect());

// @const: Clause-level breakers
pub static MINOR_BREAKERS: Lazy<HashSet<char>> =
    Lazy::new(|| [',', ';', ':', '、', '—', '–', '-'].into_iter().collect());

// @const: Characters that attach to the preceding word
pub static PUNCTUATION: Lazy<HashSet<char>> = Lazy::new(|| {
    ['.', ',', '!', '?', ';', ':', '–', '—', '-', '…']
        .into_iter()
        .collect()
});

// @const: Terminators used by scripts without inter-word spaces
pub static FULL_WIDTH_ENDERS: Lazy<HashSet<char>> =
    Lazy::new(|| ['。', '！', '？', '｡'].into_iter().collect());

/// Continuation marker for forcibly split sentences
pub const ELLIPSIS: &str = "…";

pub fn is_sentence_ender(c: char) -> bool {
    SENTENCE_ENDERS.contains(&c)
}

pub fn is_minor_breaker(c: char) -> bool {
    MINOR_BREAKERS.contains(&c)
}

/// True when the text is exactly one sentence-ending character
pub fn is_sentence_break(text: &str) -> bool {
    let mut chars = text.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if is_sentence_ender(c))
}

/// True when the text, ignoring trailing whitespace, ends a sentence
pub fn ends_with_sentence_break(text: &str) -> bool {
    text.trim_end().chars().last().is_some_and(is_sentence_ender)
}

/// True when the text ends with a full-width terminator
pub fn ends_with_full_width_ender(text: &str) -> bool {
    text.chars().last().is_some_and(|c| FULL_WIDTH_ENDERS.contains(&c))
}

/// True when every character is attachable punctuation
pub fn is_punctuation_only(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| PUNCTUATION.contains(&c))
}

pub fn starts_with_whitespace(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_whitespace)
}

/// Whether a break between `prev` and `next` stays outside any word
pub fn is_safe_boundary(prev: &str, next: &str) -> bool {
    if next.is_empty() || starts_with_whitespace(next) {
        return true;
    }
    match prev.chars().last() {
        Some(c) => c.is_whitespace() || is_sentence_ender(c) || is_minor_breaker(c),
        None => false,
    }
}

/// Display length in characters
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Characters that count towards reading speed (whitespace excluded)
pub fn cps_char_count(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}
