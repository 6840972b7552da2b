/*!
 * Word assembly: glue sub-word recognizer tokens into whitespace-delimited words.
 */

use log::trace;

use crate::segmentation::punctuation::{
    ends_with_full_width_ender, is_punctuation_only, starts_with_whitespace,
};
use crate::transcript::Token;

// @struct: Whitespace-delimited unit of one or more tokens
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    // @field: Joined token text, with a single leading space when the word opened on one
    pub text: String,

    // @field: Earliest known token start
    pub start_ms: Option<u64>,

    // @field: Latest known token end
    pub end_ms: Option<u64>,

    // @field: First speaker seen among the tokens
    pub speaker: Option<String>,

    // @field: Source tokens, unmodified
    pub tokens: Vec<Token>,
}

/// Accumulates tokens for the word currently being built
#[derive(Default)]
struct WordBuilder {
    words: Vec<Word>,
    text: String,
    start_ms: Option<u64>,
    end_ms: Option<u64>,
    speaker: Option<String>,
    tokens: Vec<Token>,
}

impl WordBuilder {
    fn is_open(&self) -> bool {
        !self.tokens.is_empty()
    }

    fn push(&mut self, token: &Token, leading_space: bool) {
        if leading_space && !self.is_open() {
            self.text.push(' ');
        }
        self.text.push_str(token.text.trim_start());

        if let Some(start) = token.start_ms {
            self.start_ms = Some(self.start_ms.map_or(start, |s| s.min(start)));
        }
        if let Some(end) = token.end_ms {
            self.end_ms = Some(self.end_ms.map_or(end, |e| e.max(end)));
        }
        if self.speaker.is_none() {
            self.speaker = token.speaker.clone();
        }
        self.tokens.push(token.clone());
    }

    fn flush(&mut self) {
        if !self.is_open() {
            return;
        }
        self.words.push(Word {
            text: std::mem::take(&mut self.text),
            start_ms: self.start_ms.take(),
            end_ms: self.end_ms.take(),
            speaker: self.speaker.take(),
            tokens: std::mem::take(&mut self.tokens),
        });
    }

    fn finish(mut self) -> Vec<Word> {
        self.flush();
        self.words
    }
}

/// Group tokens into words so later stages never break inside one.
///
/// A token opening with whitespace starts a new word; everything else,
/// punctuation included, is appended to the open word. A word ending in a
/// full-width terminator is closed, since those scripts put no spaces
/// between words. Empty tokens are dropped.
pub fn tokens_to_words(tokens: &[Token]) -> Vec<Word> {
    let mut builder = WordBuilder::default();

    for token in tokens.iter().filter(|t| !t.text.is_empty()) {
        let leading_space = starts_with_whitespace(&token.text);

        if leading_space {
            builder.flush();
        } else if builder.is_open()
            && ends_with_full_width_ender(&builder.text)
            && !is_punctuation_only(&token.text)
        {
            builder.flush();
        }

        builder.push(token, leading_space);
    }

    let mut words = builder.finish();
    if let Some(first) = words.first_mut() {
        let trimmed = first.text.trim_start();
        if trimmed.len() != first.text.len() {
            first.text = trimmed.to_string();
        }
    }

    trace!("Assembled {} words from {} tokens", words.len(), tokens.len());
    words
}
