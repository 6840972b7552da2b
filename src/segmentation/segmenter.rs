/*!
 * Segmenter: walk words in time order and close candidate subtitles at
 * silences, speaker changes and sentence ends.
 */

use log::{debug, trace};
use std::ops::Range;

use crate::segmentation::punctuation::{
    char_len, cps_char_count, ends_with_sentence_break, is_safe_boundary, is_sentence_break,
};
use crate::segmentation::words::Word;
use crate::transcript::Token;

// @struct: Candidate subtitle between two boundaries
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Segment {
    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms, never before start
    pub end_ms: u64,

    // @field: First speaker seen
    pub speaker: Option<String>,

    // @field: Owned tokens, flattened from the segment's words
    pub tokens: Vec<Token>,

    // @field: Token offset at which each word begins, ascending
    pub word_starts: Vec<usize>,

    // @field: Closed by sentence-ending punctuation
    pub ends_at_sentence: bool,

    // @field: Continues a sentence split off the previous segment
    pub leading_ellipsis: bool,

    // @field: Sentence continues in the next segment
    pub trailing_ellipsis: bool,
}

impl Segment {
    /// Build a segment spanning `words`, keeping their boundaries.
    ///
    /// Start is the first word's start (0 when unknown); end is the latest
    /// token end, falling back to token starts, and never before start.
    pub fn from_words(words: Vec<Word>) -> Self {
        let start_ms = words.first().and_then(|w| w.start_ms).unwrap_or(0);

        let mut tokens = Vec::new();
        let mut word_starts = Vec::with_capacity(words.len());
        for word in words {
            word_starts.push(tokens.len());
            tokens.extend(word.tokens);
        }

        let end_ms = tokens
            .iter()
            .filter_map(|t| t.end_ms.or(t.start_ms))
            .max()
            .unwrap_or(start_ms)
            .max(start_ms);
        let speaker = tokens.iter().find_map(|t| t.speaker.clone());

        Segment {
            start_ms,
            end_ms,
            speaker,
            tokens,
            word_starts,
            ..Segment::default()
        }
    }

    /// Token ranges of the segment's words. A segment without recorded
    /// boundaries is one word.
    pub fn word_ranges(&self) -> Vec<Range<usize>> {
        let n = self.tokens.len();
        if n == 0 {
            return Vec::new();
        }

        let mut starts = vec![0];
        starts.extend(self.word_starts.iter().copied().filter(|&s| s > 0 && s < n));
        starts.dedup();

        let ends = starts.iter().skip(1).copied().chain(std::iter::once(n));
        starts.iter().copied().zip(ends).map(|(start, end)| start..end).collect()
    }

    /// Each word's text, exactly as its tokens spell it
    pub fn word_texts(&self) -> Vec<String> {
        self.word_ranges()
            .into_iter()
            .map(|range| concat_text(&self.tokens[range]))
            .collect()
    }

    /// Source text: the tokens joined, outer whitespace trimmed
    pub fn text(&self) -> String {
        concat_text(&self.tokens).trim().to_string()
    }

    /// Text as displayed, with continuation markers
    pub fn display_text(&self) -> String {
        let mut text = self.text();
        if self.leading_ellipsis {
            text.insert_str(0, crate::segmentation::punctuation::ELLIPSIS);
        }
        if self.trailing_ellipsis {
            text.push_str(crate::segmentation::punctuation::ELLIPSIS);
        }
        text
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Non-space characters per second; duration is floored at 1ms
    pub fn reading_speed(&self) -> f64 {
        let duration = self.duration_ms().max(1) as f64;
        cps_char_count(&self.text()) as f64 / (duration / 1000.0)
    }

    pub fn char_count(&self) -> usize {
        char_len(&self.text())
    }
}

/// Join token texts without altering them
pub fn concat_text(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

/// Options the segmenter reads from the subtitle configuration
#[derive(Debug, Clone, Copy)]
pub struct SegmenterOptions {
    pub gap_ms: u64,
    pub split_on_speaker: bool,
    pub segment_on_sentence: bool,
}

/// Open segment state while walking words
#[derive(Default)]
struct SegmentAccumulator {
    segments: Vec<Segment>,
    words: Vec<Word>,
    text: String,
    last_end_ms: Option<u64>,
    speaker: Option<String>,
    discarded: usize,
}

impl SegmentAccumulator {
    fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn append(&mut self, word: &Word) {
        self.words.push(word.clone());
        self.text.push_str(&word.text);
        if word.end_ms.is_some() {
            self.last_end_ms = word.end_ms;
        }
        if self.speaker.is_none() {
            self.speaker = word.speaker.clone();
        }
    }

    fn close(&mut self, ends_at_sentence: bool) {
        if self.is_empty() {
            return;
        }

        let words = std::mem::take(&mut self.words);
        let text = std::mem::take(&mut self.text);
        self.last_end_ms = None;
        self.speaker = None;

        if text.trim().is_empty() {
            self.discarded += 1;
            return;
        }

        let mut segment = Segment::from_words(words);
        segment.ends_at_sentence = ends_at_sentence;
        self.segments.push(segment);
    }
}

/// Build candidate segments from words
pub fn build_segments(words: &[Word], options: SegmenterOptions) -> Vec<Segment> {
    let mut acc = SegmentAccumulator::default();

    for word in words {
        let speaker_changed = match (&word.speaker, &acc.speaker) {
            (Some(next), Some(current)) => next != current,
            _ => false,
        };

        if options.split_on_speaker && speaker_changed && !acc.is_empty() {
            trace!("Speaker change before {:?}", word.text);
            acc.close(false);
        } else if let (false, Some(last_end), Some(start)) =
            (acc.is_empty(), acc.last_end_ms, word.start_ms)
        {
            let long_gap = options.gap_ms > 0 && start > last_end && start - last_end > options.gap_ms;
            if long_gap && is_safe_boundary(&acc.text, &word.text) {
                trace!("Gap of {}ms before {:?}", start - last_end, word.text);
                acc.close(false);
            }
        }

        acc.append(word);

        let sentence_end = is_sentence_break(&word.text)
            || (options.segment_on_sentence && ends_with_sentence_break(&acc.text));
        if sentence_end {
            acc.close(true);
        }
    }

    acc.close(false);

    if acc.discarded > 0 {
        debug!("Discarded {} whitespace-only segments", acc.discarded);
    }
    debug!("Built {} segments from {} words", acc.segments.len(), words.len());
    acc.segments
}
