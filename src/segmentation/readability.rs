/*!
 * Readability enforcement over candidate segments.
 *
 * Two passes run in order:
 * - the split pass breaks any segment that is too long, too fast or has too
 *   many characters at a word boundary, working through an explicit queue so
 *   pathological inputs cannot exhaust the call stack;
 * - the merge pass folds segments shorter than the minimum duration into
 *   their right neighbor, repeating until a full scan merges nothing.
 *
 * Neither pass changes token timestamps, only segment boundaries.
 */

use log::{debug, warn};
use std::collections::VecDeque;

use crate::segmentation::punctuation::{char_len, is_safe_boundary, is_sentence_ender};
use crate::segmentation::segmenter::Segment;
use crate::transcript::Token;

/// Bounds applied by the split and merge passes
#[derive(Debug, Clone, Copy)]
pub struct ReadabilityLimits {
    pub max_cps: f64,
    pub min_dur_ms: u64,
    pub max_dur_ms: u64,
    pub max_chars: Option<usize>,
    pub use_ellipses: bool,
    pub preserve_sentence_breaks: bool,
}

impl ReadabilityLimits {
    /// Whether a segment breaks any duration, speed or length bound
    pub fn is_violated_by(&self, segment: &Segment) -> bool {
        segment.duration_ms().max(1) > self.max_dur_ms
            || segment.reading_speed() > self.max_cps
            || self.max_chars.is_some_and(|max| segment.char_count() > max)
    }
}

/// Run the split pass then the merge pass
pub fn enforce_readability(segments: Vec<Segment>, limits: &ReadabilityLimits) -> Vec<Segment> {
    let split = split_pass(segments, limits);
    merge_pass(split, limits)
}

/// Break violating segments until every piece fits or is a single word
pub fn split_pass(segments: Vec<Segment>, limits: &ReadabilityLimits) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    let mut queue: VecDeque<Segment> = segments.into();
    let mut splits = 0usize;

    while let Some(current) = queue.pop_front() {
        if !limits.is_violated_by(&current) {
            out.push(current);
            continue;
        }

        let Some(index) = find_split_index(&current.word_texts()) else {
            warn!(
                "Keeping oversized single-word subtitle at {}ms ({}ms, {:.1} CPS, {} chars)",
                current.start_ms,
                current.duration_ms(),
                current.reading_speed(),
                current.char_count()
            );
            out.push(current);
            continue;
        };

        let (left, right) = split_segment(current, index, limits.use_ellipses);
        splits += 1;
        queue.push_front(right);
        queue.push_front(left);
    }

    if splits > 0 {
        debug!("Split pass performed {} splits, {} segments out", splits, out.len());
    }
    out
}

/// Cut a segment before its word `index`, recomputing each half's time span
fn split_segment(parent: Segment, index: usize, use_ellipses: bool) -> (Segment, Segment) {
    let starts: Vec<usize> = parent.word_ranges().into_iter().map(|r| r.start).collect();
    let cut = starts[index];

    let Segment {
        start_ms,
        end_ms,
        speaker,
        mut tokens,
        ends_at_sentence,
        leading_ellipsis,
        trailing_ellipsis,
        ..
    } = parent;

    let right_tokens = tokens.split_off(cut);
    let left_tokens = tokens;
    let (left_starts, right_starts): (Vec<usize>, Vec<usize>) = starts.into_iter().partition(|&s| s < cut);

    let (left_start, left_end) = token_span(&left_tokens, start_ms, start_ms);
    let right_fallback = left_end.clamp(start_ms, end_ms.max(start_ms));
    let (right_start, right_end) = token_span(&right_tokens, right_fallback, end_ms);

    let left = Segment {
        start_ms: left_start,
        end_ms: left_end,
        speaker: speaker.clone(),
        tokens: left_tokens,
        word_starts: left_starts,
        ends_at_sentence: false,
        leading_ellipsis,
        trailing_ellipsis: use_ellipses,
    };
    let right = Segment {
        start_ms: right_start,
        end_ms: right_end,
        speaker,
        tokens: right_tokens,
        word_starts: right_starts.into_iter().map(|s| s - cut).collect(),
        ends_at_sentence,
        leading_ellipsis: use_ellipses,
        trailing_ellipsis,
    };
    (left, right)
}

/// First known start and last known end of a token run
fn token_span(tokens: &[Token], fallback_start: u64, fallback_end: u64) -> (u64, u64) {
    let start = tokens
        .iter()
        .find_map(|t| t.start_ms)
        .unwrap_or(fallback_start);
    let end = tokens
        .iter()
        .rev()
        .find_map(|t| t.end_ms)
        .or_else(|| tokens.iter().rev().find_map(|t| t.start_ms))
        .unwrap_or(fallback_end);
    (start, end.max(start))
}

/// Choose the word before which to cut a segment in two.
///
/// Prefers the safe boundary whose character offset is closest to the text
/// midpoint. Without any safe boundary, falls back to a sentence end near the
/// word midpoint, then the word midpoint itself. The choice is finally
/// nudged to the nearest safe boundary, forward first.
///
/// Returns `None` for fewer than two words: a word is never cut.
pub fn find_split_index<S: AsRef<str>>(words: &[S]) -> Option<usize> {
    let n = words.len();
    if n <= 1 {
        return None;
    }

    let total: usize = words.iter().map(|w| char_len(w.as_ref())).sum();
    let mid_chars = total / 2;

    let mut cumulative = Vec::with_capacity(n);
    let mut acc = 0usize;
    for word in words {
        acc += char_len(word.as_ref());
        cumulative.push(acc);
    }

    let best_safe = (1..n)
        .filter(|&k| is_safe_at(words, k))
        .min_by_key(|&k| cumulative[k - 1].abs_diff(mid_chars));
    if let Some(best) = best_safe {
        return Some(adjust_to_safe(words, best));
    }

    let ends_sentence = |k: usize| words[k - 1].as_ref().chars().last().is_some_and(is_sentence_ender);
    let mid_word = n / 2;
    if let Some(k) = (1..=mid_word).rev().find(|&k| ends_sentence(k)) {
        return Some(adjust_to_safe(words, k));
    }
    if let Some(k) = (mid_word + 1..n).find(|&k| ends_sentence(k)) {
        return Some(adjust_to_safe(words, k));
    }

    Some(adjust_to_safe(words, mid_word))
}

/// Whether the break before word `k` also looks like a word break in the text
fn is_safe_at<S: AsRef<str>>(words: &[S], k: usize) -> bool {
    if k == 0 || k >= words.len() {
        return true;
    }
    is_safe_boundary(words[k - 1].as_ref(), words[k].as_ref())
}

fn adjust_to_safe<S: AsRef<str>>(words: &[S], k: usize) -> usize {
    if is_safe_at(words, k) {
        return k;
    }
    (k + 1..words.len())
        .find(|&j| is_safe_at(words, j))
        .or_else(|| (1..k).rev().find(|&j| is_safe_at(words, j)))
        .unwrap_or(k)
}

/// Fold short segments into their right neighbor until nothing changes
pub fn merge_pass(segments: Vec<Segment>, limits: &ReadabilityLimits) -> Vec<Segment> {
    let mut current = segments;
    let mut rounds = 0usize;

    loop {
        let (merged, changed) = merge_once(current, limits);
        current = merged;
        if !changed {
            break;
        }
        rounds += 1;
    }

    if rounds > 0 {
        debug!("Merge pass stabilised after {} rounds, {} segments", rounds, current.len());
    }
    current
}

/// One left-to-right scan; reports whether anything merged
fn merge_once(segments: Vec<Segment>, limits: &ReadabilityLimits) -> (Vec<Segment>, bool) {
    let mut merged = Vec::with_capacity(segments.len());
    let mut changed = false;
    let mut iter = segments.into_iter().peekable();

    while let Some(segment) = iter.next() {
        let short = segment.duration_ms() < limits.min_dur_ms;
        let protected = limits.preserve_sentence_breaks && segment.ends_at_sentence;

        if short && !protected {
            if let Some(next) = iter.peek() {
                let combined_end = next.end_ms.max(segment.end_ms);
                if combined_end.saturating_sub(segment.start_ms) <= limits.max_dur_ms {
                    if let Some(next) = iter.next() {
                        merged.push(join_segments(segment, next));
                        changed = true;
                        continue;
                    }
                }
            }
        }

        merged.push(segment);
    }

    (merged, changed)
}

fn join_segments(left: Segment, right: Segment) -> Segment {
    let offset = left.tokens.len();
    let mut word_starts: Vec<usize> = left.word_ranges().into_iter().map(|r| r.start).collect();
    word_starts.extend(right.word_ranges().into_iter().map(|r| r.start + offset));

    let mut tokens = left.tokens;
    tokens.extend(right.tokens);
    Segment {
        start_ms: left.start_ms,
        end_ms: right.end_ms.max(left.end_ms),
        speaker: left.speaker.or(right.speaker),
        tokens,
        word_starts,
        ends_at_sentence: right.ends_at_sentence,
        leading_ellipsis: left.leading_ellipsis,
        trailing_ellipsis: right.trailing_ellipsis,
    }
}
