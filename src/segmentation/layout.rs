/*!
 * Line layout: wrap a finished segment's text into at most `max_lines` lines.
 *
 * Priority order:
 * 1. caller-preferred delimiters, packed by backtracking so every line fits;
 * 2. the whole text on one line when it fits;
 * 3. a two-way split between two words.
 *
 * When nothing fits the text is kept on a single oversized line.
 */

use log::warn;
use std::collections::HashSet;

use crate::segmentation::punctuation::{ELLIPSIS, char_len, is_safe_boundary};
use crate::segmentation::segmenter::Segment;

/// Options the renderer reads from the subtitle configuration
#[derive(Debug, Clone)]
pub struct LayoutOptions<'a> {
    pub max_cpl: usize,
    pub max_lines: usize,
    pub delimiters: &'a [char],
}

/// Produce display lines for a segment, ellipsis markers included
pub fn wrap_segment(segment: &Segment, options: &LayoutOptions<'_>) -> Vec<String> {
    let pieces = display_pieces(segment);
    let text: String = pieces.concat();
    let mut lines = wrap_pieces(&pieces, &text, options);
    lines.truncate(options.max_lines.max(1));
    lines
}

/// Word texts with outer whitespace removed and continuation markers glued
/// on, so that joining them yields exactly the displayed text
fn display_pieces(segment: &Segment) -> Vec<String> {
    let mut pieces = segment.word_texts();

    while pieces.first().is_some_and(|p| p.trim_start().is_empty()) {
        pieces.remove(0);
    }
    while pieces.last().is_some_and(|p| p.trim_end().is_empty()) {
        pieces.pop();
    }
    if let Some(first) = pieces.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(last) = pieces.last_mut() {
        *last = last.trim_end().to_string();
    }

    if segment.leading_ellipsis {
        match pieces.first_mut() {
            Some(first) => first.insert_str(0, ELLIPSIS),
            None => pieces.push(ELLIPSIS.to_string()),
        }
    }
    if segment.trailing_ellipsis {
        match pieces.last_mut() {
            Some(last) => last.push_str(ELLIPSIS),
            None => pieces.push(ELLIPSIS.to_string()),
        }
    }
    pieces
}

fn wrap_pieces(pieces: &[String], text: &str, options: &LayoutOptions<'_>) -> Vec<String> {
    if options.max_lines <= 1 {
        return vec![text.to_string()];
    }

    if !options.delimiters.is_empty() {
        if let Some(lines) = wrap_with_delimiters(text, options) {
            return lines;
        }
    }

    if char_len(text) <= options.max_cpl {
        return vec![text.to_string()];
    }

    if let Some(lines) = split_at_word_boundary(pieces, options.max_cpl) {
        return lines;
    }

    warn!(
        "Subtitle line exceeds {} characters and has no fitting break: {:?}",
        options.max_cpl, text
    );
    vec![text.to_string()]
}

/// Cut the text after every delimiter occurrence into trimmed chunks
pub fn split_by_delimiters(text: &str, delimiters: &[char]) -> Vec<String> {
    let cleaned = text.replace('\n', " ");
    let delims: HashSet<char> = delimiters.iter().copied().collect();

    let mut chunks = Vec::new();
    let mut current = String::new();
    for c in cleaned.chars() {
        current.push(c);
        if delims.contains(&c) {
            let chunk = current.trim();
            if !chunk.is_empty() {
                chunks.push(chunk.to_string());
            }
            current.clear();
        }
    }

    let remainder = current.trim();
    if !remainder.is_empty() {
        chunks.push(remainder.to_string());
    }
    chunks
}

fn wrap_with_delimiters(text: &str, options: &LayoutOptions<'_>) -> Option<Vec<String>> {
    let chunks = split_by_delimiters(text, options.delimiters);
    if chunks.len() <= 1 {
        return None;
    }

    let partition = partition_chunks(&chunks, options.max_lines, options.max_cpl)?;
    let lines: Vec<String> = partition
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    (lines.len() > 1).then_some(lines)
}

/// Pack chunks into at most `max_lines` lines of at most `max_cpl` characters.
///
/// Depth-first: each line takes the fewest chunks that still let the rest
/// fit. Depth is bounded by `max_lines`.
pub fn partition_chunks(chunks: &[String], max_lines: usize, max_cpl: usize) -> Option<Vec<String>> {
    fn pack(chunks: &[String], remaining: usize, max_cpl: usize) -> Option<Vec<String>> {
        if chunks.is_empty() {
            return Some(Vec::new());
        }
        if remaining == 0 {
            return None;
        }

        let mut line = String::new();
        for (end, chunk) in chunks.iter().enumerate() {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(chunk);
            if char_len(&line) > max_cpl {
                break;
            }
            if let Some(mut rest) = pack(&chunks[end + 1..], remaining - 1, max_cpl) {
                rest.insert(0, line);
                return Some(rest);
            }
        }
        None
    }

    if max_lines == 0 || chunks.is_empty() {
        return Some(Vec::new());
    }
    pack(chunks, max_lines, max_cpl)
}

/// Two-way split between words, at a safe boundary where both halves fit `max_cpl`
fn split_at_word_boundary(pieces: &[String], max_cpl: usize) -> Option<Vec<String>> {
    let n = pieces.len();
    let safe_after: Vec<bool> = (0..n)
        .map(|i| i + 1 < n && !pieces[i + 1].is_empty() && is_safe_boundary(&pieces[i], &pieces[i + 1]))
        .collect();

    let halves = |i: usize| -> Option<Vec<String>> {
        let left = pieces[..=i].concat().trim_end().to_string();
        let right = pieces[i + 1..].concat().trim_start().to_string();
        (char_len(&left) <= max_cpl && char_len(&right) <= max_cpl).then(|| vec![left, right])
    };

    // Walk until the first line would overflow, then back off to a fitting break.
    let mut length = 0usize;
    let mut last_safe = None;
    for (i, piece) in pieces.iter().enumerate() {
        length += char_len(piece);
        if safe_after[i] {
            last_safe = Some(i);
        }
        if length > max_cpl {
            if let Some(last) = last_safe {
                if let Some(lines) = (0..=last).rev().filter(|&c| safe_after[c]).find_map(&halves) {
                    return Some(lines);
                }
            }
            break;
        }
    }

    // Otherwise the safe break nearest the character midpoint.
    let target = pieces.iter().map(|p| char_len(p)).sum::<usize>() / 2;
    let mut offset = 0usize;
    let mut nearest: Option<(usize, usize)> = None;
    for i in 0..n.saturating_sub(1) {
        offset += char_len(&pieces[i]);
        if safe_after[i] {
            let delta = offset.abs_diff(target);
            if nearest.is_none_or(|(_, best)| delta < best) {
                nearest = Some((i, delta));
            }
        }
    }

    nearest.and_then(|(i, _)| halves(i))
}
