/*!
 * Tests for line layout
 */

use subcue::segmentation::layout::{partition_chunks, split_by_delimiters};
use subcue::segmentation::{LayoutOptions, Segment, tokens_to_words, wrap_segment};
use subcue::transcript::Token;

fn segment(texts: &[&str]) -> Segment {
    let tokens: Vec<Token> = texts.iter().map(|t| Token::untimed(*t)).collect();
    Segment::from_words(tokens_to_words(&tokens))
}

fn chunks(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

#[test]
fn test_splitByDelimiters_withCommas_shouldKeepDelimiterOnChunk() {
    let result = split_by_delimiters("Well, I think so, yes.", &[',']);
    assert_eq!(result, vec!["Well,", "I think so,", "yes."]);
}

#[test]
fn test_splitByDelimiters_withNewlines_shouldTreatThemAsSpaces() {
    let result = split_by_delimiters("first line\nsecond、third", &['、']);
    assert_eq!(result, vec!["first line second、", "third"]);
}

#[test]
fn test_partitionChunks_shouldTakeFewestChunksFirst() {
    let result = partition_chunks(&chunks(&["Well,", "I think so,", "yes."]), 2, 16);
    assert_eq!(result, Some(chunks(&["Well,", "I think so, yes."])));
}

#[test]
fn test_partitionChunks_whenNothingFits_shouldReturnNone() {
    let result = partition_chunks(&chunks(&["aaaa,", "bbbb,", "cccc"]), 2, 8);
    assert_eq!(result, None);
}

#[test]
fn test_wrapSegment_withPreferredDelimiter_shouldBreakAfterIt() {
    let seg = segment(&["Well", ",", " I", " think", " so", ",", " yes", "."]);
    let options = LayoutOptions {
        max_cpl: 16,
        max_lines: 2,
        delimiters: &[','],
    };

    let lines = wrap_segment(&seg, &options);
    assert_eq!(lines, vec!["Well,", "I think so, yes."]);
}

#[test]
fn test_wrapSegment_withJapaneseDelimiter_shouldSplitWithoutSpaces() {
    let seg = segment(&["今日は", "いい", "天気", "ですね", "、", "散歩", "に", "行き", "ましょう"]);
    let options = LayoutOptions {
        max_cpl: 12,
        max_lines: 2,
        delimiters: &['、'],
    };

    let lines = wrap_segment(&seg, &options);
    assert_eq!(lines, vec!["今日はいい天気ですね、", "散歩に行きましょう"]);
}

#[test]
fn test_wrapSegment_withSingleLineLimit_shouldNeverBreak() {
    let seg = segment(&["The", " quick", " brown", " fox", " jumps", " over", " the", " lazy", " dog"]);
    let options = LayoutOptions {
        max_cpl: 10,
        max_lines: 1,
        delimiters: &[],
    };

    let lines = wrap_segment(&seg, &options);
    assert_eq!(lines, vec!["The quick brown fox jumps over the lazy dog"]);
}

#[test]
fn test_wrapSegment_withEllipsisFlags_shouldGlueMarkersToText() {
    let mut seg = segment(&["and", " then", " we", " left", " the", " party", " early"]);
    seg.leading_ellipsis = true;
    seg.trailing_ellipsis = true;
    let options = LayoutOptions {
        max_cpl: 18,
        max_lines: 2,
        delimiters: &[],
    };

    let lines = wrap_segment(&seg, &options);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('…'));
    assert!(lines[1].ends_with('…'));
    assert!(lines.iter().all(|l| l.chars().count() <= 18));
}

#[test]
fn test_wrapSegment_withHyphenatedWord_shouldNotBreakAtHyphen() {
    let seg = segment(&["the", " well", "-", "known"]);
    let options = LayoutOptions {
        max_cpl: 10,
        max_lines: 2,
        delimiters: &[],
    };

    let lines = wrap_segment(&seg, &options);
    assert_eq!(lines, vec!["the", "well-known"]);
}

#[test]
fn test_wrapSegment_withDecimalNumber_shouldKeepNumberTogether() {
    let seg = segment(&["aaaaa", " 3", ".", "5bbbbb"]);
    let options = LayoutOptions {
        max_cpl: 8,
        max_lines: 2,
        delimiters: &[],
    };

    let lines = wrap_segment(&seg, &options);
    assert_eq!(lines, vec!["aaaaa", "3.5bbbbb"]);
}
