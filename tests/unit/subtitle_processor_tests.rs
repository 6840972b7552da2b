/*!
 * Tests for subtitle processing functionality
 */

use std::path::PathBuf;
use std::fmt::Write;
use anyhow::Result;
use subcue::app_config::SubtitleConfig;
use subcue::subtitle_processor::{SubtitleEntry, SubtitleCollection};
use crate::common;

fn lines(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

/// Test timestamp parsing and formatting
#[test]
fn test_timestamp_parsing_withValidTimestamp_shouldParseAndFormat() {
    let ts = "01:23:45,678";
    let ms = SubtitleEntry::parse_timestamp(ts).unwrap();
    assert_eq!(ms, 5025678);

    let formatted = SubtitleEntry::format_timestamp(ms);
    assert_eq!(formatted, ts);
}

#[test]
fn test_timestamp_parsing_withOutOfRangeMinutes_shouldFail() {
    assert!(SubtitleEntry::parse_timestamp("00:61:00,000").is_err());
    assert!(SubtitleEntry::parse_timestamp("00:00:00").is_err());
}

#[test]
fn test_formatTimestamp_withLongDuration_shouldPadHours() {
    assert_eq!(SubtitleEntry::format_timestamp(0), "00:00:00,000");
    assert_eq!(SubtitleEntry::format_timestamp(100 * 3_600_000 + 5), "100:00:00,005");
}

/// Test subtitle entry display formatting
#[test]
fn test_subtitle_entry_display_withTwoLines_shouldFormatAsSrtBlock() {
    let entry = SubtitleEntry::new(1, 5000, 10000, lines(&["Test", "subtitle"]));
    let mut output = String::new();
    write!(output, "{}", entry).unwrap();

    assert_eq!(output, "1\n00:00:05,000 --> 00:00:10,000\nTest\nsubtitle\n\n");
}

#[test]
fn test_subtitle_entry_properties_withValidEntry_shouldHaveCorrectValues() {
    let entry = SubtitleEntry::new(42, 61234, 65432, lines(&["Hello", "World"]));

    assert_eq!(entry.text(), "Hello World");
    assert_eq!(entry.duration_ms(), 4198);
    assert_eq!(entry.format_start_time(), "00:01:01,234");
    assert_eq!(entry.format_end_time(), "00:01:05,432");
}

#[test]
fn test_parseSrtString_withMultilineEntriesAndBom_shouldParseAll() -> Result<()> {
    let content = "\u{feff}1\n00:00:01,000 --> 00:00:02,500\nHello\nworld\n\n2\n00:00:03,000 --> 00:00:04,000\nSecond\n";

    let entries = SubtitleCollection::parse_srt_string(content)?;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].lines, lines(&["Hello", "world"]));
    assert_eq!((entries[0].start_time_ms, entries[0].end_time_ms), (1000, 2500));
    assert_eq!(entries[1].lines, lines(&["Second"]));
    Ok(())
}

#[test]
fn test_parseSrtString_withMalformedBlocks_shouldSkipAndRenumber() -> Result<()> {
    let content = "garbage\n\n7\n00:00:01,000 --> 00:00:02,000\n\n9\n00:00:03,000 --> 00:00:04,000\n42\n\n12\n00:00:05,000 --> 00:00:06,000\nLast\n";

    let entries = SubtitleCollection::parse_srt_string(content)?;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].seq_num, 1);
    assert_eq!(entries[0].lines, lines(&["42"]));
    assert_eq!(entries[1].seq_num, 2);
    assert_eq!(entries[1].lines, lines(&["Last"]));
    Ok(())
}

#[test]
fn test_parseSrtString_withNoEntries_shouldFail() {
    assert!(SubtitleCollection::parse_srt_string("just some text\n").is_err());
}

#[test]
fn test_writeToSrt_thenReadSrt_shouldPreserveEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut collection = SubtitleCollection::new(PathBuf::from("talk.json"));
    collection.entries.push(SubtitleEntry::new(1, 0, 1500, lines(&["First line", "second line"])));
    collection.entries.push(SubtitleEntry::new(2, 2000, 3500, lines(&["Next"])));

    let path = temp_dir.path().join("nested").join("talk.srt");
    collection.write_to_srt(&path)?;

    let reread = SubtitleCollection::read_srt(&path)?;
    assert_eq!(reread.entries, collection.entries);
    assert_eq!(reread.source_file, path);
    Ok(())
}

#[test]
fn test_fromTokens_shouldSegmentTranscript() {
    let tokens = common::repeated_word(10, 1000);
    let collection = SubtitleCollection::from_tokens(PathBuf::from("talk.json"), &tokens, &SubtitleConfig::default());

    assert!(!collection.is_empty());
    assert_eq!(collection.entries.len(), 2);
    assert!(collection.to_srt_string().starts_with("1\n00:00:00,000 --> 00:00:05,000\nword word word word word\n\n2\n"));
}

#[test]
fn test_readSrt_withSampleFile_shouldLoadThreeEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "sample.srt")?;

    let collection = SubtitleCollection::read_srt(&path)?;
    assert_eq!(collection.entries.len(), 3);
    assert_eq!(collection.entries[2].text(), "For testing purposes.");
    Ok(())
}
