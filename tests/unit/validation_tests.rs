/*!
 * Tests for the readability report
 */

use subcue::app_config::SubtitleConfig;
use subcue::subtitle_processor::SubtitleEntry;
use subcue::validation::{ReadabilityIssue, ReadabilityValidator};

fn entry(seq_num: usize, start: u64, end: u64, text: &str) -> SubtitleEntry {
    SubtitleEntry::new(seq_num, start, end, vec![text.to_string()])
}

#[test]
fn test_validate_withReadableEntries_shouldPass() {
    let validator = ReadabilityValidator::new(SubtitleConfig::default());
    let entries = vec![
        entry(1, 0, 2000, "Good morning."),
        entry(2, 2500, 5000, "How are you today?"),
    ];

    let report = validator.validate(&entries);
    assert!(report.passed());
    assert_eq!(report.total_issues, 0);
    assert!(report.peak_cps > 0.0);
}

#[test]
fn test_validate_withLongEntry_shouldReportDuration() {
    let validator = ReadabilityValidator::new(SubtitleConfig::default());
    let report = validator.validate(&[entry(1, 0, 9000, "Slow")]);

    assert_eq!(
        report.entry_reports[0].issues,
        vec![ReadabilityIssue::DurationTooLong {
            duration_ms: 9000,
            max_duration_ms: 7000,
        }]
    );
}

#[test]
fn test_validate_withInvertedTimes_shouldReportInvalidRange() {
    let validator = ReadabilityValidator::new(SubtitleConfig::default());
    let report = validator.validate_entry(&entry(1, 5000, 4000, "Backwards"));

    assert!(report.issues.contains(&ReadabilityIssue::InvalidTimeRange {
        start_ms: 5000,
        end_ms: 4000,
    }));
}

#[test]
fn test_validate_withGappedNumbering_shouldReportSequence() {
    let validator = ReadabilityValidator::new(SubtitleConfig::default());
    let report = validator.validate(&[entry(1, 0, 2000, "One"), entry(3, 3000, 5000, "Three")]);

    assert_eq!(
        report.entry_reports[1].issues,
        vec![ReadabilityIssue::UnexpectedSequence { expected: 2 }]
    );
}

#[test]
fn test_readabilityIssue_display_shouldDescribeProblem() {
    let issue = ReadabilityIssue::ReadingSpeedTooHigh { cps: 21.34, max_cps: 17.0 };
    assert_eq!(issue.to_string(), "Reading speed too high: 21.3 CPS (max: 17.0)");

    let issue = ReadabilityIssue::LineTooLong { line: 2, length: 50, max_length: 42 };
    assert_eq!(issue.to_string(), "Line 2 too long: 50 chars (max: 42)");
}
