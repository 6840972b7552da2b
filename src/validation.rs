/*!
 * Readability validation for rendered subtitle entries.
 *
 * This module checks finished entries against the configured bounds:
 * - Display duration (minimum and maximum)
 * - Reading speed in characters per second
 * - Characters per line and number of lines
 * - Ordering and time-range consistency between entries
 *
 * Single-token entries that cannot be split further are expected to show up
 * here; the report describes them, it does not reject them.
 */

use log::debug;

use crate::app_config::SubtitleConfig;
use crate::segmentation::punctuation::{ELLIPSIS, char_len, cps_char_count};
use crate::subtitle_processor::SubtitleEntry;

/// Types of readability issues
#[derive(Debug, Clone, PartialEq)]
pub enum ReadabilityIssue {
    /// End time is before start time
    InvalidTimeRange {
        start_ms: u64,
        end_ms: u64,
    },
    /// Starts before the previous entry
    OutOfOrder {
        prev_seq_num: usize,
    },
    /// Sequence number does not follow the previous one
    UnexpectedSequence {
        expected: usize,
    },
    /// Duration is too short
    DurationTooShort {
        duration_ms: u64,
        min_duration_ms: u64,
    },
    /// Duration is too long
    DurationTooLong {
        duration_ms: u64,
        max_duration_ms: u64,
    },
    /// Reading speed exceeds limit
    ReadingSpeedTooHigh {
        cps: f64,
        max_cps: f64,
    },
    /// A line is wider than allowed
    LineTooLong {
        line: usize,
        length: usize,
        max_length: usize,
    },
    /// More lines than allowed
    TooManyLines {
        count: usize,
        max_lines: usize,
    },
}

impl std::fmt::Display for ReadabilityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadabilityIssue::InvalidTimeRange { start_ms, end_ms } => {
                write!(f, "Invalid time range: start {}ms > end {}ms", start_ms, end_ms)
            }
            ReadabilityIssue::OutOfOrder { prev_seq_num } => {
                write!(f, "Starts before entry {}", prev_seq_num)
            }
            ReadabilityIssue::UnexpectedSequence { expected } => {
                write!(f, "Unexpected sequence number (expected {})", expected)
            }
            ReadabilityIssue::DurationTooShort { duration_ms, min_duration_ms } => {
                write!(f, "Duration too short: {}ms (min: {}ms)", duration_ms, min_duration_ms)
            }
            ReadabilityIssue::DurationTooLong { duration_ms, max_duration_ms } => {
                write!(f, "Duration too long: {}ms (max: {}ms)", duration_ms, max_duration_ms)
            }
            ReadabilityIssue::ReadingSpeedTooHigh { cps, max_cps } => {
                write!(f, "Reading speed too high: {:.1} CPS (max: {:.1})", cps, max_cps)
            }
            ReadabilityIssue::LineTooLong { line, length, max_length } => {
                write!(f, "Line {} too long: {} chars (max: {})", line, length, max_length)
            }
            ReadabilityIssue::TooManyLines { count, max_lines } => {
                write!(f, "Too many lines: {} (max: {})", count, max_lines)
            }
        }
    }
}

/// Result of validating a single entry
#[derive(Debug, Clone)]
pub struct EntryReport {
    /// Sequence number of the entry
    pub seq_num: usize,
    /// Issues found
    pub issues: Vec<ReadabilityIssue>,
}

impl EntryReport {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Result of validating a whole entry list
#[derive(Debug, Clone)]
pub struct ReadabilityReport {
    /// Results for each entry
    pub entry_reports: Vec<EntryReport>,
    /// Total number of issues
    pub total_issues: usize,
    /// Highest reading speed seen
    pub peak_cps: f64,
}

impl ReadabilityReport {
    pub fn passed(&self) -> bool {
        self.total_issues == 0
    }

    /// Get all failed entries
    pub fn failed_entries(&self) -> Vec<&EntryReport> {
        self.entry_reports.iter().filter(|r| !r.passed()).collect()
    }
}

/// Reading speed of an entry's text, markers excluded
pub fn entry_cps(entry: &SubtitleEntry) -> f64 {
    let text = entry.lines.concat().replace(ELLIPSIS, "");
    let duration = entry.duration_ms().max(1) as f64;
    cps_char_count(&text) as f64 / (duration / 1000.0)
}

/// Readability validator for rendered entries
pub struct ReadabilityValidator {
    config: SubtitleConfig,
}

impl ReadabilityValidator {
    pub fn new(config: SubtitleConfig) -> Self {
        Self { config }
    }

    /// Validate a single entry in isolation
    pub fn validate_entry(&self, entry: &SubtitleEntry) -> EntryReport {
        let mut issues = Vec::new();

        if entry.end_time_ms < entry.start_time_ms {
            issues.push(ReadabilityIssue::InvalidTimeRange {
                start_ms: entry.start_time_ms,
                end_ms: entry.end_time_ms,
            });
        }

        let duration_ms = entry.duration_ms();
        if duration_ms < self.config.min_dur_ms {
            issues.push(ReadabilityIssue::DurationTooShort {
                duration_ms,
                min_duration_ms: self.config.min_dur_ms,
            });
        }
        if duration_ms > self.config.max_dur_ms {
            issues.push(ReadabilityIssue::DurationTooLong {
                duration_ms,
                max_duration_ms: self.config.max_dur_ms,
            });
        }

        let cps = entry_cps(entry);
        if cps > self.config.max_cps {
            issues.push(ReadabilityIssue::ReadingSpeedTooHigh {
                cps,
                max_cps: self.config.max_cps,
            });
        }

        for (i, line) in entry.lines.iter().enumerate() {
            let length = char_len(line);
            if length > self.config.max_cpl {
                issues.push(ReadabilityIssue::LineTooLong {
                    line: i + 1,
                    length,
                    max_length: self.config.max_cpl,
                });
            }
        }

        if entry.lines.len() > self.config.max_lines {
            issues.push(ReadabilityIssue::TooManyLines {
                count: entry.lines.len(),
                max_lines: self.config.max_lines,
            });
        }

        EntryReport {
            seq_num: entry.seq_num,
            issues,
        }
    }

    /// Validate entries, including ordering between neighbors
    pub fn validate(&self, entries: &[SubtitleEntry]) -> ReadabilityReport {
        let mut entry_reports = Vec::with_capacity(entries.len());
        let mut peak_cps = 0.0f64;

        for (i, entry) in entries.iter().enumerate() {
            let mut report = self.validate_entry(entry);

            if entry.seq_num != i + 1 {
                report.issues.push(ReadabilityIssue::UnexpectedSequence { expected: i + 1 });
            }
            if let Some(prev) = i.checked_sub(1).map(|p| &entries[p]) {
                if entry.start_time_ms < prev.start_time_ms {
                    report.issues.push(ReadabilityIssue::OutOfOrder {
                        prev_seq_num: prev.seq_num,
                    });
                }
            }

            peak_cps = peak_cps.max(entry_cps(entry));
            entry_reports.push(report);
        }

        let total_issues = entry_reports.iter().map(|r| r.issues.len()).sum();
        debug!(
            "Readability validation: {} entries, {} issues, peak {:.1} CPS",
            entries.len(),
            total_issues,
            peak_cps
        );

        ReadabilityReport {
            entry_reports,
            total_issues,
            peak_cps,
        }
    }
}
