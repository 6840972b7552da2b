use std::fs;
use std::fs::File;
use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::{Result, Context, anyhow};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use log::{warn, debug, info};

use crate::app_config::SubtitleConfig;
use crate::segmentation;
use crate::transcript::Token;

// @module: Subtitle entries and SRT reading/writing

// @const: SRT timestamp regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2,}):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d{2,}):(\d{2}):(\d{2})[,.](\d{3})")
        .expect("timestamp pattern is valid")
});

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Sequence number, 1-based
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Display lines
    pub lines: Vec<String>,
}

impl SubtitleEntry {
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, lines: Vec<String>) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            lines,
        }
    }

    /// All lines joined by a single space
    pub fn text(&self) -> String {
        self.lines.join(" ")
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_time_ms.saturating_sub(self.start_time_ms)
    }

    /// Parse an SRT timestamp to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
        // Parse HH:MM:SS,mmm format
        let parts: Vec<&str> = timestamp.trim().split(&[':', ',', '.'][..]).collect();

        if parts.len() != 4 {
            return Err(anyhow!("Invalid timestamp format: {}", timestamp));
        }

        let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
        let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
        let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
        let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

        // Validate time components
        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
        }

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

/// Collection of subtitle entries with metadata
#[derive(Debug)]
pub struct SubtitleCollection {
    /// Transcript or subtitle file the entries came from
    pub source_file: PathBuf,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create a new subtitle collection
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Segment and lay out recognizer tokens
    pub fn from_tokens(source_file: PathBuf, tokens: &[Token], config: &SubtitleConfig) -> Self {
        SubtitleCollection {
            source_file,
            entries: segmentation::generate_entries(tokens, config),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the whole collection as SRT text
    pub fn to_srt_string(&self) -> String {
        self.entries.iter().map(|entry| entry.to_string()).collect()
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        for entry in &self.entries {
            write!(writer, "{}", entry)?;
        }
        writer.flush()?;

        info!("Wrote {} subtitles to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Read an SRT file from disk
    pub fn read_srt<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;
        Ok(SubtitleCollection {
            source_file: path.to_path_buf(),
            entries: Self::parse_srt_string(&content)?,
        })
    }

    /// Parse SRT format string into subtitle entries
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>> {
        let mut entries = Vec::new();

        // State variables for parsing
        let mut current_seq_num: Option<usize> = None;
        let mut current_times: Option<(u64, u64)> = None;
        let mut current_lines: Vec<String> = Vec::new();

        let mut finish = |seq_num: usize, (start_ms, end_ms): (u64, u64), lines: &mut Vec<String>| {
            if lines.is_empty() {
                warn!("Skipping empty subtitle entry {}", seq_num);
            } else {
                entries.push(SubtitleEntry::new(seq_num, start_ms, end_ms, std::mem::take(lines)));
            }
        };

        for (line_no, line) in content.lines().enumerate() {
            let trimmed = line.trim().trim_start_matches('\u{feff}');

            if trimmed.is_empty() {
                if let (Some(seq_num), Some(times)) = (current_seq_num, current_times) {
                    finish(seq_num, times, &mut current_lines);
                    current_seq_num = None;
                    current_times = None;
                }
                continue;
            }

            // Try to parse as sequence number (only if we're starting a new entry)
            if current_seq_num.is_none() {
                if let Ok(num) = trimmed.parse::<usize>() {
                    current_seq_num = Some(num);
                    continue;
                }
            }

            // Try to parse as timestamp
            if current_seq_num.is_some() && current_times.is_none() {
                if let Some(caps) = TIMESTAMP_REGEX.captures(trimmed) {
                    current_times = Some((
                        Self::parse_timestamp_to_ms(&caps, 1),
                        Self::parse_timestamp_to_ms(&caps, 5),
                    ));
                    continue;
                }
            }

            if current_seq_num.is_some() && current_times.is_some() {
                current_lines.push(trimmed.to_string());
            } else {
                warn!("Unexpected text at line {} before sequence number or timestamp: {}", line_no + 1, trimmed);
            }
        }

        // Add the last entry if there is one
        if let (Some(seq_num), Some(times)) = (current_seq_num, current_times) {
            finish(seq_num, times, &mut current_lines);
        }

        if entries.is_empty() {
            return Err(anyhow!("No valid subtitle entries were found in the SRT content"));
        }

        // Renumber entries to ensure sequential order
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.seq_num = i + 1;
        }

        debug!("Parsed {} subtitle entries", entries.len());
        Ok(entries)
    }

    /// Parse timestamp to milliseconds
    fn parse_timestamp_to_ms(caps: &regex::Captures, start_idx: usize) -> u64 {
        let field = |offset: usize| -> u64 {
            caps.get(start_idx + offset)
                .map_or(0, |m| m.as_str().parse().unwrap_or(0))
        };

        (field(0) * 3600 + field(1) * 60 + field(2)) * 1000 + field(3)
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
