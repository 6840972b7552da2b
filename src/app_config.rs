use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Subtitle segmentation and layout settings
    #[serde(default)]
    pub subtitles: SubtitleConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings that decide where subtitle boundaries fall in time and text
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubtitleConfig {
    // @field: Silence (ms) between words that closes a segment
    #[serde(default = "default_gap_ms")]
    pub gap_ms: u64,

    // @field: Segments shorter than this are merged into their right neighbor
    #[serde(default = "default_min_dur_ms")]
    pub min_dur_ms: u64,

    // @field: Segments longer than this are split
    #[serde(default = "default_max_dur_ms")]
    pub max_dur_ms: u64,

    // @field: Max reading speed, non-space chars per second
    #[serde(default = "default_max_cps")]
    pub max_cps: f64,

    // @field: Max characters per line
    #[serde(default = "default_max_cpl")]
    pub max_cpl: usize,

    // @field: Max lines per entry
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    // @field: Preferred line-break characters, in priority order
    #[serde(default)]
    pub line_split_delimiters: Vec<char>,

    // @field: Close segments at sentence-ending punctuation without a gap
    #[serde(default)]
    pub segment_on_sentence: bool,

    // @field: Close segments when the speaker changes
    #[serde(default)]
    pub split_on_speaker: bool,

    // @field: Mark forced splits with an ellipsis
    #[serde(default)]
    pub ellipses: bool,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            gap_ms: default_gap_ms(),
            min_dur_ms: default_min_dur_ms(),
            max_dur_ms: default_max_dur_ms(),
            max_cps: default_max_cps(),
            max_cpl: default_max_cpl(),
            max_lines: default_max_lines(),
            line_split_delimiters: Vec::new(),
            segment_on_sentence: false,
            split_on_speaker: false,
            ellipses: false,
        }
    }
}

impl SubtitleConfig {
    /// Character cap applied by the split pass: one full entry of lines
    pub fn max_chars(&self) -> usize {
        self.max_cpl.saturating_mul(self.max_lines)
    }

    /// Set the preferred delimiters from a string, ignoring whitespace
    pub fn with_delimiters(mut self, delimiters: &str) -> Self {
        self.line_split_delimiters = parse_delimiters(delimiters);
        self
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.max_cpl == 0 {
            return Err(ConfigError::Invalid {
                field: "max_cpl",
                message: "must be at least 1".to_string(),
            });
        }
        if self.max_lines == 0 {
            return Err(ConfigError::Invalid {
                field: "max_lines",
                message: "must be at least 1".to_string(),
            });
        }
        if !(self.max_cps.is_finite() && self.max_cps > 0.0) {
            return Err(ConfigError::Invalid {
                field: "max_cps",
                message: format!("must be a positive number, got {}", self.max_cps),
            });
        }
        if self.max_dur_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "max_dur_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.min_dur_ms > self.max_dur_ms {
            return Err(ConfigError::Invalid {
                field: "min_dur_ms",
                message: format!(
                    "{}ms exceeds max_dur_ms {}ms",
                    self.min_dur_ms, self.max_dur_ms
                ),
            });
        }
        Ok(())
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Split a delimiter string into characters, dropping whitespace
pub fn parse_delimiters(delimiters: &str) -> Vec<char> {
    delimiters.chars().filter(|c| !c.is_whitespace()).collect()
}

fn default_gap_ms() -> u64 {
    1200
}

fn default_min_dur_ms() -> u64 {
    1000
}

fn default_max_dur_ms() -> u64 {
    7000
}

fn default_max_cps() -> f64 {
    17.0
}

fn default_max_cpl() -> usize {
    42
}

fn default_max_lines() -> usize {
    2
}

impl Config {
    /// Load a configuration file in JSON format
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.subtitles.validate()?;
        Ok(())
    }
}
