use anyhow::{Result, Context, anyhow};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::segmentation;
use crate::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use crate::transcript;
use crate::validation::{ReadabilityReport, ReadabilityValidator};

// @module: Application controller for transcript conversion

// @const: Folder summary log written next to the converted files
const FOLDER_LOG_FILE: &str = "subcue.issues.log";

/// Counts from a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for transcript to subtitle conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert one transcript file.
    ///
    /// Returns the written path, or `None` when the output already exists and
    /// `force_overwrite` is off.
    pub fn run(&self, input_file: &Path, output_file: Option<&Path>, force_overwrite: bool) -> Result<Option<PathBuf>> {
        let start_time = Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = match output_file {
            Some(path) => path.to_path_buf(),
            None => Self::default_output_path(input_file),
        };

        if output_path.exists() && !force_overwrite {
            warn!("Skipping {}, output already exists (use -f to force overwrite)", output_path.display());
            return Ok(None);
        }

        let tokens = transcript::load_tokens(input_file)
            .with_context(|| format!("Failed to load transcript: {}", input_file.display()))?;

        let entries = segmentation::generate_entries_strict(&tokens, &self.config.subtitles)
            .with_context(|| format!("No subtitles produced for {}", input_file.display()))?;

        let collection = SubtitleCollection {
            source_file: input_file.to_path_buf(),
            entries,
        };
        collection.write_to_srt(&output_path)?;

        let report = self.validate_entries(&collection.entries);
        Self::log_report(&report);

        info!(
            "Success: {} ({} entries in {})",
            output_path.display(),
            collection.entries.len(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(Some(output_path))
    }

    /// Convert every `*.json` transcript under a directory to a sibling `.srt`
    pub fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let transcripts = FileManager::find_files(input_dir, "json")?;
        if transcripts.is_empty() {
            return Err(anyhow!("No transcript files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(transcripts.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(style.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();

        for transcript_file in &transcripts {
            let file_name = transcript_file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            match self.run(transcript_file, None, force_overwrite) {
                Ok(Some(_)) => summary.converted += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        let summary_message = format!(
            "Folder processing completed: {} converted, {} skipped, {} errors",
            summary.converted, summary.skipped, summary.failed
        );
        info!("{}", summary_message);

        let log_file_path = input_dir.join(FOLDER_LOG_FILE);
        let log_line = format!(
            "{} - {} - Duration: {}",
            input_dir.display(),
            summary_message,
            Self::format_duration(start_time.elapsed())
        );
        if let Err(e) = FileManager::append_to_log_file(&log_file_path, &log_line) {
            warn!("Failed to write folder log: {}", e);
        }

        Ok(summary)
    }

    /// Parse an existing SRT file and check it against the configured bounds
    pub fn check(&self, srt_file: &Path) -> Result<ReadabilityReport> {
        let collection = SubtitleCollection::read_srt(srt_file)?;
        let report = self.validate_entries(&collection.entries);
        Self::log_report(&report);
        Ok(report)
    }

    fn validate_entries(&self, entries: &[SubtitleEntry]) -> ReadabilityReport {
        ReadabilityValidator::new(self.config.subtitles.clone()).validate(entries)
    }

    fn log_report(report: &ReadabilityReport) {
        if report.passed() {
            debug!("All entries within readability bounds (peak {:.1} CPS)", report.peak_cps);
            return;
        }

        warn!(
            "{} readability issue(s) in {} entries",
            report.total_issues,
            report.failed_entries().len()
        );
        for entry in report.failed_entries() {
            for issue in &entry.issues {
                debug!("  #{}: {}", entry.seq_num, issue);
            }
        }
    }

    /// Sibling `.srt` path for a transcript
    pub fn default_output_path(input_file: &Path) -> PathBuf {
        let output_dir = input_file.parent().unwrap_or_else(|| Path::new(""));
        FileManager::generate_output_path(input_file, output_dir, "srt")
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
