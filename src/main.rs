// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use subcue::app_config::{self, Config, SubtitleConfig, parse_delimiters};
use subcue::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert transcript JSON to SRT subtitles (default command)
    Convert(ConvertArgs),

    /// Check an existing SRT file against the readability bounds
    Check {
        /// SRT file to check
        #[arg(value_name = "SRT_FILE")]
        srt_file: PathBuf,

        /// Exit with an error when any issue is found
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        subtitles: SubtitleArgs,
    },

    /// Generate shell completions for subcue
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct ConvertArgs {
    /// Transcript JSON file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output SRT file (single input only; defaults to a sibling .srt)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    #[command(flatten)]
    subtitles: SubtitleArgs,
}

/// Overrides for the subtitle settings of the config file
#[derive(Args, Debug, Clone, Default)]
struct SubtitleArgs {
    /// Silence in ms that starts a new subtitle
    #[arg(long)]
    gap_ms: Option<u64>,

    /// Minimum display time in ms
    #[arg(long)]
    min_dur_ms: Option<u64>,

    /// Maximum display time in ms
    #[arg(long)]
    max_dur_ms: Option<u64>,

    /// Maximum reading speed in characters per second
    #[arg(long)]
    max_cps: Option<f64>,

    /// Maximum characters per line
    #[arg(long)]
    max_cpl: Option<usize>,

    /// Maximum lines per subtitle
    #[arg(long)]
    max_lines: Option<usize>,

    /// Preferred line break characters, e.g. ",、" (whitespace ignored)
    #[arg(long)]
    line_split_delimiters: Option<String>,

    /// Start a new subtitle after sentence-ending punctuation
    #[arg(long, overrides_with = "no_segment_on_sentence")]
    segment_on_sentence: bool,

    /// Only start new subtitles at pauses and speaker changes
    #[arg(long, overrides_with = "segment_on_sentence")]
    no_segment_on_sentence: bool,

    /// Start a new subtitle when the speaker changes
    #[arg(long)]
    split_on_speaker: bool,

    /// Mark subtitles split mid-sentence with an ellipsis
    #[arg(long)]
    ellipses: bool,
}

impl SubtitleArgs {
    // @applies: Command line values over the loaded settings
    fn apply(&self, config: &mut SubtitleConfig) {
        if let Some(gap_ms) = self.gap_ms {
            config.gap_ms = gap_ms;
        }
        if let Some(min_dur_ms) = self.min_dur_ms {
            config.min_dur_ms = min_dur_ms;
        }
        if let Some(max_dur_ms) = self.max_dur_ms {
            config.max_dur_ms = max_dur_ms;
        }
        if let Some(max_cps) = self.max_cps {
            config.max_cps = max_cps;
        }
        if let Some(max_cpl) = self.max_cpl {
            config.max_cpl = max_cpl;
        }
        if let Some(max_lines) = self.max_lines {
            config.max_lines = max_lines;
        }
        if let Some(delimiters) = &self.line_split_delimiters {
            config.line_split_delimiters = parse_delimiters(delimiters);
        }
        if self.segment_on_sentence {
            config.segment_on_sentence = true;
        }
        if self.no_segment_on_sentence {
            config.segment_on_sentence = false;
        }
        if self.split_on_speaker {
            config.split_on_speaker = true;
        }
        if self.ellipses {
            config.ellipses = true;
        }
    }
}

/// subcue - readable subtitles from speech recognition transcripts
///
/// Turns word-level ASR tokens into SRT subtitles that respect display time,
/// reading speed and line length limits.
#[derive(Parser, Debug)]
#[command(name = "subcue")]
#[command(version)]
#[command(about = "Readable SRT subtitles from ASR transcripts")]
#[command(long_about = "subcue turns token-level speech recognition transcripts into SRT subtitles.

EXAMPLES:
    subcue talk.json                               # Write talk.srt next to the transcript
    subcue convert talk.json -o out/talk.srt       # Explicit output path
    subcue --max-cps 20 --max-cpl 37 talk.json     # Override readability bounds
    subcue --line-split-delimiters ',、' ja.json    # Prefer line breaks after these characters
    subcue --segment-on-sentence talk.json         # One sentence per subtitle where possible
    subcue -f /transcripts/                        # Convert a whole directory, overwriting
    subcue check talk.srt                          # Report readability issues in an SRT file
    subcue completions bash > subcue.bash          # Generate bash completions

CONFIGURATION:
    Settings can be stored in a JSON file passed with --config. Command line
    flags override the file, and the file overrides the built-in defaults.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    convert: ConvertArgs,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SUBCUE_CONFIG")]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through
    // log::set_max_level once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subcue", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Check { srt_file, strict, subtitles }) => {
            let config = load_config(cli.config.as_deref(), cli.log_level, &subtitles)?;
            run_check(config, &srt_file, strict)
        }
        Some(Commands::Convert(args)) => {
            let config = load_config(cli.config.as_deref(), cli.log_level, &args.subtitles)?;
            run_convert(config, args)
        }
        None => {
            // Default behavior: top-level args are convert args
            let config = load_config(cli.config.as_deref(), cli.log_level, &cli.convert.subtitles)?;
            run_convert(config, cli.convert)
        }
    }
}

/// Defaults, then the config file, then command line flags
fn load_config(config_path: Option<&Path>, log_level: Option<CliLogLevel>, overrides: &SubtitleArgs) -> Result<Config> {
    let mut config = match config_path {
        Some(path) if path.exists() => Config::from_file(path)?,
        Some(path) => {
            warn!("Config file not found at '{}', creating default config.", path.display());
            let config = Config::default();
            config.save(path)
                .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;
            config
        }
        None => Config::default(),
    };

    if let Some(level) = log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    overrides.apply(&mut config.subtitles);

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn run_convert(config: Config, options: ConvertArgs) -> Result<()> {
    let input_path = options.input_path.ok_or_else(|| {
        anyhow!("INPUT_PATH is required when no subcommand is specified")
    })?;

    let controller = Controller::with_config(config)?;

    if input_path.is_file() {
        controller.run(&input_path, options.output.as_deref(), options.force_overwrite)?;
    } else if input_path.is_dir() {
        if options.output.is_some() {
            warn!("--output is ignored for directories, subtitles are written next to each transcript");
        }
        let summary = controller.run_folder(&input_path, options.force_overwrite)?;
        if summary.failed > 0 {
            return Err(anyhow!("{} transcript(s) failed to convert", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}

fn run_check(config: Config, srt_file: &Path, strict: bool) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let report = controller.check(srt_file)?;

    let mut stdout = std::io::stdout();
    for entry in report.failed_entries() {
        for issue in &entry.issues {
            writeln!(stdout, "#{}: {}", entry.seq_num, issue)?;
        }
    }
    writeln!(
        stdout,
        "{} entries checked, {} issue(s), peak reading speed {:.1} CPS",
        report.entry_reports.len(),
        report.total_issues,
        report.peak_cps
    )?;

    if report.passed() {
        info!("No readability issues in {}", srt_file.display());
    } else if strict {
        return Err(anyhow!("{} readability issue(s) found", report.total_issues));
    }

    Ok(())
}
