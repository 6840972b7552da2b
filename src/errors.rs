/*!
 * Error types for the subcue application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * The segmentation engine itself never fails: oversized segments and lines are
 * accepted and logged. Errors only arise at the edges (loading transcripts,
 * validating configuration, writing files, or a transcript producing nothing).
 */

use thiserror::Error;

/// Errors that can occur while reading a transcript
#[derive(Error, Debug)]
pub enum TranscriptError {
    /// The transcript has no token list, or the field is not a list
    #[error("No tokens found in transcript")]
    MissingTokens,

    /// The token list is present but empty
    #[error("Transcript token list is empty")]
    EmptyTokens,

    /// A token record could not be decoded
    #[error("Invalid token at position {index}: {message}")]
    InvalidToken {
        /// Position of the token in the flattened list
        index: usize,
        /// Decoder message
        message: String,
    },

    /// The transcript is not valid JSON
    #[error("Failed to parse transcript JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The transcript file could not be read
    #[error("Failed to read transcript: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when turning tokens into subtitles
#[derive(Error, Debug)]
pub enum SegmentationError {
    /// Valid input collapsed to zero segments (e.g. whitespace only)
    #[error("No subtitle segments were produced from the tokens")]
    NoSegments,
}

/// Errors in user supplied configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A field holds a value the engine cannot work with
    #[error("Invalid configuration value for {field}: {message}")]
    Invalid {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        message: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from transcript loading
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// Error from segmentation
    #[error("Segmentation error: {0}")]
    Segmentation(#[from] SegmentationError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
