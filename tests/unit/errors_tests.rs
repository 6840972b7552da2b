/*!
 * Tests for error types and conversions
 */

use subcue::errors::{AppError, ConfigError, SegmentationError, TranscriptError};

#[test]
fn test_transcriptError_missingTokens_shouldDisplayCorrectly() {
    let error = TranscriptError::MissingTokens;
    assert_eq!(error.to_string(), "No tokens found in transcript");
}

#[test]
fn test_transcriptError_invalidToken_shouldDisplayPosition() {
    let error = TranscriptError::InvalidToken {
        index: 3,
        message: "invalid type".to_string(),
    };
    let display = error.to_string();
    assert!(display.contains("position 3"));
    assert!(display.contains("invalid type"));
}

#[test]
fn test_configError_invalid_shouldNameField() {
    let error = ConfigError::Invalid {
        field: "max_lines",
        message: "must be at least 1".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Invalid configuration value for max_lines: must be at least 1"
    );
}

#[test]
fn test_appError_fromTranscriptError_shouldWrap() {
    let error: AppError = TranscriptError::EmptyTokens.into();
    assert!(matches!(error, AppError::Transcript(TranscriptError::EmptyTokens)));
    assert_eq!(error.to_string(), "Transcript error: Transcript token list is empty");
}

#[test]
fn test_appError_fromSegmentationError_shouldWrap() {
    let error: AppError = SegmentationError::NoSegments.into();
    assert!(error.to_string().starts_with("Segmentation error:"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(ref msg) if msg.contains("missing.json")));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(error, AppError::Unknown(ref msg) if msg == "something odd"));
}
