/*!
 * Tests for application configuration
 */

use anyhow::Result;
use subcue::app_config::{Config, LogLevel, SubtitleConfig, parse_delimiters};
use subcue::errors::ConfigError;
use crate::common;

#[test]
fn test_default_config_shouldUseReadabilityDefaults() {
    let config = SubtitleConfig::default();

    assert_eq!(config.gap_ms, 1200);
    assert_eq!(config.min_dur_ms, 1000);
    assert_eq!(config.max_dur_ms, 7000);
    assert_eq!(config.max_cps, 17.0);
    assert_eq!(config.max_cpl, 42);
    assert_eq!(config.max_lines, 2);
    assert_eq!(config.max_chars(), 84);
    assert!(config.line_split_delimiters.is_empty());
    assert!(!config.segment_on_sentence);
    assert!(!config.split_on_speaker);
    assert!(!config.ellipses);
}

#[test]
fn test_config_fromPartialJson_shouldFillDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(
        r#"{"subtitles": {"max_cps": 20.0, "line_split_delimiters": [",", "、"]}, "log_level": "debug"}"#,
    )?;

    assert_eq!(config.subtitles.max_cps, 20.0);
    assert_eq!(config.subtitles.line_split_delimiters, vec![',', '、']);
    assert_eq!(config.subtitles.gap_ms, 1200);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
    Ok(())
}

#[test]
fn test_config_saveThenLoad_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.subtitles.max_cpl = 37;
    config.subtitles.ellipses = true;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.subtitles, config.subtitles);
    Ok(())
}

#[test]
fn test_config_fromMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(Config::from_file(temp_dir.path().join("absent.json")).is_err());
    Ok(())
}

#[test]
fn test_validate_withZeroLineWidth_shouldRejectField() {
    let config = SubtitleConfig {
        max_cpl: 0,
        ..SubtitleConfig::default()
    };

    match config.validate() {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "max_cpl"),
        other => panic!("expected max_cpl to be rejected, got {:?}", other),
    }
}

#[test]
fn test_validate_withInvertedDurations_shouldFail() {
    let config = SubtitleConfig {
        min_dur_ms: 8000,
        ..SubtitleConfig::default()
    };
    assert!(config.validate().is_err());

    let mut full = Config::default();
    full.subtitles.max_cps = 0.0;
    assert!(full.validate().is_err());
}

#[test]
fn test_parseDelimiters_shouldDropWhitespace() {
    assert_eq!(parse_delimiters(", 、 ;"), vec![',', '、', ';']);
    let config = SubtitleConfig::default().with_delimiters("。\t,");
    assert_eq!(config.line_split_delimiters, vec!['。', ',']);
}
