/*!
 * Common test utilities for the subcue test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use serde_json::json;
use tempfile::TempDir;

use subcue::transcript::Token;

/// Routes library logs through env_logger; set RUST_LOG to see them
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Evenly spaced word tokens, each opening with a space, back to back
pub fn spaced_words(words: &[&str], start_ms: u64, step_ms: u64) -> Vec<Token> {
    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let start = start_ms + i as u64 * step_ms;
            Token::new(format!(" {}", word), start, start + step_ms)
        })
        .collect()
}

/// `count` copies of " word", `step_ms` apart
pub fn repeated_word(count: usize, step_ms: u64) -> Vec<Token> {
    spaced_words(&vec!["word"; count], 0, step_ms)
}

/// Serialize tokens as a flat transcript document
pub fn transcript_json(tokens: &[Token]) -> String {
    json!({ "tokens": tokens }).to_string()
}

/// Writes a transcript JSON file holding the given tokens
pub fn create_test_transcript(dir: &Path, filename: &str, tokens: &[Token]) -> Result<PathBuf> {
    create_test_file(dir, filename, &transcript_json(tokens))
}

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r#"1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
"#;
    create_test_file(dir, filename, content)
}
