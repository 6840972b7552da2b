/*!
 * Tests for file and directory utilities
 */

use std::fs;
use std::path::PathBuf;
use anyhow::Result;
use subcue::file_utils::FileManager;
use crate::common;

#[test]
fn test_generateOutputPath_shouldReplaceExtension() {
    let path = FileManager::generate_output_path("recordings/day1/talk.json", "out", "srt");
    assert_eq!(path, PathBuf::from("out/talk.srt"));

    let dotted = FileManager::generate_output_path("talk.json", "", ".srt");
    assert_eq!(dotted, PathBuf::from("talk.srt"));
}

#[test]
fn test_findFiles_withNestedDirectories_shouldFindSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("b");
    FileManager::ensure_dir(&nested)?;

    common::create_test_file(temp_dir.path(), "c.json", "{}")?;
    common::create_test_file(temp_dir.path(), "a.JSON", "{}")?;
    common::create_test_file(&nested, "inner.json", "{}")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "")?;

    let found = FileManager::find_files(temp_dir.path(), "json")?;
    let names: Vec<String> = found
        .iter()
        .map(|p| p.strip_prefix(temp_dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(names, vec!["a.JSON", "b/inner.json", "c.json"]);
    Ok(())
}

#[test]
fn test_ensureDir_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let deep = temp_dir.path().join("x").join("y").join("z");

    FileManager::ensure_dir(&deep)?;
    assert!(FileManager::dir_exists(&deep));
    assert!(!FileManager::file_exists(&deep));
    Ok(())
}

#[test]
fn test_appendToLogFile_shouldAppendTimestampedLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log_path = temp_dir.path().join("logs").join("run.log");

    FileManager::append_to_log_file(&log_path, "first")?;
    FileManager::append_to_log_file(&log_path, "second")?;

    let content = fs::read_to_string(&log_path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('[') && lines[0].ends_with("] first"));
    assert!(lines[1].ends_with("] second"));
    Ok(())
}

#[test]
fn test_readToString_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(FileManager::read_to_string(temp_dir.path().join("absent.txt")).is_err());
    Ok(())
}
