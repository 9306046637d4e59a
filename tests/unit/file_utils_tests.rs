/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;

use resjson_sync::file_utils::{normalize_line_endings, FileManager};

use crate::common::{create_temp_dir, create_test_file};

/// Test file and directory existence checks
#[test]
fn test_exists_withFileAndDirectory_shouldDistinguishThem() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let file = create_test_file(temp_dir.path(), "main.resjson", "{}")?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::dir_exists(&file));
    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.resjson")));
    Ok(())
}

/// Test search by extension stays in the given directory
#[test]
fn test_find_files_withNestedFiles_shouldReturnFirstLevelMatches() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    create_test_file(temp_dir.path(), "b.resjson", "{}")?;
    create_test_file(temp_dir.path(), "a.resjson", "{}")?;
    create_test_file(temp_dir.path(), "notes.txt", "")?;
    create_test_file(temp_dir.path(), "nested/c.RESJSON", "{}")?;

    let files = FileManager::find_files(temp_dir.path(), "resjson")?;
    let names: Vec<String> = files.iter().filter_map(FileManager::file_name).collect();

    assert_eq!(names, vec!["a.resjson", "b.resjson"]);
    Ok(())
}

/// Test the extension comparison ignores case
#[test]
fn test_find_files_withUppercaseExtension_shouldMatch() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    create_test_file(temp_dir.path(), "c.RESJSON", "{}")?;

    let files = FileManager::find_files(temp_dir.path(), ".resjson")?;

    assert_eq!(files.len(), 1);
    Ok(())
}

/// Test listing only immediate subdirectories
#[test]
fn test_list_subdirectories_withNestedDirectories_shouldReturnFirstLevel() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    fs::create_dir_all(temp_dir.path().join("fi-FI/deeper"))?;
    fs::create_dir_all(temp_dir.path().join("de-DE"))?;
    create_test_file(temp_dir.path(), "readme.txt", "")?;

    let dirs = FileManager::list_subdirectories(temp_dir.path())?;
    let names: Vec<String> = dirs.iter().filter_map(FileManager::file_name).collect();

    assert_eq!(names, vec!["de-DE", "fi-FI"]);
    Ok(())
}

/// Test writing creates missing parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let path = temp_dir.path().join("strings/sv-SE/main.resjson");

    FileManager::write_to_file(&path, "{\"a\": \"b\"}")?;

    assert_eq!(FileManager::read_to_string(&path)?, "{\"a\": \"b\"}");
    assert_eq!(FileManager::file_stem(&path).as_deref(), Some("main"));
    Ok(())
}

/// Test reading a missing file is an error
#[test]
fn test_read_to_string_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    assert!(FileManager::read_to_string(temp_dir.path().join("nope.resjson")).is_err());
    Ok(())
}

/// Test line ending normalization
#[test]
fn test_normalize_line_endings_withMixedEndings_shouldUseLf() {
    assert_eq!(normalize_line_endings("a\r\nb\rc\nd"), "a\nb\nc\nd");
    assert_eq!(normalize_line_endings("plain"), "plain");
}
