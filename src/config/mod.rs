// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Configuration loading for omnimatch.
//!
//! Keyword trees live in `~/.omnimatch/keywords.json`. When the file does not
//! exist the built-in dictionary tree is used instead, so a fresh install
//! works without any setup.
//!
//! - [`keywords`] - JSON schema of a keyword tree and how it becomes actions
//! - [`template`] - `{placeholder}` rendering used by keyword suggestions and commits

pub mod keywords;
pub mod template;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub use keywords::{CommitSpec, KeywordFile, KeywordSpec, PatternSpec};

use crate::omnibox::Omnibox;

/// Directory name under the user's home directory.
pub const CONFIG_DIR_NAME: &str = ".omnimatch";

/// Keyword file name inside the config directory.
pub const KEYWORDS_FILE: &str = "keywords.json";

/// Config directory, created on first use.
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    let config_dir = home.join(CONFIG_DIR_NAME);
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create {}", config_dir.display()))?;
    }
    Ok(config_dir)
}

/// Default location of the keyword file.
pub fn keywords_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(KEYWORDS_FILE))
}

/// Load a keyword file.
///
/// An explicit `path` must exist. Without one, the default location is tried
/// and the built-in tree is returned if nothing is there.
pub fn load_keywords(path: Option<&Path>) -> Result<KeywordFile> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (keywords_path()?, false),
    };

    if !path.exists() {
        if explicit {
            anyhow::bail!("Keyword file {} does not exist", path.display());
        }
        tracing::debug!("No keyword file at {}, using built-in keywords", path.display());
        return Ok(KeywordFile::builtin());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    KeywordFile::from_json(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write a keyword file as pretty JSON, creating parent directories.
pub fn save_keywords(path: &Path, file: &KeywordFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    let content = file.to_json_pretty()?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Load keywords and build a ready matcher.
pub fn load_omnibox(path: Option<&Path>) -> Result<Omnibox> {
    let file = load_keywords(path)?;
    Ok(Omnibox::new(file.build()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(load_keywords(Some(&missing)).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(KEYWORDS_FILE);

        save_keywords(&path, &KeywordFile::builtin()).unwrap();
        let loaded = load_keywords(Some(&path)).unwrap();
        assert_eq!(loaded, KeywordFile::builtin());
    }

    #[test]
    fn test_bad_json_mentions_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(KEYWORDS_FILE);
        fs::write(&path, "{ not json").unwrap();

        let err = load_keywords(Some(&path)).unwrap_err();
        assert!(err.to_string().contains(KEYWORDS_FILE));
    }
}
