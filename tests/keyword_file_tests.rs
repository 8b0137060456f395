// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Tests for declarative keyword files loaded from disk.

use std::fs;

use omnimatch::{load_keywords, load_omnibox, save_keywords, Disposition, KeywordFile, RecordingHost};
use tempfile::tempdir;

const SEARCH_KEYWORDS: &str = r#"{
  "default_suggestion": { "content": "search", "description": "Search the web" },
  "keywords": [
    {
      "name": "issue",
      "pattern": { "regex": "^#?\\d+$" },
      "capture": "number",
      "suggestions": [{ "content": "{token}", "description": "Open issue {number}" }],
      "commit": { "open": "https://tracker.example/issues/{number}" }
    },
    {
      "name": "wiki",
      "pattern": { "prefix": "wiki" },
      "suggestions": [{ "content": "wiki {rest}", "description": "Search the wiki" }],
      "children": [
        {
          "name": "wiki-term",
          "pattern": "any",
          "capture": "term",
          "suggestions": [{ "content": "wiki {term}", "description": "Wiki page for <match>{term}</match>" }],
          "commit": { "open": "https://wiki.example/{term}" }
        }
      ]
    }
  ]
}"#;

#[test]
fn test_load_and_suggest_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("keywords.json");
    fs::write(&path, SEARCH_KEYWORDS)?;

    let mut omnibox = load_omnibox(Some(&path))?;

    let s = omnibox.input("42")?;
    assert_eq!(s[0].content, "suggest 1:42");
    assert_eq!(s[0].description, "Open issue 42");
    assert_eq!(s.last().map(|d| d.content.as_str()), Some("search"));

    let s = omnibox.input("wi rust lang")?;
    assert_eq!(s[0].content, "suggest 1:wiki rust");
    assert_eq!(s[1].content, "suggest 2:wiki rust lang");

    Ok(())
}

#[test]
fn test_commit_opens_encoded_url() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("keywords.json");
    fs::write(&path, SEARCH_KEYWORDS)?;

    let mut omnibox = load_omnibox(Some(&path))?;
    let host = RecordingHost::default();

    omnibox.submit("wiki C++", Disposition::NewForegroundTab, &host)?;
    omnibox.submit("#7", Disposition::CurrentTab, &host)?;

    let opened = host.opened();
    assert_eq!(opened[0].0, "https://wiki.example/C%2B%2B");
    assert_eq!(opened[0].1, Disposition::NewForegroundTab);
    assert_eq!(opened[1].0, "https://tracker.example/issues/%237");

    Ok(())
}

#[test]
fn test_init_then_reload_builtin() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("keywords.json");

    save_keywords(&path, &KeywordFile::builtin())?;
    let written = fs::read_to_string(&path)?;
    assert!(written.contains("merriam-webster.com/dictionary/{word}"));

    let loaded = load_keywords(Some(&path))?;
    assert_eq!(loaded, KeywordFile::builtin());
    Ok(())
}

#[test]
fn test_invalid_regex_fails_to_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("keywords.json");
    fs::write(&path, r#"{"keywords":[{"name":"bad","pattern":{"regex":"[z-a]"}}]}"#).unwrap();

    let err = load_omnibox(Some(&path)).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("bad"), "{}", message);
}

#[test]
fn test_commit_token_is_word_of_deepest_match() -> Result<(), Box<dyn std::error::Error>> {
    let file = KeywordFile::from_json(
        r#"{"keywords":[{
            "name": "define",
            "pattern": "any",
            "commit": { "open": "https://dict.example/{token}" },
            "children": [{ "pattern": { "literal": "syn" } }]
        }]}"#,
    )?;
    let mut omnibox = omnimatch::Omnibox::new(file.build()?);
    let host = RecordingHost::default();

    omnibox.submit("cat zz", Disposition::CurrentTab, &host)?;
    omnibox.submit("cat", Disposition::CurrentTab, &host)?;

    let urls: Vec<String> = host.opened().into_iter().map(|(url, _, _)| url).collect();
    assert_eq!(urls, vec!["https://dict.example/cat", "https://dict.example/cat"]);
    Ok(())
}
