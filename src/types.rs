// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Canonical types used across omnimatch.
//!
//! This module provides unified type definitions to avoid duplication.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::tokenize::marker;

/// One candidate completion shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Text placed into the input box when the suggestion is picked.
    pub content: String,
    /// Human readable description (may carry host markup such as `<match>`).
    pub description: String,
}

impl Suggestion {
    pub fn new(content: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            description: description.into(),
        }
    }

    /// Copy of this suggestion with the positional `suggest N:` marker
    /// prepended to its content.
    pub fn labeled(&self, position: usize) -> Self {
        Self {
            content: format!("{}{}", marker(position), self.content),
            description: self.description.clone(),
        }
    }
}

/// Opaque identifier of the host's active context (e.g. the current tab).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextId(pub i64);

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the host should show the result of a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Disposition {
    /// Replace the active context
    #[default]
    CurrentTab,
    /// Open in a new context and focus it
    NewForegroundTab,
    /// Open in a new context without focusing it
    NewBackgroundTab,
}

impl Disposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentTab => "currentTab",
            Self::NewForegroundTab => "newForegroundTab",
            Self::NewBackgroundTab => "newBackgroundTab",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Disposition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "currenttab" | "current" => Ok(Self::CurrentTab),
            "newforegroundtab" | "foreground" => Ok(Self::NewForegroundTab),
            "newbackgroundtab" | "background" => Ok(Self::NewBackgroundTab),
            other => Err(format!(
                "unknown disposition '{}' (expected current, foreground or background)",
                other
            )),
        }
    }
}

/// Matcher-level state visible to predicates and handlers.
///
/// Overwritten wholesale by host events; the last writer wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatcherState {
    /// Trimmed text of the most recent `input` call
    pub last_input: String,
    /// Context recorded when the host last started an input session
    pub active_context: Option<ContextId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_labeled() {
        let s = Suggestion::new("help", "Open help");
        let labeled = s.labeled(2);
        assert_eq!(labeled.content, "suggest 2:help");
        assert_eq!(labeled.description, "Open help");
        // Original is untouched
        assert_eq!(s.content, "help");
    }

    #[test]
    fn test_disposition_parse() {
        assert_eq!("current".parse::<Disposition>(), Ok(Disposition::CurrentTab));
        assert_eq!(
            "newBackgroundTab".parse::<Disposition>(),
            Ok(Disposition::NewBackgroundTab)
        );
        assert!("sideways".parse::<Disposition>().is_err());
    }

    #[test]
    fn test_disposition_serde_uses_host_names() {
        let json = serde_json::to_string(&Disposition::NewForegroundTab).unwrap();
        assert_eq!(json, "\"newForegroundTab\"");
    }
}
