// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Word patterns and the word matcher.
//!
//! Every action is keyed by a [`WordPattern`]. Matching a token is a single
//! exhaustive `match` over the pattern kind.

use anyhow::{Context, Result};
use regex::Regex;
use std::fmt;

use crate::types::MatcherState;

/// Predicate used by [`WordPattern::Predicate`].
///
/// Receives the token and the matcher-level state. Errors propagate out of
/// the parse that invoked it.
pub type Predicate = Box<dyn Fn(&str, &MatcherState) -> Result<bool>>;

/// What a single token must look like for an action to match.
pub enum WordPattern {
    /// Case-insensitive equality
    Literal(String),
    /// Arbitrary test
    Predicate(Predicate),
    /// Regular expression (unanchored unless the expression anchors itself)
    Regex(Regex),
    /// Matches any token, including an empty one
    Wildcard,
}

impl WordPattern {
    pub fn literal(word: impl Into<String>) -> Self {
        Self::Literal(word.into())
    }

    /// Compile a regular expression pattern.
    pub fn regex(expr: &str) -> Result<Self> {
        let re = Regex::new(expr).with_context(|| format!("Invalid word pattern /{}/", expr))?;
        Ok(Self::Regex(re))
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str, &MatcherState) -> Result<bool> + 'static,
    {
        Self::Predicate(Box::new(f))
    }

    /// Pattern matching any token that is a case-insensitive prefix of `word`.
    ///
    /// `prefix_of("synonym")` accepts "syn", "SYNO" and "synonym", but not
    /// "synonyms".
    pub fn prefix_of(word: &str) -> Self {
        let word = word.to_lowercase();
        Self::predicate(move |token, _| Ok(word.starts_with(&token.to_lowercase())))
    }

    /// Test a token against this pattern.
    ///
    /// An absent token never matches, whatever the pattern.
    pub fn matches(&self, token: Option<&str>, state: &MatcherState) -> Result<bool> {
        let Some(token) = token else {
            return Ok(false);
        };

        match self {
            Self::Wildcard => Ok(true),
            Self::Literal(word) => Ok(token.to_lowercase() == word.to_lowercase()),
            Self::Predicate(test) => test(token, state),
            Self::Regex(re) => Ok(re.is_match(token)),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

impl From<&str> for WordPattern {
    fn from(word: &str) -> Self {
        Self::literal(word)
    }
}

impl From<String> for WordPattern {
    fn from(word: String) -> Self {
        Self::Literal(word)
    }
}

impl From<Regex> for WordPattern {
    fn from(re: Regex) -> Self {
        Self::Regex(re)
    }
}

impl fmt::Display for WordPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(word) => write!(f, "{}", word),
            Self::Predicate(_) => write!(f, "<predicate>"),
            Self::Regex(re) => write!(f, "/{}/", re.as_str()),
            Self::Wildcard => write!(f, "*"),
        }
    }
}

impl fmt::Debug for WordPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(word) => f.debug_tuple("Literal").field(word).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Regex(re) => f.debug_tuple("Regex").field(&re.as_str()).finish(),
            Self::Wildcard => f.write_str("Wildcard"),
        }
    }
}
