// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Action tree nodes.
//!
//! An [`Action`] is keyed by a [`WordPattern`] and carries up to three
//! handlers plus an ordered list of child actions for the following word.
//!
//! ```
//! use omnimatch::{Action, Suggestion, WordPattern};
//!
//! let lookup = Action::any()
//!     .named("define")
//!     .on_match(|word, _rest, session| {
//!         session.set("word", word);
//!         Ok(())
//!     })
//!     .suggest(|word, _rest, _session| {
//!         Ok(vec![Suggestion::new(word, format!("Look up {}", word))])
//!     })
//!     .child(Action::new(WordPattern::prefix_of("synonym")).named("thesaurus"));
//!
//! assert_eq!(lookup.children().len(), 1);
//! ```

use anyhow::Result;
use std::fmt;

use crate::pattern::WordPattern;
use crate::session::Session;
use crate::types::Suggestion;

/// Runs when the action matches: (token, remaining tokens, session).
pub type MatchHandler = Box<dyn Fn(&str, &[String], &mut Session<'_>) -> Result<()>>;

/// Produces suggestions when the action matches: (token, remaining tokens, session).
pub type SuggestHandler = Box<dyn Fn(&str, &[String], &Session<'_>) -> Result<Vec<Suggestion>>>;

/// Runs on submit when this action is the deepest match.
pub type CommitHandler = Box<dyn Fn(&Session<'_>) -> Result<()>>;

/// A node in the action tree.
pub struct Action {
    name: Option<String>,
    pattern: WordPattern,
    on_match: Option<MatchHandler>,
    suggest: Option<SuggestHandler>,
    on_commit: Option<CommitHandler>,
    children: Vec<Action>,
}

impl Action {
    /// Create an action with no handlers and no children.
    pub fn new(pattern: impl Into<WordPattern>) -> Self {
        Self {
            name: None,
            pattern: pattern.into(),
            on_match: None,
            suggest: None,
            on_commit: None,
            children: Vec::new(),
        }
    }

    /// Action matching one literal word (case-insensitive).
    pub fn literal(word: impl Into<String>) -> Self {
        Self::new(WordPattern::Literal(word.into()))
    }

    /// Fallback action matching any word. Declare it last among siblings.
    pub fn any() -> Self {
        Self::new(WordPattern::Wildcard)
    }

    /// Label used in logs and parse summaries.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn on_match<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str, &[String], &mut Session<'_>) -> Result<()> + 'static,
    {
        self.on_match = Some(Box::new(handler));
        self
    }

    pub fn suggest<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str, &[String], &Session<'_>) -> Result<Vec<Suggestion>> + 'static,
    {
        self.suggest = Some(Box::new(handler));
        self
    }

    pub fn on_commit<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Session<'_>) -> Result<()> + 'static,
    {
        self.on_commit = Some(Box::new(handler));
        self
    }

    /// Append one child action.
    pub fn child(mut self, action: Action) -> Self {
        self.children.push(action);
        self
    }

    /// Append several child actions, keeping their order.
    pub fn children_from(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.children.extend(actions);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn pattern(&self) -> &WordPattern {
        &self.pattern
    }

    pub fn children(&self) -> &[Action] {
        &self.children
    }

    pub fn has_commit(&self) -> bool {
        self.on_commit.is_some()
    }

    /// Name if set, otherwise the pattern.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.pattern.to_string(),
        }
    }

    pub(crate) fn run_match(&self, token: &str, rest: &[String], session: &mut Session<'_>) -> Result<()> {
        match &self.on_match {
            Some(handler) => handler(token, rest, session),
            None => Ok(()),
        }
    }

    pub(crate) fn run_suggest(
        &self,
        token: &str,
        rest: &[String],
        session: &Session<'_>,
    ) -> Result<Option<Vec<Suggestion>>> {
        match &self.suggest {
            Some(handler) => handler(token, rest, session).map(Some),
            None => Ok(None),
        }
    }

    /// Run the commit handler. Returns `false` if the action has none.
    pub(crate) fn run_commit(&self, session: &Session<'_>) -> Result<bool> {
        match &self.on_commit {
            Some(handler) => handler(session).map(|_| true),
            None => Ok(false),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("on_match", &self.on_match.is_some())
            .field("suggest", &self.suggest.is_some())
            .field("on_commit", &self.on_commit.is_some())
            .field("children", &self.children)
            .finish()
    }
}
