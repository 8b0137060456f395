// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! The matcher instance and its two entry points.
//!
//! - [`Omnibox::input`] re-parses the text from scratch on every change and
//!   returns labeled suggestions.
//! - [`Omnibox::submit`] parses the same way and then runs the commit handler
//!   of the deepest matched action.
//!
//! ## Example
//!
//! ```
//! use omnimatch::{Action, Disposition, Omnibox, OmniboxConfig, RecordingHost, Suggestion};
//!
//! let mut omnibox = Omnibox::new(OmniboxConfig {
//!     actions: vec![Action::literal("help")
//!         .suggest(|_, _, _| Ok(vec![Suggestion::new("help", "Open the help page")]))
//!         .on_commit(|session| {
//!             if let Some(host) = session.host() {
//!                 host.notify("help requested")?;
//!             }
//!             Ok(())
//!         })],
//!     default_suggestion: None,
//! });
//!
//! let suggestions = omnibox.input("HELP")?;
//! assert_eq!(suggestions[0].content, "suggest 1:help");
//!
//! let host = RecordingHost::default();
//! omnibox.submit("help", Disposition::CurrentTab, &host)?;
//! assert_eq!(host.messages(), vec!["help requested".to_string()]);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;

use crate::action::Action;
use crate::engine;
use crate::host::{Host, HostEvent};
use crate::session::ParseSummary;
use crate::tokenize::tokenize;
use crate::types::{ContextId, Disposition, MatcherState, Suggestion};

/// Static configuration supplied at construction.
#[derive(Debug, Default)]
pub struct OmniboxConfig {
    /// Root-level actions, tried in order against the first word
    pub actions: Vec<Action>,
    /// Appended after every suggestion list when set
    pub default_suggestion: Option<Suggestion>,
}

/// Result of [`Omnibox::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The deepest matched action's commit handler ran
    Committed(String),
    /// An action matched but has no commit handler
    NoCommitHandler(String),
    /// Nothing matched (including empty input)
    NoMatch,
}

impl SubmitOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// Keyword matcher bound to one action tree.
#[derive(Debug)]
pub struct Omnibox {
    actions: Vec<Action>,
    default_suggestion: Option<Suggestion>,
    state: MatcherState,
    last_parse: Option<ParseSummary>,
}

impl Omnibox {
    pub fn new(config: OmniboxConfig) -> Self {
        if config.actions.is_empty() {
            tracing::warn!("Omnibox created without any actions; every input will be unmatched");
        }
        for label in shadowed_by_wildcard(&config.actions) {
            tracing::warn!("Action '{}' can never match: a wildcard sibling comes first", label);
        }
        Self {
            actions: config.actions,
            default_suggestion: config.default_suggestion,
            state: MatcherState::default(),
            last_parse: None,
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn default_suggestion(&self) -> Option<&Suggestion> {
        self.default_suggestion.as_ref()
    }

    /// Trimmed text of the most recent `input` call.
    pub fn last_input(&self) -> &str {
        &self.state.last_input
    }

    pub fn active_context(&self) -> Option<ContextId> {
        self.state.active_context
    }

    /// Summary of the latest `input` or `submit` call, if it parsed any
    /// words successfully.
    pub fn last_parse(&self) -> Option<&ParseSummary> {
        self.last_parse.as_ref()
    }

    /// Record the host's active context when an input session starts.
    pub fn on_input_started(&mut self, host: &dyn Host) {
        self.state.active_context = host.active_context();
        tracing::debug!(context = ?self.state.active_context, "input started");
    }

    /// Suggestions for the text typed so far.
    ///
    /// Empty input yields no suggestions besides the default one. The last
    /// parse summary is cleared first, so it is `None` after empty input or
    /// a failed parse.
    pub fn input(&mut self, text: &str) -> Result<Vec<Suggestion>> {
        self.last_parse = None;
        self.state.last_input = text.trim().to_string();
        let tokens = tokenize(&self.state.last_input);

        let mut suggestions = Vec::new();
        if !tokens.is_empty() {
            let summary = {
                let session = engine::parse(&self.actions, tokens, &self.state)?;
                session.summary()
            };
            suggestions = summary.suggestions.clone();
            self.last_parse = Some(summary);
        }

        if let Some(default) = &self.default_suggestion {
            suggestions.push(default.clone());
        }

        tracing::debug!(input = %self.state.last_input, count = suggestions.len(), "suggestions");
        Ok(suggestions)
    }

    /// Commit the text: parse it and run the deepest match's commit handler.
    ///
    /// Silently does nothing when no action matched or the matched action has
    /// no commit handler.
    pub fn submit(&mut self, text: &str, disposition: Disposition, host: &dyn Host) -> Result<SubmitOutcome> {
        self.last_parse = None;
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Ok(SubmitOutcome::NoMatch);
        }

        let (outcome, summary) = {
            let session = engine::parse(&self.actions, tokens, &self.state)?.for_commit(host, disposition);
            let outcome = match session.matched_action() {
                None => SubmitOutcome::NoMatch,
                Some(action) => {
                    if action.run_commit(&session)? {
                        tracing::info!(action = %action.label(), %disposition, "committed");
                        SubmitOutcome::Committed(action.label())
                    } else {
                        tracing::debug!(action = %action.label(), "matched action has no commit handler");
                        SubmitOutcome::NoCommitHandler(action.label())
                    }
                }
            };
            (outcome, session.summary())
        };

        self.last_parse = Some(summary);
        Ok(outcome)
    }

    /// The input text changed: suggestions for the new text.
    pub fn on_input_changed(&mut self, text: &str) -> Result<Vec<Suggestion>> {
        self.input(text)
    }

    /// The user accepted the input.
    pub fn on_input_entered(
        &mut self,
        text: &str,
        disposition: Disposition,
        host: &dyn Host,
    ) -> Result<SubmitOutcome> {
        self.submit(text, disposition, host)
    }

    /// Dispatch one host event.
    ///
    /// Returns the suggestions for `Changed` events and `None` otherwise.
    pub fn handle(&mut self, event: HostEvent, host: &dyn Host) -> Result<Option<Vec<Suggestion>>> {
        match event {
            HostEvent::Started => {
                self.on_input_started(host);
                Ok(None)
            }
            HostEvent::Changed(text) => self.on_input_changed(&text).map(Some),
            HostEvent::Entered(text, disposition) => {
                self.on_input_entered(&text, disposition, host)?;
                Ok(None)
            }
        }
    }
}

/// Labels of actions declared after a wildcard sibling, at any depth.
fn shadowed_by_wildcard(actions: &[Action]) -> Vec<String> {
    let mut shadowed = Vec::new();
    if let Some(first) = actions.iter().position(|a| a.pattern().is_wildcard()) {
        shadowed.extend(actions[first + 1..].iter().map(Action::label));
    }
    for action in actions {
        shadowed.extend(shadowed_by_wildcard(action.children()));
    }
    shadowed
}
