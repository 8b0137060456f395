// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Line-editor helper backed by an [`Omnibox`].
//!
//! Every edit is fed through [`Omnibox::input`]; the results drive Tab
//! completion, the dimmed inline hint and the colouring of the line.
//!
//! ## Example UX
//!
//! ```text
//! > ca
//!   ca - Look up the definition for ca
//!
//! > cat s<Tab>
//!   cat synonym - Look up synonyms for cat
//!   cat         - Look up the definition for cat
//!
//! > he        (cyan: every word matched an action)
//! > cat zz    (yellow: only the first word matched)
//! ```
//!
//! The terminal has no uniqueness constraint on completions, so the
//! positional `suggest N:` marker is stripped before a suggestion is shown
//! or inserted.

use std::borrow::Cow;
use std::cell::RefCell;

use once_cell::sync::Lazy;
use regex::Regex;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hint, Hinter};
use rustyline::validate::Validator;
use rustyline::{Context, Helper, Result};

use crate::host::{Host, HostEvent};
use crate::omnibox::{Omnibox, SubmitOutcome};
use crate::tokenize::{strip_marker, tokenize};
use crate::types::{Disposition, Suggestion};

static MARKUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?(match|dim|url)>").expect("markup regex is valid"));

/// Description with host markup (`<match>`, `<dim>`, `<url>`) removed.
pub fn plain_description(description: &str) -> String {
    MARKUP_RE.replace_all(description, "").into_owned()
}

/// Suggestion content as the user should see and type it.
pub fn plain_content(suggestion: &Suggestion) -> &str {
    strip_marker(&suggestion.content)
}

/// How much of a line the action tree recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMatch {
    /// Every word matched an action
    Full,
    /// Some leading words matched
    Partial,
    /// The first word matched nothing
    None,
}

/// Completion, hint and highlight helper wrapping an attached omnibox.
pub struct OmniboxCompleter {
    omnibox: RefCell<Option<Omnibox>>,
}

impl OmniboxCompleter {
    /// Helper with no omnibox attached; it offers nothing until one is.
    pub fn new() -> Self {
        Self {
            omnibox: RefCell::new(None),
        }
    }

    /// Attach an omnibox, returning the one previously attached.
    pub fn attach(&mut self, omnibox: Omnibox) -> Option<Omnibox> {
        self.omnibox.get_mut().replace(omnibox)
    }

    /// Detach and return the omnibox.
    pub fn detach(&mut self) -> Option<Omnibox> {
        self.omnibox.get_mut().take()
    }

    pub fn is_attached(&self) -> bool {
        self.omnibox.borrow().is_some()
    }

    /// Forward a host event to the attached omnibox.
    ///
    /// Handler errors stop at this boundary: they are logged and the event
    /// yields nothing.
    pub fn dispatch(&self, event: HostEvent, host: &dyn Host) -> Option<Vec<Suggestion>> {
        let mut slot = self.omnibox.borrow_mut();
        let omnibox = slot.as_mut()?;
        match omnibox.handle(event, host) {
            Ok(suggestions) => suggestions,
            Err(e) => {
                tracing::warn!("Omnibox handler failed: {:#}", e);
                None
            }
        }
    }

    /// Suggestions for the current line.
    pub fn suggestions(&self, line: &str) -> Vec<Suggestion> {
        let mut slot = self.omnibox.borrow_mut();
        let Some(omnibox) = slot.as_mut() else {
            return Vec::new();
        };
        match omnibox.input(line) {
            Ok(suggestions) => suggestions,
            Err(e) => {
                tracing::warn!("Suggestion handler failed for '{}': {:#}", line, e);
                Vec::new()
            }
        }
    }

    /// Commit a line through the attached omnibox.
    pub fn submit(&self, line: &str, disposition: Disposition, host: &dyn Host) -> anyhow::Result<SubmitOutcome> {
        let mut slot = self.omnibox.borrow_mut();
        match slot.as_mut() {
            Some(omnibox) => omnibox.submit(line, disposition, host),
            None => Ok(SubmitOutcome::NoMatch),
        }
    }

    /// Classify how much of `line` the action tree recognises.
    pub fn line_match(&self, line: &str) -> LineMatch {
        let words = tokenize(line).len();
        if words == 0 {
            return LineMatch::None;
        }

        let mut slot = self.omnibox.borrow_mut();
        let Some(omnibox) = slot.as_mut() else {
            return LineMatch::None;
        };
        if let Err(e) = omnibox.input(line) {
            tracing::debug!("Line '{}' failed to parse: {:#}", line, e);
            return LineMatch::None;
        }
        let matched = omnibox.last_parse().map_or(0, |p| p.matched.len());

        match matched {
            0 => LineMatch::None,
            n if n >= words => LineMatch::Full,
            _ => LineMatch::Partial,
        }
    }

    fn get_completions(&self, line: &str, pos: usize) -> Vec<Pair> {
        let input = &line[..pos];
        let suggestions = self.suggestions(input);

        let width = suggestions
            .iter()
            .map(|s| plain_content(s).chars().count())
            .max()
            .unwrap_or(0);

        suggestions
            .iter()
            .map(|s| {
                let content = plain_content(s);
                let description = plain_description(&s.description);
                let display = if description.is_empty() {
                    content.to_string()
                } else {
                    format!("{:<width$} - {}", content, description, width = width)
                };
                Pair {
                    display,
                    replacement: content.to_string(),
                }
            })
            .collect()
    }

    fn get_hint(&self, line: &str) -> Option<CommandHint> {
        if line.trim().is_empty() {
            return None;
        }

        let first = self.suggestions(line).into_iter().next()?;
        let content = plain_content(&first);
        let typed = line.trim_start();

        // Inline completion when the suggestion extends what was typed
        if content.len() > typed.len()
            && content.is_char_boundary(typed.len())
            && content[..typed.len()].eq_ignore_ascii_case(typed)
        {
            return Some(CommandHint {
                display: format!("{}  {}", &content[typed.len()..], plain_description(&first.description)),
                completion: Some(content[typed.len()..].to_string()),
            });
        }

        let description = plain_description(&first.description);
        if description.is_empty() {
            return None;
        }
        Some(CommandHint {
            display: format!("  {}", description),
            completion: None,
        })
    }
}

impl Default for OmniboxCompleter {
    fn default() -> Self {
        Self::new()
    }
}

/// A hint displayed after the cursor in dim text.
#[derive(Debug, Clone)]
pub struct CommandHint {
    display: String,
    completion: Option<String>,
}

impl Hint for CommandHint {
    fn display(&self) -> &str {
        &self.display
    }

    fn completion(&self) -> Option<&str> {
        self.completion.as_deref()
    }
}

impl Completer for OmniboxCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Result<(usize, Vec<Pair>)> {
        // Suggestions replace the whole line
        Ok((0, self.get_completions(line, pos)))
    }
}

impl Hinter for OmniboxCompleter {
    type Hint = CommandHint;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<Self::Hint> {
        if pos < line.len() {
            return None;
        }
        self.get_hint(line)
    }
}

impl Highlighter for OmniboxCompleter {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[90m{}\x1b[0m", hint))
    }

    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.trim().is_empty() {
            return Cow::Borrowed(line);
        }
        match self.line_match(line) {
            LineMatch::Full => Cow::Owned(format!("\x1b[36m{}\x1b[0m", line)),
            LineMatch::Partial => Cow::Owned(format!("\x1b[33m{}\x1b[0m", line)),
            LineMatch::None => Cow::Owned(format!("\x1b[31m{}\x1b[0m", line)),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Validator for OmniboxCompleter {}

impl Helper for OmniboxCompleter {}
