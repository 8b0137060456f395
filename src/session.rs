// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Per-call parse session.
//!
//! A [`Session`] is created for every `input`/`submit` call and threaded
//! through the whole descent. It records the deepest matched action, the
//! suggestions gathered along the way, and a small ordered key/value store
//! that handlers use to pass state to the actions below them (for example
//! the word captured by a fallback action, read later by its children).

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::action::Action;
use crate::host::Host;
use crate::types::{ContextId, Disposition, MatcherState, Suggestion};

/// Mutable accumulator for one parse.
pub struct Session<'a> {
    args: Vec<String>,
    consumed: usize,
    matched: Option<&'a Action>,
    matched_at: Option<usize>,
    trail: Vec<String>,
    suggestions: Vec<Suggestion>,
    values: IndexMap<String, Value>,
    active_context: Option<ContextId>,
    disposition: Option<Disposition>,
    host: Option<&'a dyn Host>,
}

impl<'a> Session<'a> {
    /// Fresh session for the given tokens.
    pub fn new(args: Vec<String>, state: &MatcherState) -> Self {
        Self {
            args,
            consumed: 0,
            matched: None,
            matched_at: None,
            trail: Vec::new(),
            suggestions: Vec::new(),
            values: IndexMap::new(),
            active_context: state.active_context,
            disposition: None,
            host: None,
        }
    }

    /// Attach the host and disposition for a submit.
    pub(crate) fn for_commit(mut self, host: &'a dyn Host, disposition: Disposition) -> Self {
        self.host = Some(host);
        self.disposition = Some(disposition);
        self
    }

    /// All tokens of the input, consumed or not.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Number of tokens consumed by the descent so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub(crate) fn set_consumed(&mut self, consumed: usize) {
        self.consumed = consumed;
    }

    /// Deepest action matched so far.
    pub fn matched_action(&self) -> Option<&'a Action> {
        self.matched
    }

    /// Labels of every matched action, root first.
    pub fn trail(&self) -> &[String] {
        &self.trail
    }

    /// Index of the token the deepest matched action consumed.
    pub fn matched_at(&self) -> Option<usize> {
        self.matched_at
    }

    pub(crate) fn record_match(&mut self, action: &'a Action, cursor: usize) {
        self.trail.push(action.label());
        self.matched = Some(action);
        self.matched_at = Some(cursor);
    }

    /// Put freshly produced suggestions in front of the ones gathered by
    /// shallower actions.
    pub(crate) fn prepend_suggestions(&mut self, produced: Vec<Suggestion>) {
        if produced.is_empty() {
            return;
        }
        self.suggestions.splice(0..0, produced);
    }

    /// Gathered suggestions without their position markers.
    pub fn raw_suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Gathered suggestions, each labeled with its 1-based position.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.suggestions
            .iter()
            .enumerate()
            .map(|(i, s)| s.labeled(i + 1))
            .collect()
    }

    /// Store a value for actions further down the descent.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value for `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// All stored values in insertion order.
    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    pub fn active_context(&self) -> Option<ContextId> {
        self.active_context
    }

    /// Disposition requested by the host. `None` while typing.
    pub fn disposition(&self) -> Option<Disposition> {
        self.disposition
    }

    /// Host handle. Only present during submit.
    pub fn host(&self) -> Option<&'a dyn Host> {
        self.host
    }

    /// Detached snapshot of this session.
    pub fn summary(&self) -> ParseSummary {
        ParseSummary {
            tokens: self.args.clone(),
            consumed: self.consumed,
            matched: self.trail.clone(),
            suggestions: self.suggestions(),
            values: self.values.clone(),
        }
    }
}

/// What the last parse resolved to, kept on the matcher after the session
/// is dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseSummary {
    pub tokens: Vec<String>,
    pub consumed: usize,
    /// Labels of the matched action chain, root first
    pub matched: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub values: IndexMap<String, Value>,
}

impl ParseSummary {
    /// Label of the deepest matched action.
    pub fn deepest(&self) -> Option<&str> {
        self.matched.last().map(String::as_str)
    }
}
