// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! `{placeholder}` substitution for keyword templates.
//!
//! Built-in names: `{token}` (the word that matched), `{rest}` (the words
//! after it, space separated) and `{input}` (every word). Any other name is
//! looked up among the values captured in the session. Unknown placeholders
//! are left untouched.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::session::Session;

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex is valid")
});

/// Names always available to templates.
pub const BUILTIN_VARS: &[&str] = &["token", "rest", "input"];

/// How substituted values are escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// Insert values verbatim
    None,
    /// Percent-encode values (for URLs)
    Url,
}

/// Values a template can refer to.
#[derive(Debug, Clone, Copy)]
pub struct Vars<'v> {
    token: Option<&'v str>,
    rest: &'v [String],
    args: &'v [String],
    values: &'v IndexMap<String, Value>,
}

impl<'v> Vars<'v> {
    /// Variables while an action is matching `token`.
    pub fn matching(token: &'v str, rest: &'v [String], session: &'v Session<'_>) -> Self {
        Self {
            token: Some(token),
            rest,
            args: session.args(),
            values: session.values(),
        }
    }

    /// Variables after the descent finished: `{token}` is the word the
    /// deepest matched action consumed, `{rest}` the words after it.
    pub fn committed(session: &'v Session<'_>) -> Self {
        let args = session.args();
        let token = session.matched_at().and_then(|i| args.get(i));
        let next = session.matched_at().map_or(args.len(), |i| (i + 1).min(args.len()));
        Self {
            token: token.map(String::as_str),
            rest: &args[next..],
            args,
            values: session.values(),
        }
    }

    fn lookup(&self, name: &str) -> Option<String> {
        match name {
            "token" => self.token.map(str::to_string),
            "rest" => Some(self.rest.join(" ")),
            "input" => Some(self.args.join(" ")),
            key => self.values.get(key).map(value_to_string),
        }
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Substitute every known placeholder in `template`.
pub fn render(template: &str, vars: &Vars<'_>, escape: Escape) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| match vars.lookup(&caps[1]) {
            Some(value) => match escape {
                Escape::None => value,
                Escape::Url => urlencoding::encode(&value).into_owned(),
            },
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Placeholder names used in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER_RE
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}
