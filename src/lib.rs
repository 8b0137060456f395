// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! omnimatch - Incremental keyword matcher library
//!
//! Type a few words, get ranked suggestions; press enter, run the action.
//!
//! Input is split into words and walked against a tree of actions:
//!
//! **Tokenizer** -> **Action tree descent** -> **Suggestions / Commit**
//!
//! Each word is tried against the actions of the current level in order; the
//! first match runs its handlers and the next word is tried against its
//! children.
//!
//! # Core Modules
//!
//! - [`tokenize`] - Word splitting and the `suggest N:` marker round trip
//! - [`pattern`] - Word patterns (literal, predicate, regex, wildcard)
//! - [`action`] - Action tree nodes and their handlers
//! - [`session`] - Per-call accumulator shared by handlers
//! - [`engine`] - Recursive descent over the action tree
//! - [`omnibox`] - The matcher instance: `input` and `submit`
//! - [`host`] - Host boundary (events, navigation, notifications)
//! - [`config`] - Declarative keyword files
//! - [`cli`] - Terminal host with completion and hints
//! - [`error`] - Consistent error formatting utilities

pub mod action;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod omnibox;
pub mod pattern;
pub mod session;
pub mod tokenize;
pub mod types;

// Re-export commonly used types
pub use types::{ContextId, Disposition, MatcherState, Suggestion};

pub use action::{Action, CommitHandler, MatchHandler, SuggestHandler};
pub use pattern::{Predicate, WordPattern};
pub use session::{ParseSummary, Session};
pub use omnibox::{Omnibox, OmniboxConfig, SubmitOutcome};
pub use host::{Host, HostEvent, RecordingHost};
pub use tokenize::{strip_marker, tokenize, MARKER_PATTERN};

// Re-export configuration types
pub use config::{
    load_keywords, load_omnibox, save_keywords,
    CommitSpec, KeywordFile, KeywordSpec, PatternSpec,
};

// Re-export error utilities
pub use error::{format_error, format_simple_error, ErrorBuilder};
