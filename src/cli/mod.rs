// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Terminal host for the omnibox.
//!
//! This module provides:
//! - Live suggestions as hints while typing
//! - Tab completion from the suggestion list
//! - Input history management
//! - A [`Host`](crate::Host) that reports commits on stdout
//!
//! ## Example
//!
//! ```no_run
//! use omnimatch::cli::{InteractiveInput, TerminalHost, show_suggestions};
//! use omnimatch::{config, Disposition};
//!
//! let mut input = InteractiveInput::new()?;
//! input.attach(config::load_omnibox(None)?);
//! let host = TerminalHost::default();
//!
//! loop {
//!     match input.read_line("omni> ", &host)? {
//!         Some(line) if line.trim().is_empty() => continue,
//!         Some(line) if line == "exit" => break,
//!         Some(line) if line.ends_with('?') => {
//!             let text = line.trim_end_matches('?');
//!             show_suggestions(text, &input.suggestions(text));
//!         }
//!         Some(line) => {
//!             input.submit(&line, Disposition::CurrentTab, &host)?;
//!         }
//!         None => break, // EOF
//!     }
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod completer;
pub mod input;
pub mod terminal;

pub use completer::{plain_content, plain_description, LineMatch, OmniboxCompleter};
pub use input::{format_suggestions, show_suggestions, InteractiveInput, SimpleInput};
pub use terminal::TerminalHost;
