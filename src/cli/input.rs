// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Interactive input handling for the omnimatch shell.
//!
//! This module provides a line editor acting as the omnibox host:
//! - Live hints and Tab completion from the attached omnibox
//! - Command history
//! - A plain stdin fallback for non-interactive use
//!
//! ## Usage
//!
//! ```no_run
//! use omnimatch::cli::InteractiveInput;
//! use omnimatch::{config, Disposition, RecordingHost};
//!
//! let mut input = InteractiveInput::new()?;
//! input.attach(config::load_omnibox(None)?);
//! let host = RecordingHost::default();
//!
//! while let Some(line) = input.read_line("omni> ", &host)? {
//!     input.submit(&line, Disposition::CurrentTab, &host)?;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use rustyline::history::DefaultHistory;
use rustyline::{ColorMode, CompletionType, Config, EditMode, Editor};
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

use super::completer::{plain_content, plain_description, OmniboxCompleter};
use crate::config::CONFIG_DIR_NAME;
use crate::host::{Host, HostEvent};
use crate::omnibox::{Omnibox, SubmitOutcome};
use crate::types::{Disposition, Suggestion};

/// History file name in config directory.
const HISTORY_FILE: &str = "history.txt";

/// Maximum history entries to keep.
const MAX_HISTORY_ENTRIES: usize = 1000;

/// Interactive input handler with omnibox completion and history.
pub struct InteractiveInput {
    editor: Editor<OmniboxCompleter, DefaultHistory>,
    history_path: Option<PathBuf>,
}

impl InteractiveInput {
    /// Create a new interactive input handler with no omnibox attached.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .history_ignore_space(true)
            .history_ignore_dups(true)?
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .color_mode(ColorMode::Enabled)
            .auto_add_history(true)
            .max_history_size(MAX_HISTORY_ENTRIES)?
            .build();

        let mut editor = Editor::with_config(config).context("Failed to create input editor")?;
        editor.set_helper(Some(OmniboxCompleter::new()));

        editor.bind_sequence(
            rustyline::KeyEvent::new('\t', rustyline::Modifiers::NONE),
            rustyline::Cmd::Complete,
        );

        let history_path = Self::get_history_path();
        if let Some(ref path) = history_path {
            if path.exists() {
                let _ = editor.load_history(path);
            }
        }

        Ok(Self { editor, history_path })
    }

    fn get_history_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(HISTORY_FILE))
    }

    /// Register an omnibox with the editor. Returns the one it replaces.
    pub fn attach(&mut self, omnibox: Omnibox) -> Option<Omnibox> {
        self.editor.helper_mut().and_then(|helper| helper.attach(omnibox))
    }

    /// Deregister the omnibox and hand it back.
    pub fn detach(&mut self) -> Option<Omnibox> {
        self.editor.helper_mut().and_then(|helper| helper.detach())
    }

    /// Read a line of input with the given prompt.
    ///
    /// Signals the start of an input session to the omnibox first. Returns
    /// `Ok(Some(line))` on input, `Ok(None)` on EOF (Ctrl+D).
    pub fn read_line(&mut self, prompt: &str, host: &dyn Host) -> Result<Option<String>> {
        if let Some(helper) = self.editor.helper() {
            helper.dispatch(HostEvent::Started, host);
        }

        match self.editor.readline(prompt) {
            Ok(line) => {
                self.save_history();
                Ok(Some(line))
            }
            // Ctrl+C - return empty line to let caller handle it
            Err(rustyline::error::ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(rustyline::error::ReadlineError::Eof) => Ok(None),
            Err(e) => Err(anyhow::anyhow!("Input error: {}", e)),
        }
    }

    /// Suggestions the attached omnibox offers for `line`.
    pub fn suggestions(&self, line: &str) -> Vec<Suggestion> {
        self.editor
            .helper()
            .map(|helper| helper.suggestions(line))
            .unwrap_or_default()
    }

    /// Commit `line` through the attached omnibox.
    pub fn submit(&self, line: &str, disposition: Disposition, host: &dyn Host) -> Result<SubmitOutcome> {
        match self.editor.helper() {
            Some(helper) => helper.submit(line, disposition, host),
            None => Ok(SubmitOutcome::NoMatch),
        }
    }

    fn save_history(&mut self) {
        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = self.editor.save_history(path);
        }
    }

    /// Clear in-memory and on-disk history.
    pub fn clear_history(&mut self) {
        self.editor.clear_history().ok();
        if let Some(ref path) = self.history_path {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Pad a string to a display width, accounting for wide characters.
fn pad_display(s: &str, target_width: usize) -> String {
    let current = UnicodeWidthStr::width(s);
    if current >= target_width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(target_width - current))
    }
}

/// Render a suggestion list as aligned menu lines.
pub fn format_suggestions(suggestions: &[Suggestion]) -> Vec<String> {
    let width = suggestions
        .iter()
        .map(|s| UnicodeWidthStr::width(plain_content(s)))
        .max()
        .unwrap_or(0);

    suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "  \x1b[90m{}.\x1b[0m \x1b[36m{}\x1b[0m \x1b[90m- {}\x1b[0m",
                i + 1,
                pad_display(plain_content(s), width),
                plain_description(&s.description)
            )
        })
        .collect()
}

/// Print suggestions for a line, or a notice when there are none.
pub fn show_suggestions(line: &str, suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("\x1b[31m  No suggestions for '{}'\x1b[0m", line);
        return;
    }

    println!();
    for entry in format_suggestions(suggestions) {
        println!("{}", entry);
    }
    println!();
}

/// Simple input for non-interactive environments (fallback).
pub struct SimpleInput {
    reader: std::io::BufReader<std::io::Stdin>,
}

impl SimpleInput {
    pub fn new() -> Self {
        Self {
            reader: std::io::BufReader::new(std::io::stdin()),
        }
    }

    /// Read a line without any completion.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        use std::io::{BufRead, Write};

        print!("{}", prompt);
        std::io::stdout().flush()?;

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line.trim_end().to_string())),
            Err(e) => Err(anyhow::anyhow!("Input error: {}", e)),
        }
    }
}

impl Default for SimpleInput {
    fn default() -> Self {
        Self::new()
    }
}
