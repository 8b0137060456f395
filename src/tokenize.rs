// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Input tokenization and the suggestion marker round trip.
//!
//! Hosts drop suggestions whose text equals what the user already typed, or
//! that duplicate another suggestion in the same batch. Every suggestion is
//! therefore sent out as `suggest N:<content>`, and the marker is stripped
//! again here before the text is split into words.

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker pattern stripped from the start of raw input.
///
/// Only a single optional digit is recognised, so markers for positions
/// past 9 are not removed.
pub const MARKER_PATTERN: &str = r"(?i)^suggest\s?\d?:";

static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(MARKER_PATTERN).expect("marker pattern is valid"));

/// Marker prefix for a 1-based suggestion position.
pub fn marker(position: usize) -> String {
    format!("suggest {}:", position)
}

/// Remove a leading suggestion marker, if any.
pub fn strip_marker(input: &str) -> &str {
    match MARKER_RE.find(input) {
        Some(m) => &input[m.end()..],
        None => input,
    }
}

/// Split raw input into word tokens.
///
/// Returns an empty vector for empty or all-whitespace input.
pub fn tokenize(input: &str) -> Vec<String> {
    strip_marker(input.trim())
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
