// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Consistent error formatting for omnimatch.
//!
//! Provides utilities to format errors with actionable information including
//! possible causes and suggested fixes.

use std::fmt;

/// Closing line of every formatted error.
pub const HELP_HINT: &str = "Run `omnimatch --help` for usage";

/// Formats an error message with title, causes, fixes, and help hint.
///
/// # Example
///
/// ```
/// use omnimatch::error::format_error;
///
/// let error = format_error(
///     "Failed to load keywords",
///     &["keywords.json is not valid JSON", "A regex pattern does not compile"],
///     &["Check the file: omnimatch config show", "Start over: omnimatch config init --force"],
/// );
/// assert!(error.contains("Possible causes:"));
/// ```
pub fn format_error(title: &str, causes: &[&str], fixes: &[&str]) -> String {
    let mut output = String::new();

    output.push_str(&format!("[✗] {}\n\n", title));

    if !causes.is_empty() {
        output.push_str("Possible causes:\n");
        for cause in causes {
            output.push_str(&format!("  - {}\n", cause));
        }
        output.push('\n');
    }

    if !fixes.is_empty() {
        output.push_str("Try these fixes:\n");
        for (i, fix) in fixes.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, fix));
        }
        output.push('\n');
    }

    output.push_str(HELP_HINT);

    output
}

/// Formats a simple error with just a title and help hint.
pub fn format_simple_error(title: &str) -> String {
    format!("[✗] {}\n\n{}", title, HELP_HINT)
}

/// Builder for constructing formatted error messages.
///
/// # Example
///
/// ```
/// use omnimatch::error::ErrorBuilder;
///
/// let error = ErrorBuilder::new("Commit handler failed")
///     .cause("The host refused to open the URL")
///     .fix("Try again with: omnimatch submit --disposition background <text>")
///     .build();
/// assert!(error.contains("Commit handler failed"));
/// ```
#[derive(Debug, Clone)]
pub struct ErrorBuilder {
    title: String,
    causes: Vec<String>,
    fixes: Vec<String>,
}

impl ErrorBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            causes: Vec::new(),
            fixes: Vec::new(),
        }
    }

    pub fn cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    pub fn fix(mut self, fix: impl Into<String>) -> Self {
        self.fixes.push(fix.into());
        self
    }

    /// Add every message in an error chain as a cause, outermost first.
    pub fn chain(mut self, error: &anyhow::Error) -> Self {
        self.causes.extend(error.chain().map(|e| e.to_string()));
        self
    }

    pub fn build(self) -> String {
        let causes: Vec<&str> = self.causes.iter().map(|s| s.as_str()).collect();
        let fixes: Vec<&str> = self.fixes.iter().map(|s| s.as_str()).collect();
        format_error(&self.title, &causes, &fixes)
    }
}

impl fmt::Display for ErrorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clone().build())
    }
}

/// Macro to quickly create formatted errors.
///
/// ```
/// use omnimatch::error_msg;
///
/// let error = error_msg!(
///     "Keyword file not found",
///     fixes: ["Create one: omnimatch config init"]
/// );
/// assert!(error.contains("1. Create one"));
/// ```
#[macro_export]
macro_rules! error_msg {
    ($title:expr, causes: [$($cause:expr),* $(,)?], fixes: [$($fix:expr),* $(,)?]) => {
        $crate::error::format_error($title, &[$($cause),*], &[$($fix),*])
    };
    ($title:expr, causes: [$($cause:expr),* $(,)?]) => {
        $crate::error::format_error($title, &[$($cause),*], &[])
    };
    ($title:expr, fixes: [$($fix:expr),* $(,)?]) => {
        $crate::error::format_error($title, &[], &[$($fix),*])
    };
    ($title:expr) => {
        $crate::error::format_simple_error($title)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error() {
        let error = format_error("Test Error", &["Cause 1", "Cause 2"], &["Fix 1", "Fix 2"]);

        assert!(error.contains("[✗] Test Error"));
        assert!(error.contains("  - Cause 1"));
        assert!(error.contains("  - Cause 2"));
        assert!(error.contains("  1. Fix 1"));
        assert!(error.contains("  2. Fix 2"));
        assert!(error.ends_with(HELP_HINT));
    }

    #[test]
    fn test_empty_causes_and_fixes() {
        let error = format_error("Empty test", &[], &[]);
        assert!(!error.contains("Possible causes:"));
        assert!(!error.contains("Try these fixes:"));
        assert_eq!(error, format_simple_error("Empty test"));
    }

    #[test]
    fn test_error_builder_chain() {
        let err = anyhow::anyhow!("regex parse error").context("Keyword 'broken' has an invalid pattern");
        let text = ErrorBuilder::new("Failed to load keywords").chain(&err).build();

        let outer = text.find("Keyword 'broken'").unwrap();
        let inner = text.find("regex parse error").unwrap();
        assert!(outer < inner);
    }

    #[test]
    fn test_macro_forms() {
        let only_causes: String = crate::error_msg!("T", causes: ["c"]);
        assert!(only_causes.contains("  - c"));
        assert!(!only_causes.contains("Try these fixes:"));

        let simple: String = crate::error_msg!("T");
        assert_eq!(simple, format_simple_error("T"));
    }
}
