// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Terminal implementation of [`Host`].
//!
//! A terminal cannot open pages, so commits are reported on stdout. The
//! process id stands in for the active context.

use anyhow::Result;
use colored::Colorize;

use crate::host::Host;
use crate::types::{ContextId, Disposition};

/// Host that prints the requests it receives.
#[derive(Debug, Clone)]
pub struct TerminalHost {
    context: ContextId,
    quiet: bool,
}

impl TerminalHost {
    pub fn new(quiet: bool) -> Self {
        Self {
            context: ContextId(i64::from(std::process::id())),
            quiet,
        }
    }
}

impl Default for TerminalHost {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Host for TerminalHost {
    fn active_context(&self) -> Option<ContextId> {
        Some(self.context)
    }

    fn open(&self, url: &str, disposition: Disposition, context: Option<ContextId>) -> Result<()> {
        tracing::info!(%url, %disposition, ?context, "open requested");
        if self.quiet {
            println!("{}", url);
        } else {
            println!("{} {} {}", "[→]".green(), url, format!("({})", disposition).dimmed());
        }
        Ok(())
    }

    fn notify(&self, message: &str) -> Result<()> {
        if self.quiet {
            println!("{}", message);
        } else {
            println!("{} {}", "[i]".cyan(), message);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_process_id() {
        let host = TerminalHost::default();
        assert_eq!(host.active_context(), Some(ContextId(i64::from(std::process::id()))));
    }
}
