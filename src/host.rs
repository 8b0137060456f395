// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Host boundary.
//!
//! The matcher never captures keystrokes or opens pages itself. The host
//! (a browser address bar, a terminal line editor, a test double) feeds it
//! [`HostEvent`]s and carries out the effects that commit handlers request
//! through the [`Host`] trait.

use anyhow::Result;

use crate::types::{ContextId, Disposition};

/// Services the host offers to the matcher and its handlers.
pub trait Host {
    /// Identifier of the currently active context, if the host has one.
    fn active_context(&self) -> Option<ContextId>;

    /// Navigate to `url`.
    fn open(&self, url: &str, disposition: Disposition, context: Option<ContextId>) -> Result<()>;

    /// Show a short message to the user.
    fn notify(&self, message: &str) -> Result<()> {
        tracing::info!("{}", message);
        Ok(())
    }
}

/// Events delivered by the host's input surface, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The user started typing into the input surface
    Started,
    /// The input text changed
    Changed(String),
    /// The user accepted the input
    Entered(String, Disposition),
}

/// Host that records every request instead of acting on it.
///
/// Useful for dry runs and tests.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub context: Option<ContextId>,
    opened: std::cell::RefCell<Vec<(String, Disposition, Option<ContextId>)>>,
    messages: std::cell::RefCell<Vec<String>>,
}

impl RecordingHost {
    pub fn new(context: Option<ContextId>) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    /// Every `open` request received, oldest first.
    pub fn opened(&self) -> Vec<(String, Disposition, Option<ContextId>)> {
        self.opened.borrow().clone()
    }

    /// Every `notify` message received, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Host for RecordingHost {
    fn active_context(&self) -> Option<ContextId> {
        self.context
    }

    fn open(&self, url: &str, disposition: Disposition, context: Option<ContextId>) -> Result<()> {
        self.opened.borrow_mut().push((url.to_string(), disposition, context));
        Ok(())
    }

    fn notify(&self, message: &str) -> Result<()> {
        self.messages.borrow_mut().push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_host_records_in_order() {
        let host = RecordingHost::new(Some(ContextId(3)));
        host.open("https://a.example", Disposition::CurrentTab, host.active_context()).unwrap();
        host.open("https://b.example", Disposition::NewBackgroundTab, None).unwrap();
        host.notify("done").unwrap();

        let opened = host.opened();
        assert_eq!(opened.len(), 2);
        assert_eq!(opened[0], ("https://a.example".to_string(), Disposition::CurrentTab, Some(ContextId(3))));
        assert_eq!(opened[1].1, Disposition::NewBackgroundTab);
        assert_eq!(host.messages(), vec!["done".to_string()]);
    }
}
