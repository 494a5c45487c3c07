//! Visibility state of the chat panel

use crate::session::{Message, Sender};

/// Whether the panel is open, and how many bot messages arrived while closed
///
/// A fresh panel is closed with one unread message: the welcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    open: bool,
    unread: usize,
}

impl PanelState {
    pub fn new() -> Self {
        Self {
            open: false,
            unread: 1,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Badge count shown on the toggle button
    pub fn unread(&self) -> usize {
        self.unread
    }

    /// Flip visibility; opening marks everything read. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        if self.open {
            self.unread = 0;
        }
        self.open
    }

    /// Record an appended message; returns whether it should be shown now
    pub fn note_incoming(&mut self, message: &Message) -> bool {
        if self.open {
            return true;
        }
        if message.sender == Sender::Bot {
            self.unread += 1;
        }
        false
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}
