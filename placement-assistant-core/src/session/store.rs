//! Session data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Greeting that opens every session
pub const WELCOME_MESSAGE: &str = "Hello! 👋 I'm your Placement Assistant. I can help you with:\n\n• Registration process\n• Job applications\n• Profile setup\n• General questions\n\nWhat would you like to know?";

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message content; line breaks separate paragraphs
    pub text: String,
    /// Message author
    pub sender: Sender,
    /// Creation time, used for display only
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new message
    pub fn new(sender: Sender, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp,
        }
    }

    pub fn user(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(Sender::User, text, timestamp)
    }

    pub fn bot(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(Sender::Bot, text, timestamp)
    }

    /// Text split on line breaks
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

/// Append-only message history of one session
///
/// Messages are never edited or removed; insertion order is the only order.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    welcomed: bool,
}

impl MessageStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message to the end of the history
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append the welcome message
    ///
    /// Only the first call has an effect. Returns the appended message.
    pub fn seed_welcome(&mut self, timestamp: DateTime<Utc>) -> Option<&Message> {
        if self.welcomed {
            warn!("Welcome message already seeded, ignoring");
            return None;
        }
        self.welcomed = true;
        self.append(Message::bot(WELCOME_MESSAGE, timestamp));
        self.messages.last()
    }

    /// The full history in insertion order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
