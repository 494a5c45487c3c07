//! Session management for conversation history
//!
//! A session keeps its messages in memory only. The history is discarded
//! when the session is dropped.

pub mod chat;
pub mod store;

pub use chat::{ChatSession, Submission};
pub use store::{Message, MessageStore, Sender, WELCOME_MESSAGE};
