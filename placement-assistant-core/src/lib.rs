//! Core types and services for the placement assistant
//!
//! This crate holds the conversation state of one chat session and the
//! keyword-driven responder that answers it. Presentation is left to the
//! caller, which subscribes to appended messages and renders them.

pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod panel;
pub mod responder;
pub mod scheduler;
pub mod session;
pub mod utils;

pub use error::{Error, Result};
pub use panel::PanelState;
pub use responder::{ResponseDispatcher, Rule, Topic};
pub use scheduler::{ManualScheduler, ReplyScheduler, TokioScheduler};
pub use session::{ChatSession, Message, MessageStore, Sender, Submission};
