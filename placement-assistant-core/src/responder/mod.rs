//! Rule-based responder
//!
//! Replies are chosen by scanning lowercased input for keyword substrings
//! in a fixed rule order, with a random stock reply when nothing matches.

pub mod dispatcher;
pub mod rules;

pub use dispatcher::ResponseDispatcher;
pub use rules::{Rule, Topic, FALLBACK_RESPONSES, RULES};
