//! Configuration management
//!
//! Handles loading and validation of the assistant configuration from a
//! JSON file and environment variables.

pub mod loader;
pub mod schema;
pub mod validate;

pub use loader::ConfigLoader;
pub use schema::*;
