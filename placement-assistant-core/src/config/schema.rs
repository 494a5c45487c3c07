//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Root configuration for the placement assistant
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Assistant behaviour
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Assistant behaviour settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Display name shown in the panel header
    #[serde(default = "default_assistant_name")]
    pub name: String,
    /// Simulated typing latency before the bot replies, in milliseconds
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
}

fn default_assistant_name() -> String {
    "Placement Assistant".to_string()
}

fn default_reply_delay_ms() -> u64 {
    500
}

impl AssistantConfig {
    /// Reply delay as a [`Duration`]
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: default_assistant_name(),
            reply_delay_ms: default_reply_delay_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Also write logs to stdout (off by default so the chat stays readable)
    #[serde(default)]
    pub stdout: bool,
    /// Module-specific overrides
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
            stdout: false,
            overrides: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.assistant.name, "Placement Assistant");
        assert_eq!(config.assistant.reply_delay(), Duration::from_millis(500));
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.stdout);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"assistant":{"reply_delay_ms":250}}"#).unwrap();
        assert_eq!(config.assistant.reply_delay_ms, 250);
        assert_eq!(config.assistant.name, "Placement Assistant");
        assert_eq!(config.logging.format, "text");
    }
}
