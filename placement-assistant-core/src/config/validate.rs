//! Configuration validation rules.

use super::schema::Config;

/// Upper bound on the simulated typing delay.
pub const MAX_REPLY_DELAY_MS: u64 = 10_000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    if config.assistant.name.trim().is_empty() {
        errors.push("assistant.name must not be empty".to_string());
    }
    if config.assistant.reply_delay_ms > MAX_REPLY_DELAY_MS {
        errors.push(format!(
            "assistant.reply_delay_ms must be <= {}",
            MAX_REPLY_DELAY_MS
        ));
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(format!(
            "logging.level must be one of {}",
            LOG_LEVELS.join(", ")
        ));
    }
    let format = config.logging.format.to_ascii_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        errors.push(format!(
            "logging.format must be one of {}",
            LOG_FORMATS.join(", ")
        ));
    }
    if config.logging.dir.trim().is_empty() {
        errors.push("logging.dir must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_errors_are_aggregated() {
        let mut config = Config::default();
        config.assistant.name = "  ".to_string();
        config.assistant.reply_delay_ms = MAX_REPLY_DELAY_MS + 1;
        config.logging.format = "xml".to_string();

        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("assistant.name"));
        assert!(err.contains("assistant.reply_delay_ms"));
        assert!(err.contains("logging.format"));
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let mut config = Config::default();
        config.logging.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());

        config.logging.level = "verbose".to_string();
        assert!(validate_config(&config).is_err());
    }
}
