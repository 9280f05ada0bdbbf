// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::ReadlistConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Largest page the entry service will return.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validate a deserialized configuration, collecting every failure.
pub fn validate_config(config: &ReadlistConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    match url::Url::parse(config.api.base_url.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ConfigError::Validation {
            message: format!(
                "api.base_url must use http or https, got scheme `{}`",
                url.scheme()
            ),
        }),
        Err(e) => errors.push(ConfigError::Validation {
            message: format!("api.base_url `{}` is not a valid URL: {e}", config.api.base_url),
        }),
    }

    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.api.page_size == 0 || config.api.page_size > MAX_PAGE_SIZE {
        errors.push(ConfigError::Validation {
            message: format!(
                "api.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                config.api.page_size
            ),
        });
    }

    if config.session.credentials_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "session.credentials_path must not be empty".to_string(),
        });
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&ReadlistConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = ReadlistConfig::default();
        config.api.base_url = "ftp://example.com".into();
        config.api.timeout_secs = 0;
        config.api.page_size = 500;
        config.session.credentials_path = "  ".into();
        config.logging.level = "loud".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = ReadlistConfig::default();
        config.logging.level = "DEBUG".into();
        assert!(validate_config(&config).is_ok());
    }
}
