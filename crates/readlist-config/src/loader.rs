// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./readlist.toml` > `~/.config/readlist/readlist.toml`
//! > `/etc/readlist/readlist.toml`, with `READLIST_` environment overrides.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ReadlistConfig;

pub const LOCAL_CONFIG_FILE: &str = "readlist.toml";
pub const SYSTEM_CONFIG_FILE: &str = "/etc/readlist/readlist.toml";

/// Path of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("readlist").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/readlist/readlist.toml`
/// 3. `~/.config/readlist/readlist.toml`
/// 4. `./readlist.toml`
/// 5. `READLIST_*` environment variables
pub fn load_config() -> Result<ReadlistConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<ReadlistConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ReadlistConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ReadlistConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ReadlistConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ReadlistConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_FILE))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Config sections reachable from `READLIST_*` variables.
const ENV_SECTIONS: [&str; 3] = ["api_", "session_", "logging_"];

/// Environment provider with explicit section mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys contain
/// underscores: `READLIST_API_BASE_URL` must become `api.base_url`, not
/// `api.base.url`. Variables outside the config sections (such as
/// `READLIST_PASSWORD`) are not configuration and are skipped.
fn env_provider() -> Env {
    Env::prefixed("READLIST_")
        .filter(|key| {
            let key = key.as_str().to_ascii_lowercase();
            ENV_SECTIONS.iter().any(|section| key.starts_with(section))
        })
        .map(|key| {
            let mapped = key
                .as_str()
                .replacen("api_", "api.", 1)
                .replacen("session_", "session.", 1)
                .replacen("logging_", "logging.", 1);
            mapped.into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn env_overrides_map_to_sections() {
        Jail::expect_with(|jail| {
            jail.set_env("READLIST_API_BASE_URL", "https://reading.example/api/v1");
            jail.set_env("READLIST_SESSION_VERIFY_EXPIRY", "true");
            jail.set_env("READLIST_LOGGING_LEVEL", "debug");

            let config = load_config()?;
            assert_eq!(config.api.base_url, "https://reading.example/api/v1");
            assert!(config.session.verify_expiry);
            assert_eq!(config.logging.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn password_variable_is_not_configuration() {
        Jail::expect_with(|jail| {
            jail.set_env("READLIST_PASSWORD", "hunter22");
            jail.set_env("READLIST_LOGGING_LEVEL", "warn");

            let config = load_config()?;
            assert_eq!(config.logging.level, "warn");
            jail.create_file("custom.toml", "[api]\npage_size = 20\n")?;
            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.api.page_size, 20);
            Ok(())
        });
    }

    #[test]
    fn local_file_is_picked_up() {
        Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_FILE,
                r#"
                [api]
                timeout_secs = 5
                "#,
            )?;
            let config = load_config()?;
            assert_eq!(config.api.timeout_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn env_beats_explicit_file() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[api]\npage_size = 20\n")?;
            jail.set_env("READLIST_API_PAGE_SIZE", "40");
            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.api.page_size, 40);
            Ok(())
        });
    }
}
