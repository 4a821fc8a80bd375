// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./componentry.toml` > `~/.config/componentry/componentry.toml`
//! > `/etc/componentry/componentry.toml` with environment variable overrides via
//! the `COMPONENTRY_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ComponentryConfig;

/// File name looked up in every configuration directory.
pub const CONFIG_FILE_NAME: &str = "componentry.toml";

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/componentry/componentry.toml";

/// User configuration file under the XDG config directory, when one exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("componentry").join(CONFIG_FILE_NAME))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/componentry/componentry.toml` (system-wide)
/// 3. `~/.config/componentry/componentry.toml` (user XDG config)
/// 4. `./componentry.toml` (local directory)
/// 5. `COMPONENTRY_*` environment variables
pub fn load_config() -> Result<ComponentryConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ComponentryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ComponentryConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ComponentryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ComponentryConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ComponentryConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(CONFIG_FILE_NAME))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// `Env::split("_")` would turn `COMPONENTRY_MANAGER_SEARCH_PATHS` into
/// `manager.search.paths`; only the first underscore after a known section
/// name is a separator.
fn env_provider() -> Env {
    Env::prefixed("COMPONENTRY_").map(|key| {
        let mapped = key
            .as_str()
            .to_ascii_lowercase()
            .replacen("manager_", "manager.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}
