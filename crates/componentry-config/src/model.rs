// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Componentry registry.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Label of the category every default installation provides.
pub const DEFAULT_CATEGORY: &str = "Default";

/// Capability bound to [`DEFAULT_CATEGORY`].
pub const DEFAULT_CAPABILITY: &str = "component";

/// Top-level Componentry configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentryConfig {
    /// Descriptor discovery and module search settings.
    #[serde(default)]
    pub manager: ManagerConfig,

    /// Ordered capability categories. Earlier entries win when several match.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ComponentryConfig {
    fn default() -> Self {
        Self {
            manager: ManagerConfig::default(),
            categories: default_categories(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_categories() -> Vec<CategoryConfig> {
    vec![CategoryConfig {
        label: DEFAULT_CATEGORY.to_string(),
        capability: DEFAULT_CAPABILITY.to_string(),
    }]
}

/// Descriptor discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ManagerConfig {
    /// Directories walked recursively for component descriptors.
    #[serde(default)]
    pub paths: Vec<PathBuf>,

    /// Descriptor file extension, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Module search paths known before any component is instantiated.
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            extension: default_extension(),
            search_paths: Vec::new(),
        }
    }
}

fn default_extension() -> String {
    "rc".to_string()
}

/// One capability category: a label and the capability it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    /// Category label recorded on matching profiles (e.g. "Default").
    pub label: String,

    /// Capability a component factory must declare to match.
    pub capability: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error, off).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
