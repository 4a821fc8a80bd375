// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints serde cannot express: descriptor extension
//! shape, category table consistency, and the log level vocabulary.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::ComponentryConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// every validation error found (does not fail fast).
pub fn validate_config(config: &ComponentryConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let extension = config.manager.extension.trim();
    if extension.is_empty() {
        errors.push(ConfigError::Validation {
            message: "manager.extension must not be empty".to_string(),
        });
    } else if extension.starts_with('.') {
        errors.push(ConfigError::Validation {
            message: format!(
                "manager.extension `{extension}` must not start with a dot, use `{}`",
                extension.trim_start_matches('.')
            ),
        });
    }

    if config.categories.is_empty() {
        errors.push(ConfigError::Validation {
            message: "at least one [[categories]] entry is required".to_string(),
        });
    }

    let mut seen_labels = HashSet::new();
    for (i, category) in config.categories.iter().enumerate() {
        if category.label.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("categories[{i}].label must not be empty"),
            });
        } else if !seen_labels.insert(category.label.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "duplicate category label `{}` in [[categories]] array",
                    category.label
                ),
            });
        }

        if category.capability.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("categories[{i}].capability must not be empty"),
            });
        }
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
