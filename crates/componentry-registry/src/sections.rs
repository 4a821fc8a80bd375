// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reader for sectioned key/value descriptor files.
//!
//! The format is the INI dialect used by component descriptors:
//!
//! ```text
//! ; comment
//! [Component]
//! Name = core.databaseBrowser
//! Require = core.db|core.settings
//!
//! [Informations]
//! Url = "http://example.org/#browser"
//! ```
//!
//! Keys are case-sensitive. Values run to the end of the line; one pair of
//! matching surrounding quotes is stripped. Repeated sections merge and
//! repeated keys keep the last value.

use std::collections::HashMap;

use thiserror::Error;
use tracing::trace;

/// A line the reader could not interpret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct SectionsError {
    /// 1-based line number.
    pub line: usize,
    pub message: String,
}

/// Parsed sections of a descriptor file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    sections: HashMap<String, HashMap<String, String>>,
}

impl Sections {
    /// Parse descriptor content.
    ///
    /// Attributes appearing before the first section header belong to no
    /// section and are skipped.
    pub fn parse(content: &str) -> Result<Self, SectionsError> {
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current: Option<String> = None;

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = header.strip_suffix(']').ok_or_else(|| SectionsError {
                    line: index + 1,
                    message: format!("unterminated section header `{line}`"),
                })?;
                let name = name.trim();
                if name.is_empty() {
                    return Err(SectionsError {
                        line: index + 1,
                        message: "empty section name".to_string(),
                    });
                }
                sections.entry(name.to_string()).or_default();
                current = Some(name.to_string());
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| SectionsError {
                line: index + 1,
                message: format!("expected `key = value`, found `{line}`"),
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(SectionsError {
                    line: index + 1,
                    message: "attribute with an empty key".to_string(),
                });
            }

            match &current {
                Some(section) => {
                    sections
                        .entry(section.clone())
                        .or_default()
                        .insert(key.to_string(), unquote(value.trim()).to_string());
                }
                None => trace!("skipping attribute `{key}` outside of any section"),
            }
        }

        Ok(Self { sections })
    }

    /// Returns true when no section header was found.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section_exists(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Returns the value of `key` in `section`, if both exist.
    pub fn value(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|attributes| attributes.get(key))
            .map(String::as_str)
    }

    /// Section names, in no particular order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
