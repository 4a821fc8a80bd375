// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability categories.
//!
//! A category binds a label to the [`Capability`] a component factory must
//! declare to be accepted under it. The table is ordered: when several
//! labels accept the same capability, the earliest one wins.

use componentry_config::{CategoryConfig, DEFAULT_CAPABILITY, DEFAULT_CATEGORY};
use componentry_core::{Capability, ComponentryError};

/// Ordered category table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories {
    entries: Vec<(String, Capability)>,
}

impl Categories {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a table from configuration entries, keeping their order.
    pub fn from_config(entries: &[CategoryConfig]) -> Result<Self, ComponentryError> {
        if entries.is_empty() {
            return Err(ComponentryError::Config(
                "at least one category is required".to_string(),
            ));
        }

        let mut categories = Self::new();
        for entry in entries {
            if categories.capability(&entry.label).is_some() {
                return Err(ComponentryError::Config(format!(
                    "duplicate category label `{}`",
                    entry.label
                )));
            }
            categories.insert(entry.label.clone(), Capability::new(entry.capability.clone()));
        }
        Ok(categories)
    }

    /// Adds a category, or rebinds an existing label in place.
    ///
    /// Returns the capability previously bound to `label`.
    pub fn insert(
        &mut self,
        label: impl Into<String>,
        capability: impl Into<Capability>,
    ) -> Option<Capability> {
        let label = label.into();
        let capability = capability.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => Some(std::mem::replace(existing, capability)),
            None => {
                self.entries.push((label, capability));
                None
            }
        }
    }

    /// Chaining form of [`insert`](Self::insert).
    pub fn with(mut self, label: impl Into<String>, capability: impl Into<Capability>) -> Self {
        self.insert(label, capability);
        self
    }

    /// Returns the first label whose capability equals `capability`.
    pub fn match_capability(&self, capability: &Capability) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, c)| c == capability)
            .map(|(label, _)| label.as_str())
    }

    /// Returns the capability bound to `label`.
    pub fn capability(&self, label: &str) -> Option<&Capability> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, capability)| capability)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Capability)> {
        self.entries.iter().map(|(label, c)| (label.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Categories {
    /// The single `Default` category accepting the plain component capability.
    fn default() -> Self {
        debug_assert_eq!(Capability::COMPONENT.as_str(), DEFAULT_CAPABILITY);
        Self::new().with(DEFAULT_CATEGORY, Capability::COMPONENT)
    }
}
