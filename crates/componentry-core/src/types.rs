// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the registry, the loaders, and component authors.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Tag naming the interface a component factory implements.
///
/// Categories bind a label to one capability; a factory is accepted under a
/// label when the capability it declares is the one the label requires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(Cow<'static, str>);

impl Capability {
    /// The plain component interface described by [`crate::Component`].
    pub const COMPONENT: Capability = Capability(Cow::Borrowed("component"));

    /// Creates a capability tag.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Returns the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Capability {
    fn from(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }
}

impl From<String> for Capability {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

/// Where a registered component stands in its lifecycle as seen by the registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ProfileState {
    /// Descriptor validated and indexed, nothing loaded yet.
    Registered,
    /// Module loaded, interface constructed, category recorded.
    Instantiated,
}
