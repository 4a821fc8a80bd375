// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Componentry registry.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type returned by registry, loader, and component operations.
#[derive(Debug, Error)]
pub enum ComponentryError {
    /// The descriptor file could not be read.
    #[error("failed to read descriptor {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The descriptor file contains no parseable section.
    #[error("no sections found, '{}' file structure seems invalid", path.display())]
    NoSections { path: PathBuf },

    /// A required descriptor attribute is absent or blank.
    #[error("no '{field}' attribute found, '{}' file structure seems invalid", path.display())]
    MissingField { field: &'static str, path: PathBuf },

    /// Any other structural descriptor problem (malformed line, missing directory).
    #[error("invalid descriptor {}: {message}", path.display())]
    Descriptor { path: PathBuf, message: String },

    /// The descriptor is well formed but its module cannot be located on disk.
    #[error("'{name}' has no associated module '{module}' and has been rejected")]
    Module { name: String, module: String },

    /// The module loader could not produce the requested module.
    #[error("module '{module}' could not be loaded: {message}")]
    ModuleLoad { module: String, message: String },

    /// The component has no usable interface (missing export, failed
    /// construction, or no matching category).
    #[error("'{name}' component has no interface and has been rejected: {reason}")]
    Interface { name: String, reason: String },

    /// One or more descriptors failed to register during a bulk registration.
    #[error("{} component(s) failed to register: {}", paths.len(), join_paths(paths))]
    Registration { paths: Vec<PathBuf> },

    /// One or more components failed to instantiate during a bulk instantiation.
    #[error("{} component(s) failed to instantiate: {}", names.len(), names.join(", "))]
    Instantiation { names: Vec<String> },

    /// Dependency resolution found components that require each other.
    #[error("circular dependency between components: {}", names.join(", "))]
    Cycle { names: Vec<String> },

    /// No component is registered under the given name.
    #[error("component not found: {name}")]
    NotFound { name: String },

    /// A filter pattern is not a valid regular expression.
    #[error("invalid component pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A component failed to activate.
    #[error("'{name}' component failed to activate: {message}")]
    Activation { name: String, message: String },

    /// A component failed to deactivate.
    #[error("'{name}' component failed to deactivate: {message}")]
    Deactivation { name: String, message: String },

    /// Configuration or category table misuse.
    #[error("configuration error: {0}")]
    Config(String),
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ComponentryError {
    /// Returns true for errors raised while reading or validating a descriptor.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ComponentryError::Io { .. }
                | ComponentryError::NoSections { .. }
                | ComponentryError::MissingField { .. }
                | ComponentryError::Descriptor { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_field_and_file() {
        let err = ComponentryError::MissingField {
            field: "Version",
            path: PathBuf::from("/tmp/core/a.rc"),
        };
        let msg = err.to_string();
        assert!(msg.contains("'Version'"));
        assert!(msg.contains("/tmp/core/a.rc"));
        assert!(err.is_structural());
    }

    #[test]
    fn batch_errors_list_every_offender() {
        let err = ComponentryError::Registration {
            paths: vec![PathBuf::from("a.rc"), PathBuf::from("b.rc")],
        };
        assert_eq!(err.to_string(), "2 component(s) failed to register: a.rc, b.rc");

        let err = ComponentryError::Instantiation {
            names: vec!["core.a".into(), "core.b".into()],
        };
        assert!(err.to_string().ends_with("core.a, core.b"));
        assert!(!err.is_structural());
    }
}
