// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Componentry registry.
//!
//! This crate provides the component trait, the capability tags used for
//! category matching, and the error type shared by every Componentry crate.
//! Component authors depend on this crate only.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ComponentryError;
pub use traits::{Component, ComponentState};
pub use types::{Capability, ProfileState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_capability_is_stable() {
        assert_eq!(Capability::COMPONENT.as_str(), "component");
        assert_eq!(Capability::new("component"), Capability::COMPONENT);
        assert_ne!(Capability::new("ui"), Capability::COMPONENT);
    }

    #[test]
    fn capability_serializes_as_plain_string() {
        let json = serde_json::to_string(&Capability::new("ui")).expect("should serialize");
        assert_eq!(json, "\"ui\"");
        let parsed: Capability = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(parsed, Capability::new("ui"));
    }

    #[test]
    fn profile_state_display_and_parse() {
        use std::str::FromStr;

        for state in [ProfileState::Registered, ProfileState::Instantiated] {
            let s = state.to_string();
            assert_eq!(ProfileState::from_str(&s).expect("should parse back"), state);
        }
        assert_eq!(ProfileState::Instantiated.to_string(), "instantiated");
    }

    #[test]
    fn component_trait_is_object_safe() {
        fn _assert_object_safe(_: &dyn Component) {}
    }
}
