// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component registry.
//!
//! The `ComponentRegistry` stores `Profile` records keyed by component name.
//! Iteration follows name order, so every listing derived from it is
//! deterministic.

use std::collections::BTreeMap;

use componentry_core::ComponentryError;

use crate::profile::Profile;

/// Registry of known components.
///
/// Stores profiles keyed by name, supporting replacement on
/// re-registration, lookup, removal, and filtering by category.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    entries: BTreeMap<String, Profile>,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Store `profile` under its name, returning the profile it replaces.
    pub fn insert(&mut self, profile: Profile) -> Option<Profile> {
        self.entries.insert(profile.name().to_string(), profile)
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Profile> {
        self.entries.get_mut(name)
    }

    /// Remove a profile by name.
    pub fn remove(&mut self, name: &str) -> Result<Profile, ComponentryError> {
        self.entries
            .remove(name)
            .ok_or_else(|| ComponentryError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Profiles, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.entries.values()
    }

    /// Profiles instantiated under `category`.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Profile> {
        self.entries
            .values()
            .filter(move |profile| profile.category() == Some(category))
    }

    /// The `{name -> required names}` view the resolver works on.
    pub fn requirements(&self) -> BTreeMap<&str, &[String]> {
        self.entries
            .iter()
            .map(|(name, profile)| (name.as_str(), profile.require()))
            .collect()
    }

    /// Returns the number of registered components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no components are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::profile::Descriptor;

    fn test_profile(name: &str, require: &[&str]) -> Profile {
        Profile::new(Descriptor {
            name: name.to_string(),
            title: name.to_string(),
            module: "module".to_string(),
            attribute: "Object".to_string(),
            require: require.iter().map(|r| r.to_string()).collect(),
            version: "1.0".to_string(),
            author: None,
            email: None,
            url: None,
            description: None,
            file: PathBuf::from(format!("/components/{name}.rc")),
            directory: PathBuf::from("/components"),
        })
    }

    #[test]
    fn insert_and_get_roundtrip() {
        let mut registry = ComponentRegistry::new();
        assert!(registry.insert(test_profile("core.a", &[])).is_none());

        let profile = registry.get("core.a").unwrap();
        assert_eq!(profile.name(), "core.a");
        assert!(registry.contains("core.a"));
        assert!(registry.get("core.b").is_none());
    }

    #[test]
    fn reinsert_replaces_previous_profile() {
        let mut registry = ComponentRegistry::new();
        registry.insert(test_profile("core.a", &[]));
        let previous = registry.insert(test_profile("core.a", &["core.b"]));

        assert!(previous.unwrap().require().is_empty());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("core.a").unwrap().require(), ["core.b"]);
    }

    #[test]
    fn remove_returns_error_for_unknown_component() {
        let mut registry = ComponentRegistry::new();
        registry.insert(test_profile("core.a", &[]));

        assert_eq!(registry.remove("core.a").unwrap().name(), "core.a");
        let result = registry.remove("core.a");
        assert!(matches!(result, Err(ComponentryError::NotFound { name }) if name == "core.a"));
    }

    #[test]
    fn names_are_sorted() {
        let mut registry = ComponentRegistry::new();
        registry.insert(test_profile("zebra.z", &[]));
        registry.insert(test_profile("alpha.a", &[]));
        registry.insert(test_profile("middle.m", &[]));

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["alpha.a", "middle.m", "zebra.z"]);
    }

    #[test]
    fn requirements_mirror_profiles() {
        let mut registry = ComponentRegistry::new();
        registry.insert(test_profile("core.a", &[]));
        registry.insert(test_profile("core.b", &["core.a"]));

        let requirements = registry.requirements();
        assert_eq!(requirements["core.b"], ["core.a".to_string()]);
        assert!(requirements["core.a"].is_empty());
    }

    #[test]
    fn uninstantiated_profiles_belong_to_no_category() {
        let mut registry = ComponentRegistry::new();
        registry.insert(test_profile("core.a", &[]));
        assert_eq!(registry.in_category("Default").count(), 0);
    }

    #[test]
    fn len_is_empty_and_clear() {
        let mut registry = ComponentRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);

        registry.insert(test_profile("core.a", &[]));
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);

        registry.clear();
        assert!(registry.is_empty());
    }
}
