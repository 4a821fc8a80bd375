// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dependency resolution.
//!
//! The graph is rebuilt from `{name -> required names}` each time it is
//! needed. Ordering peels off batches of components whose requirements are
//! already satisfied; each batch is sorted by name.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use componentry_core::ComponentryError;
use tracing::debug;

/// Requirement graph restricted to known components.
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    requires: BTreeMap<&'a str, BTreeSet<&'a str>>,
}

impl<'a> DependencyGraph<'a> {
    /// Builds the graph. Required names absent from `requirements` are dropped.
    pub fn new<R>(requirements: &'a BTreeMap<&'a str, R>) -> Self
    where
        R: AsRef<[String]>,
    {
        let requires = requirements
            .iter()
            .map(|(&name, required)| {
                let known = required
                    .as_ref()
                    .iter()
                    .map(String::as_str)
                    .filter(|dependency| {
                        let registered = requirements.contains_key(dependency);
                        if !registered {
                            debug!("{name} requires unregistered component {dependency}, ignoring");
                        }
                        registered
                    })
                    .collect();
                (name, known)
            })
            .collect();
        Self { requires }
    }

    /// Ordered batches; every batch depends only on earlier ones.
    pub fn batches(&self) -> Result<Vec<Vec<&'a str>>, ComponentryError> {
        let mut pending: BTreeMap<&'a str, BTreeSet<&'a str>> = self.requires.clone();
        let mut batches = Vec::new();

        while !pending.is_empty() {
            let ready: Vec<&'a str> = pending
                .iter()
                .filter(|(_, remaining)| remaining.is_empty())
                .map(|(&name, _)| name)
                .collect();

            if ready.is_empty() {
                return Err(ComponentryError::Cycle {
                    names: pending.keys().map(|name| name.to_string()).collect(),
                });
            }

            for name in &ready {
                pending.remove(name);
            }
            for remaining in pending.values_mut() {
                for name in &ready {
                    remaining.remove(name);
                }
            }
            debug!(batch = ?ready, "resolved dependency batch");
            batches.push(ready);
        }

        Ok(batches)
    }

    /// Flattened batches: the global dependency order.
    pub fn order(&self) -> Result<Vec<&'a str>, ComponentryError> {
        Ok(self.batches()?.into_iter().flatten().collect())
    }

    /// Every component that requires `name`, directly or transitively,
    /// sorted by position in the global order.
    pub fn dependents_of(&self, name: &str) -> Result<Vec<&'a str>, ComponentryError> {
        let order = self.order()?;

        let mut required_by: HashMap<&str, Vec<&'a str>> = HashMap::new();
        for (&dependent, required) in &self.requires {
            for &dependency in required {
                required_by.entry(dependency).or_default().push(dependent);
            }
        }

        let mut found: BTreeSet<&'a str> = BTreeSet::new();
        let mut stack = vec![name];
        while let Some(current) = stack.pop() {
            for &dependent in required_by.get(current).into_iter().flatten() {
                if found.insert(dependent) {
                    stack.push(dependent);
                }
            }
        }

        Ok(order
            .into_iter()
            .filter(|candidate| found.contains(candidate))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.requires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requires.is_empty()
    }
}
