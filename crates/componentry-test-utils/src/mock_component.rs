// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock component for deterministic testing.
//!
//! `MockComponent` implements `Component` and records every lifecycle call,
//! so tests can assert what a host did with an instance.

use std::any::Any;
use std::sync::{Arc, Mutex};

use componentry_core::{Capability, Component, ComponentState, ComponentryError};
use componentry_registry::ComponentFactory;

/// A component that records lifecycle calls in order.
#[derive(Debug)]
pub struct MockComponent {
    state: ComponentState,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockComponent {
    pub fn new(name: &str) -> Self {
        Self {
            state: ComponentState::new(name),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Lifecycle calls made so far, e.g. `["activate", "initialize"]`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.to_string());
        }
    }
}

impl Component for MockComponent {
    fn state(&self) -> &ComponentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        &mut self.state
    }

    fn activate(&mut self) -> Result<(), ComponentryError> {
        self.record("activate");
        self.state.set_activated(true);
        Ok(())
    }

    fn deactivate(&mut self) -> Result<(), ComponentryError> {
        self.record("deactivate");
        if !self.state.deactivatable() {
            return Err(ComponentryError::Deactivation {
                name: self.state.name().to_string(),
                message: "component cannot be deactivated".to_string(),
            });
        }
        self.state.set_activated(false);
        Ok(())
    }

    fn initialize(&mut self) -> Result<(), ComponentryError> {
        self.record("initialize");
        self.state.set_initialized(true);
        Ok(())
    }

    fn uninitialize(&mut self) -> Result<(), ComponentryError> {
        self.record("uninitialize");
        self.state.set_initialized(false);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Factory producing [`MockComponent`]s under `capability`.
pub fn mock_factory(capability: impl Into<Capability>) -> ComponentFactory {
    ComponentFactory::infallible(capability, MockComponent::new)
}

/// Factory whose construction always fails.
pub fn failing_factory(capability: impl Into<Capability>) -> ComponentFactory {
    ComponentFactory::new(capability, |name| {
        Err(ComponentryError::Activation {
            name: name.to_string(),
            message: "mock construction failure".to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_lifecycle_calls() {
        let mut component = MockComponent::new("core.mock");
        component.activate().unwrap();
        component.initialize().unwrap();
        component.uninitialize().unwrap();
        component.deactivate().unwrap();

        assert_eq!(
            component.calls(),
            vec!["activate", "initialize", "uninitialize", "deactivate"]
        );
        assert!(!component.activated());
        assert!(!component.initialized());
    }

    #[test]
    fn refuses_deactivation_when_not_deactivatable() {
        let mut component = MockComponent::new("core.mock");
        component.activate().unwrap();
        component.state_mut().set_deactivatable(false);

        assert!(component.deactivate().is_err());
        assert!(component.activated());
    }

    #[test]
    fn factories_construct_or_fail() {
        let instance = mock_factory(Capability::COMPONENT).construct("core.mock").unwrap();
        assert_eq!(instance.name(), "core.mock");
        assert!(instance.downcast_ref::<MockComponent>().is_some());

        assert!(failing_factory("component").construct("core.bad").is_err());
    }
}
