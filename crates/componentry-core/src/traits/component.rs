// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base component trait that every registered component implements.

use std::any::Any;

use crate::error::ComponentryError;

/// Identity and lifecycle flags shared by every component.
///
/// Component authors embed one of these and expose it through
/// [`Component::state`]; the default trait accessors read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentState {
    name: String,
    activated: bool,
    initialized: bool,
    deactivatable: bool,
}

impl ComponentState {
    /// Creates the state for a freshly constructed component.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            activated: false,
            initialized: false,
            deactivatable: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn activated(&self) -> bool {
        self.activated
    }

    pub fn set_activated(&mut self, value: bool) {
        self.activated = value;
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    pub fn set_initialized(&mut self, value: bool) {
        self.initialized = value;
    }

    pub fn deactivatable(&self) -> bool {
        self.deactivatable
    }

    pub fn set_deactivatable(&mut self, value: bool) {
        self.deactivatable = value;
    }
}

/// The plain component interface.
///
/// The registry constructs components and records their category; it never
/// calls the lifecycle methods. The host drives `activate`, `initialize`,
/// `uninitialize`, and `deactivate` after fetching the interface from the
/// manager.
pub trait Component: Send + Sync + 'static {
    /// Identity and lifecycle flags of this instance.
    fn state(&self) -> &ComponentState;

    /// Mutable access to the lifecycle flags.
    fn state_mut(&mut self) -> &mut ComponentState;

    /// Returns the qualified name the component was constructed with.
    fn name(&self) -> &str {
        self.state().name()
    }

    fn activated(&self) -> bool {
        self.state().activated()
    }

    fn initialized(&self) -> bool {
        self.state().initialized()
    }

    fn deactivatable(&self) -> bool {
        self.state().deactivatable()
    }

    /// Activates the component.
    fn activate(&mut self) -> Result<(), ComponentryError>;

    /// Deactivates the component.
    fn deactivate(&mut self) -> Result<(), ComponentryError>;

    /// Initializes the component after activation.
    fn initialize(&mut self) -> Result<(), ComponentryError>;

    /// Reverts [`Component::initialize`].
    fn uninitialize(&mut self) -> Result<(), ComponentryError>;

    /// Upcast used by hosts to reach the concrete type of a category.
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Component {
    /// Returns the concrete component when it is a `T`.
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutable variant of [`downcast_ref`](Self::downcast_ref).
    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        state: ComponentState,
    }

    impl Component for Probe {
        fn state(&self) -> &ComponentState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ComponentState {
            &mut self.state
        }

        fn activate(&mut self) -> Result<(), ComponentryError> {
            self.state.set_activated(true);
            Ok(())
        }

        fn deactivate(&mut self) -> Result<(), ComponentryError> {
            if !self.deactivatable() {
                return Err(ComponentryError::Deactivation {
                    name: self.name().to_string(),
                    message: "component cannot be deactivated".into(),
                });
            }
            self.state.set_activated(false);
            Ok(())
        }

        fn initialize(&mut self) -> Result<(), ComponentryError> {
            self.state.set_initialized(true);
            Ok(())
        }

        fn uninitialize(&mut self) -> Result<(), ComponentryError> {
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

    #[test]
    fn fresh_state_is_inactive_and_deactivatable() {
        let state = ComponentState::new("core.probe");
        assert_eq!(state.name(), "core.probe");
        assert!(!state.activated());
        assert!(!state.initialized());
        assert!(state.deactivatable());
    }

    #[test]
    fn lifecycle_flags_follow_trait_calls() {
        let mut probe: Box<dyn Component> = Box::new(Probe {
            state: ComponentState::new("core.probe"),
        });
        probe.activate().unwrap();
        probe.initialize().unwrap();
        assert!(probe.activated());
        assert!(probe.initialized());

        probe.uninitialize().unwrap();
        probe.deactivate().unwrap();
        assert!(!probe.activated());
        assert!(!probe.initialized());
    }

    #[test]
    fn non_deactivatable_component_refuses_deactivation() {
        let mut probe = Probe {
            state: ComponentState::new("core.sticky"),
        };
        probe.state_mut().set_deactivatable(false);
        probe.activate().unwrap();
        let err = probe.deactivate().unwrap_err();
        assert!(matches!(err, ComponentryError::Deactivation { .. }));
        assert!(probe.activated());
    }

    #[test]
    fn downcast_reaches_concrete_type() {
        let probe: Box<dyn Component> = Box::new(Probe {
            state: ComponentState::new("core.probe"),
        });
        assert!(probe.downcast_ref::<Probe>().is_some());
    }
}
