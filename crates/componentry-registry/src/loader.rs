// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module loading seam.
//!
//! A component descriptor names a module and an attribute inside it. The
//! [`ModuleLoader`] turns a module name into its [`ModuleExports`]: the
//! attribute-to-[`ComponentFactory`] table the module publishes. Every call
//! to [`ModuleLoader::load`] produces a fresh exports table, which is what
//! makes reload observable.
//!
//! [`ModuleTable`] is the default loader: modules register an initializer
//! under their name at startup and the table runs it on every load.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use componentry_core::{Capability, Component, ComponentryError};

type Constructor = dyn Fn(&str) -> Result<Box<dyn Component>, ComponentryError> + Send + Sync;

/// Constructs instances of one component type.
///
/// The factory declares the capability its instances implement; category
/// matching compares that declaration against the category table.
#[derive(Clone)]
pub struct ComponentFactory {
    capability: Capability,
    constructor: Arc<Constructor>,
}

impl ComponentFactory {
    /// Creates a factory from a fallible constructor taking the component name.
    pub fn new<F>(capability: impl Into<Capability>, constructor: F) -> Self
    where
        F: Fn(&str) -> Result<Box<dyn Component>, ComponentryError> + Send + Sync + 'static,
    {
        Self {
            capability: capability.into(),
            constructor: Arc::new(constructor),
        }
    }

    /// Creates a factory from an infallible constructor.
    pub fn infallible<C, F>(capability: impl Into<Capability>, constructor: F) -> Self
    where
        C: Component,
        F: Fn(&str) -> C + Send + Sync + 'static,
    {
        Self::new(capability, move |name| Ok(Box::new(constructor(name)) as Box<dyn Component>))
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// Constructs one instance identified by `name`.
    pub fn construct(&self, name: &str) -> Result<Box<dyn Component>, ComponentryError> {
        (self.constructor)(name)
    }
}

impl fmt::Debug for ComponentFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentFactory")
            .field("capability", &self.capability)
            .finish_non_exhaustive()
    }
}

/// Attributes a module publishes, keyed by attribute name.
#[derive(Debug, Clone, Default)]
pub struct ModuleExports {
    factories: HashMap<String, ComponentFactory>,
}

impl ModuleExports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `factory` under `attribute`, replacing any previous export.
    pub fn insert(&mut self, attribute: impl Into<String>, factory: ComponentFactory) {
        self.factories.insert(attribute.into(), factory);
    }

    /// Chaining form of [`insert`](Self::insert).
    pub fn export(mut self, attribute: impl Into<String>, factory: ComponentFactory) -> Self {
        self.insert(attribute, factory);
        self
    }

    pub fn get(&self, attribute: &str) -> Option<&ComponentFactory> {
        self.factories.get(attribute)
    }

    /// Exported attribute names, sorted.
    pub fn attributes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// What the manager asks a loader for.
#[derive(Debug, Clone, Copy)]
pub struct ModuleRequest<'a> {
    /// Module name from the descriptor's `Module` attribute.
    pub module: &'a str,
    /// Directory the module was resolved in.
    pub directory: &'a Path,
    /// Every search path known to the manager, `directory` included.
    pub search_paths: &'a [PathBuf],
}

/// Produces module exports on demand.
pub trait ModuleLoader: Send + Sync {
    /// Loads `request.module` and returns a fresh exports table.
    fn load(&self, request: &ModuleRequest<'_>) -> Result<ModuleExports, ComponentryError>;
}

/// One generation of a loaded module, owned by the manager's module cache.
#[derive(Debug)]
pub struct LoadedModule {
    name: String,
    generation: u64,
    directory: PathBuf,
    exports: ModuleExports,
}

impl LoadedModule {
    pub(crate) fn new(
        name: impl Into<String>,
        generation: u64,
        directory: impl Into<PathBuf>,
        exports: ModuleExports,
    ) -> Self {
        Self {
            name: name.into(),
            generation,
            directory: directory.into(),
            exports,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Manager-wide load counter value at the time this module was loaded.
    /// Strictly increases with every load, so a reload is always newer.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn exports(&self) -> &ModuleExports {
        &self.exports
    }

    pub fn factory(&self, attribute: &str) -> Option<&ComponentFactory> {
        self.exports.get(attribute)
    }
}

type Initializer = dyn Fn() -> ModuleExports + Send + Sync;

/// Registration table of compiled-in modules.
///
/// Each module registers an initializer that builds its exports. The
/// initializer runs on every load, the way a module body re-executes on
/// reload.
#[derive(Clone, Default)]
pub struct ModuleTable {
    modules: HashMap<String, Arc<Initializer>>,
}

impl ModuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `initializer` under `module`, replacing any previous one.
    pub fn register<F>(&mut self, module: impl Into<String>, initializer: F) -> &mut Self
    where
        F: Fn() -> ModuleExports + Send + Sync + 'static,
    {
        self.modules.insert(module.into(), Arc::new(initializer));
        self
    }

    /// Chaining form of [`register`](Self::register).
    pub fn with_module<F>(mut self, module: impl Into<String>, initializer: F) -> Self
    where
        F: Fn() -> ModuleExports + Send + Sync + 'static,
    {
        self.register(module, initializer);
        self
    }

    pub fn contains(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    /// Registered module names, sorted.
    pub fn modules(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ModuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleTable")
            .field("modules", &self.modules())
            .finish()
    }
}

impl ModuleLoader for ModuleTable {
    fn load(&self, request: &ModuleRequest<'_>) -> Result<ModuleExports, ComponentryError> {
        let initializer =
            self.modules
                .get(request.module)
                .ok_or_else(|| ComponentryError::ModuleLoad {
                    module: request.module.to_string(),
                    message: "no module registered under this name".to_string(),
                })?;
        Ok(initializer())
    }
}
