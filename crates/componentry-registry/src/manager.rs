// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The component manager.
//!
//! `Manager` owns the registry, the category table, the module loader, and
//! the module cache. It is the only surface hosts use to register,
//! instantiate, reload, and query components.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use componentry_config::ComponentryConfig;
use componentry_core::{Component, ComponentryError};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::category::Categories;
use crate::discovery::find_descriptors;
use crate::loader::{LoadedModule, ModuleLoader, ModuleRequest};
use crate::profile::{Descriptor, Instance, Profile};
use crate::registry::ComponentRegistry;
use crate::resolver::DependencyGraph;

/// Default descriptor file extension.
pub const DEFAULT_EXTENSION: &str = "rc";

static ATTRIBUTE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\.(\w+)").expect("attribute name pattern is valid"));

/// Registry and lifecycle manager for descriptor-defined components.
pub struct Manager {
    paths: Vec<PathBuf>,
    extension: String,
    categories: Categories,
    registry: ComponentRegistry,
    loader: Box<dyn ModuleLoader>,
    modules: HashMap<String, Arc<LoadedModule>>,
    search_paths: Vec<PathBuf>,
    generation: u64,
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("paths", &self.paths)
            .field("extension", &self.extension)
            .field("categories", &self.categories)
            .field("components", &self.registry.len())
            .field("modules", &self.modules.len())
            .field("search_paths", &self.search_paths)
            .finish()
    }
}

impl Manager {
    /// Creates a manager with no descriptor roots and the default category table.
    pub fn new(loader: impl ModuleLoader + 'static) -> Self {
        Self {
            paths: Vec::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            categories: Categories::default(),
            registry: ComponentRegistry::new(),
            loader: Box::new(loader),
            modules: HashMap::new(),
            search_paths: Vec::new(),
            generation: 0,
        }
    }

    /// Creates a manager from loaded configuration.
    pub fn from_config(
        config: &ComponentryConfig,
        loader: impl ModuleLoader + 'static,
    ) -> Result<Self, ComponentryError> {
        let categories = Categories::from_config(&config.categories)?;
        Ok(Self::new(loader)
            .with_paths(config.manager.paths.clone())
            .with_extension(config.manager.extension.clone())
            .with_search_paths(config.manager.search_paths.clone())
            .with_categories(categories))
    }

    /// Descriptor roots walked by [`register_all`](Self::register_all).
    pub fn with_paths(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_categories(mut self, categories: Categories) -> Self {
        self.categories = categories;
        self
    }

    /// Initial module search paths handed to the loader.
    pub fn with_search_paths(
        mut self,
        search_paths: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> Self {
        self.search_paths = search_paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Currently cached generation of `module`, if it has been loaded.
    pub fn loaded_module(&self, module: &str) -> Option<&Arc<LoadedModule>> {
        self.modules.get(module)
    }

    // --- registration ---

    /// Registers the descriptor at `path` and returns the component name.
    ///
    /// A component already registered under the same name is replaced.
    pub fn register(&mut self, path: &Path) -> Result<String, ComponentryError> {
        let profile = Profile::from_file(path)?;
        let Some(layout) = profile.descriptor().module_layout() else {
            return Err(ComponentryError::Module {
                name: profile.name().to_string(),
                module: profile.module().to_string(),
            });
        };
        debug!(name = %profile.name(), ?layout, "resolved module layout");

        let name = profile.name().to_string();
        if self.registry.insert(profile).is_some() {
            debug!("replaced previously registered component {name}");
        }
        info!("'{name}' component has been registered");
        Ok(name)
    }

    /// Registers every descriptor found under `paths` with `extension`.
    ///
    /// Successful registrations stay committed even when others fail; the
    /// failures are reported together.
    pub fn register_paths(
        &mut self,
        paths: &[PathBuf],
        extension: &str,
    ) -> Result<Vec<String>, ComponentryError> {
        let mut registered = Vec::new();
        let mut failed = Vec::new();

        for root in paths {
            for file in find_descriptors(root, extension) {
                match self.register(&file) {
                    Ok(name) => registered.push(name),
                    Err(err) => {
                        warn!("failed to register {}: {err}", file.display());
                        failed.push(file);
                    }
                }
            }
        }

        if failed.is_empty() {
            Ok(registered)
        } else {
            Err(ComponentryError::Registration { paths: failed })
        }
    }

    /// Registers every descriptor under the manager's configured roots.
    pub fn register_all(&mut self) -> Result<Vec<String>, ComponentryError> {
        let paths = self.paths.clone();
        let extension = self.extension.clone();
        self.register_paths(&paths, &extension)
    }

    /// Removes a component and returns its profile.
    pub fn unregister(&mut self, name: &str) -> Result<Profile, ComponentryError> {
        let profile = self.registry.remove(name)?;
        info!("'{name}' component has been unregistered");
        Ok(profile)
    }

    pub fn unregister_all(&mut self) {
        self.registry.clear();
        debug!("all components unregistered");
    }

    // --- instantiation ---

    pub fn instantiate(&mut self, name: &str) -> Result<(), ComponentryError> {
        self.instantiate_with(name, |_| {})
    }

    /// Instantiates `name`, calling `on_profile` with its profile first.
    ///
    /// Any failure after lookup removes the component from the registry.
    pub fn instantiate_with<F>(&mut self, name: &str, mut on_profile: F) -> Result<(), ComponentryError>
    where
        F: FnMut(&Profile),
    {
        let profile = self
            .registry
            .get(name)
            .ok_or_else(|| ComponentryError::NotFound {
                name: name.to_string(),
            })?;
        on_profile(profile);
        debug!("current component: {name}");

        let descriptor = profile.descriptor().clone();
        match self.build_instance(&descriptor, None, false) {
            Ok(instance) => {
                self.install(name, instance);
                info!("'{name}' component has been instantiated");
                Ok(())
            }
            Err(err) => {
                warn!("rejecting '{name}': {err}");
                if let Err(remove_err) = self.registry.remove(name) {
                    debug!("'{name}' was already gone from the registry: {remove_err}");
                }
                Err(err)
            }
        }
    }

    pub fn instantiate_all(&mut self) -> Result<(), ComponentryError> {
        self.instantiate_all_with(|_| {})
    }

    /// Instantiates every component in dependency order.
    pub fn instantiate_all_with<F>(&mut self, mut on_profile: F) -> Result<(), ComponentryError>
    where
        F: FnMut(&Profile),
    {
        let mut failed = Vec::new();
        for name in self.list_ordered(true)? {
            if let Err(err) = self.instantiate_with(&name, &mut on_profile) {
                debug!("instantiation of {name} failed: {err}");
                failed.push(name);
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(ComponentryError::Instantiation { names: failed })
        }
    }

    /// Reloads `name` and everything depending on it.
    ///
    /// Dependents are reloaded first, deepest first, then `name` itself.
    /// Each entry gets a fresh module generation and a new instance under
    /// its recorded category; an entry that fails keeps its previous
    /// instance. Returns the names whose instance was replaced.
    pub fn reload(&mut self, name: &str) -> Result<Vec<String>, ComponentryError> {
        if !self.registry.contains(name) {
            return Err(ComponentryError::NotFound {
                name: name.to_string(),
            });
        }

        let mut sequence = self.list_dependents(name)?;
        sequence.reverse();
        sequence.push(name.to_string());

        let mut reloaded = Vec::new();
        for entry in sequence {
            let Some(profile) = self.registry.get(&entry) else {
                continue;
            };
            let Some(category) = profile.category().map(str::to_string) else {
                debug!("skipping reload of {entry}, it was never instantiated");
                continue;
            };

            let descriptor = profile.descriptor().clone();
            match self.build_instance(&descriptor, Some(&category), true) {
                Ok(instance) => {
                    self.install(&entry, instance);
                    info!("'{entry}' component has been reloaded");
                    reloaded.push(entry);
                }
                Err(err) => warn!("failed to reload '{entry}', keeping previous instance: {err}"),
            }
        }
        Ok(reloaded)
    }

    fn install(&mut self, name: &str, instance: Instance) {
        let module = Arc::clone(&instance.module);
        if let Some(profile) = self.registry.get_mut(name) {
            profile.set_instance(instance);
        }
        self.modules.insert(module.name().to_string(), module);
    }

    /// Loads the module, resolves the export, constructs, and categorizes.
    ///
    /// With `recorded` set, only that category is accepted.
    fn build_instance(
        &mut self,
        descriptor: &Descriptor,
        recorded: Option<&str>,
        fresh: bool,
    ) -> Result<Instance, ComponentryError> {
        let layout = descriptor
            .module_layout()
            .ok_or_else(|| ComponentryError::Module {
                name: descriptor.name.clone(),
                module: descriptor.module.clone(),
            })?;
        let directory = descriptor.search_directory(layout);
        if !self.search_paths.contains(&directory) {
            debug!("adding {} to module search paths", directory.display());
            self.search_paths.push(directory.clone());
        }

        let cached = if fresh {
            None
        } else {
            self.modules.get(&descriptor.module).cloned()
        };
        let module = match cached {
            Some(module) => module,
            None => self.load_module(&descriptor.module, &directory)?,
        };

        let factory =
            module
                .factory(&descriptor.attribute)
                .ok_or_else(|| ComponentryError::Interface {
                    name: descriptor.name.clone(),
                    reason: format!(
                        "module '{}' exports no '{}'",
                        descriptor.module, descriptor.attribute
                    ),
                })?;

        let interface =
            factory
                .construct(&descriptor.name)
                .map_err(|err| ComponentryError::Interface {
                    name: descriptor.name.clone(),
                    reason: format!("construction failed: {err}"),
                })?;

        let category = match recorded {
            Some(label) => {
                if self.categories.capability(label) != Some(factory.capability()) {
                    return Err(ComponentryError::Interface {
                        name: descriptor.name.clone(),
                        reason: format!(
                            "capability '{}' no longer matches category '{label}'",
                            factory.capability()
                        ),
                    });
                }
                label.to_string()
            }
            None => self
                .categories
                .match_capability(factory.capability())
                .map(str::to_string)
                .ok_or_else(|| ComponentryError::Interface {
                    name: descriptor.name.clone(),
                    reason: format!("capability '{}' matches no category", factory.capability()),
                })?,
        };

        Ok(Instance {
            category,
            module,
            interface,
        })
    }

    fn load_module(
        &mut self,
        module: &str,
        directory: &Path,
    ) -> Result<Arc<LoadedModule>, ComponentryError> {
        let exports = self.loader.load(&ModuleRequest {
            module,
            directory,
            search_paths: &self.search_paths,
        })?;
        self.generation += 1;
        debug!(
            module,
            generation = self.generation,
            exports = exports.len(),
            "module loaded"
        );
        Ok(Arc::new(LoadedModule::new(
            module,
            self.generation,
            directory,
            exports,
        )))
    }

    // --- ordering ---

    /// Registered names, in dependency order or in registry (name) order.
    pub fn list_ordered(&self, by_dependency: bool) -> Result<Vec<String>, ComponentryError> {
        if !by_dependency {
            return Ok(self.names().map(str::to_string).collect());
        }
        let requirements = self.registry.requirements();
        let order = DependencyGraph::new(&requirements).order()?;
        Ok(order.into_iter().map(str::to_string).collect())
    }

    /// Components requiring `name` directly or transitively, in dependency order.
    pub fn list_dependents(&self, name: &str) -> Result<Vec<String>, ComponentryError> {
        let requirements = self.registry.requirements();
        let dependents = DependencyGraph::new(&requirements).dependents_of(name)?;
        Ok(dependents.into_iter().map(str::to_string).collect())
    }

    // --- queries ---

    /// Names matching the regular expression `pattern`, optionally
    /// restricted to components instantiated under `category`.
    pub fn filter(
        &self,
        pattern: &str,
        category: Option<&str>,
    ) -> Result<Vec<String>, ComponentryError> {
        let regex = Regex::new(pattern).map_err(|err| ComponentryError::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })?;

        Ok(self
            .registry
            .iter()
            .filter(|profile| category.is_none_or(|label| profile.category() == Some(label)))
            .map(Profile::name)
            .filter(|name| regex.is_match(name))
            .map(str::to_string)
            .collect())
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.registry.get(name)
    }

    pub fn interface(&self, name: &str) -> Option<&(dyn Component + 'static)> {
        self.registry.get(name).and_then(Profile::interface)
    }

    pub fn interface_mut(&mut self, name: &str) -> Option<&mut (dyn Component + 'static)> {
        self.registry.get_mut(name).and_then(Profile::interface_mut)
    }

    /// Host attribute name for a component: `"ns.componentName"` becomes
    /// `"nsComponentName"`. Names without that shape come back unchanged.
    pub fn attribute_name_for(name: &str) -> String {
        let Some(captures) = ATTRIBUTE_NAME.captures(name) else {
            return name.to_string();
        };
        let category = &captures[1];
        let mut identifier = captures[2].chars();
        match identifier.next() {
            Some(first) => format!("{category}{}{}", first.to_uppercase(), identifier.as_str()),
            None => name.to_string(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registry.names()
    }

    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.registry.iter()
    }
}
