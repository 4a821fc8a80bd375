// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component registry, dependency resolver, and lifecycle manager.
//!
//! Components are described by sectioned descriptor files on disk. The
//! [`Manager`] discovers and validates them, orders them by their declared
//! requirements, loads their modules through a [`ModuleLoader`], and files
//! each constructed instance under the first category whose capability the
//! component's factory declares.

pub mod category;
pub mod discovery;
pub mod loader;
pub mod manager;
pub mod profile;
pub mod registry;
pub mod resolver;
pub mod sections;

pub use category::Categories;
pub use discovery::find_descriptors;
pub use loader::{
    ComponentFactory, LoadedModule, ModuleExports, ModuleLoader, ModuleRequest, ModuleTable,
};
pub use manager::{Manager, DEFAULT_EXTENSION};
pub use profile::{Descriptor, Instance, ModuleLayout, Profile};
pub use registry::ComponentRegistry;
pub use resolver::DependencyGraph;
pub use sections::{Sections, SectionsError};
