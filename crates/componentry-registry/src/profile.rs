// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component profiles built from descriptor files.
//!
//! A [`Profile`] pairs the validated [`Descriptor`] with the [`Instance`]
//! produced by instantiation. The instance carries category, module, and
//! interface together so they are either all present or all absent.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use componentry_core::{Component, ComponentryError, ProfileState};
use serde::Serialize;
use tracing::trace;

use crate::loader::LoadedModule;
use crate::sections::Sections;

const COMPONENT_SECTION: &str = "Component";
const INFORMATIONS_SECTION: &str = "Informations";
const REQUIRE_SEPARATOR: char = '|';
const MODULE_SOURCE_EXTENSION: &str = "rs";

/// Validated metadata read from one descriptor file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    /// Qualified `<namespace>.<identifier>` name; the registry key.
    pub name: String,
    pub title: String,
    pub module: String,
    /// Export inside the module implementing the component.
    pub attribute: String,
    pub require: Vec<String>,
    pub version: String,
    pub author: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub file: PathBuf,
    pub directory: PathBuf,
}

impl Descriptor {
    /// Reads and validates the descriptor at `path`.
    pub fn from_file(path: &Path) -> Result<Self, ComponentryError> {
        let content = std::fs::read_to_string(path).map_err(|source| ComponentryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Validates already-read descriptor `content` as if it came from `path`.
    pub fn parse(path: &Path, content: &str) -> Result<Self, ComponentryError> {
        let sections = Sections::parse(content).map_err(|err| ComponentryError::Descriptor {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        if sections.is_empty() {
            return Err(ComponentryError::NoSections {
                path: path.to_path_buf(),
            });
        }

        let required = |field: &'static str| -> Result<String, ComponentryError> {
            sections
                .value(COMPONENT_SECTION, field)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .ok_or_else(|| ComponentryError::MissingField {
                    field,
                    path: path.to_path_buf(),
                })
        };
        let name = required("Name")?;
        let module = required("Module")?;
        let attribute = required("Object")?;
        let version = required("Version")?;

        let optional = |section: &str, field: &str| {
            sections
                .value(section, field)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        let title = optional(COMPONENT_SECTION, "Title").unwrap_or_else(|| name.clone());
        let require = sections
            .value(COMPONENT_SECTION, "Require")
            .map(parse_require)
            .unwrap_or_default();

        // A bare file name lives in the current directory.
        let directory = path
            .parent()
            .map(|dir| {
                if dir.as_os_str().is_empty() {
                    PathBuf::from(".")
                } else {
                    dir.to_path_buf()
                }
            })
            .filter(|dir| dir.is_dir())
            .ok_or_else(|| ComponentryError::Descriptor {
                path: path.to_path_buf(),
                message: "containing directory does not exist".to_string(),
            })?;

        Ok(Self {
            name,
            title,
            module,
            attribute,
            require,
            version,
            author: optional(INFORMATIONS_SECTION, "Author"),
            email: optional(INFORMATIONS_SECTION, "Email"),
            url: optional(INFORMATIONS_SECTION, "Url"),
            description: optional(INFORMATIONS_SECTION, "Description"),
            file: path.to_path_buf(),
            directory,
        })
    }

    /// Determines how the module sits relative to the descriptor.
    ///
    /// Checked in order: a sibling source file, a sibling package
    /// directory, then the descriptor directory itself being the package.
    pub fn module_layout(&self) -> Option<ModuleLayout> {
        let candidate = self.directory.join(&self.module);
        if candidate.is_file()
            || self
                .directory
                .join(format!("{}.{MODULE_SOURCE_EXTENSION}", self.module))
                .is_file() {
            return Some(ModuleLayout::SourceFile);
        }
        if candidate.is_dir() {
            return Some(ModuleLayout::Package);
        }
        if self.directory.file_name().and_then(|n| n.to_str()) == Some(self.module.as_str()) {
            return Some(ModuleLayout::SelfPackage);
        }
        None
    }

    /// Directory the module is searched in for `layout`.
    pub fn search_directory(&self, layout: ModuleLayout) -> PathBuf {
        match layout {
            ModuleLayout::SourceFile | ModuleLayout::Package => self.directory.clone(),
            ModuleLayout::SelfPackage => self
                .directory
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.directory.clone()),
        }
    }
}

fn parse_require(raw: &str) -> Vec<String> {
    raw.split(REQUIRE_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Where a component's module lives relative to its descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleLayout {
    /// `<directory>/<module>` or `<directory>/<module>.rs` is a file.
    SourceFile,
    /// `<directory>/<module>/` is a directory.
    Package,
    /// The descriptor's own directory is named `<module>`.
    SelfPackage,
}

/// Result of a successful instantiation.
pub struct Instance {
    pub(crate) category: String,
    pub(crate) module: Arc<LoadedModule>,
    pub(crate) interface: Box<dyn Component>,
}

impl Instance {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn module(&self) -> &Arc<LoadedModule> {
        &self.module
    }

    pub fn interface(&self) -> &(dyn Component + 'static) {
        self.interface.as_ref()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("category", &self.category)
            .field("module", &self.module.name())
            .field("generation", &self.module.generation())
            .field("interface", &self.interface.name())
            .finish()
    }
}

/// A registered component.
#[derive(Debug)]
pub struct Profile {
    descriptor: Descriptor,
    instance: Option<Instance>,
}

impl Profile {
    /// Builds an uninstantiated profile from the descriptor at `path`.
    pub fn from_file(path: &Path) -> Result<Self, ComponentryError> {
        let descriptor = Descriptor::from_file(path)?;
        trace!(name = %descriptor.name, file = %path.display(), "descriptor validated");
        Ok(Self::new(descriptor))
    }

    pub fn new(descriptor: Descriptor) -> Self {
        Self {
            descriptor,
            instance: None,
        }
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn title(&self) -> &str {
        &self.descriptor.title
    }

    pub fn module(&self) -> &str {
        &self.descriptor.module
    }

    pub fn attribute(&self) -> &str {
        &self.descriptor.attribute
    }

    pub fn require(&self) -> &[String] {
        &self.descriptor.require
    }

    pub fn version(&self) -> &str {
        &self.descriptor.version
    }

    pub fn author(&self) -> Option<&str> {
        self.descriptor.author.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.descriptor.email.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.descriptor.url.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.descriptor.description.as_deref()
    }

    pub fn file(&self) -> &Path {
        &self.descriptor.file
    }

    pub fn directory(&self) -> &Path {
        &self.descriptor.directory
    }

    pub fn instance(&self) -> Option<&Instance> {
        self.instance.as_ref()
    }

    /// Category recorded at instantiation.
    pub fn category(&self) -> Option<&str> {
        self.instance.as_ref().map(Instance::category)
    }

    pub fn interface(&self) -> Option<&(dyn Component + 'static)> {
        self.instance.as_ref().map(Instance::interface)
    }

    pub fn interface_mut(&mut self) -> Option<&mut (dyn Component + 'static)> {
        match &mut self.instance {
            Some(instance) => Some(instance.interface.as_mut()),
            None => None,
        }
    }

    pub fn loaded_module(&self) -> Option<&Arc<LoadedModule>> {
        self.instance.as_ref().map(Instance::module)
    }

    pub fn state(&self) -> ProfileState {
        if self.instance.is_some() {
            ProfileState::Instantiated
        } else {
            ProfileState::Registered
        }
    }

    /// Installs `instance`, returning the one it replaces.
    pub(crate) fn set_instance(&mut self, instance: Instance) -> Option<Instance> {
        self.instance.replace(instance)
    }
}
