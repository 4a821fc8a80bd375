// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Instrumented module loader.

use std::sync::{Arc, Mutex};

use componentry_core::{Capability, ComponentryError};
use componentry_registry::{ModuleExports, ModuleLoader, ModuleRequest, ModuleTable};

use crate::mock_component::mock_factory;

/// Wraps a [`ModuleTable`] and records every module it is asked to load.
///
/// Clones share the same log, so a test can keep one handle after moving
/// the loader into a manager.
#[derive(Debug, Clone, Default)]
pub struct RecordingLoader {
    table: ModuleTable,
    loads: Arc<Mutex<Vec<String>>>,
}

impl RecordingLoader {
    pub fn new(table: ModuleTable) -> Self {
        Self {
            table,
            loads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A loader where each of `modules` exports a `Widget` mock under the
    /// plain component capability.
    pub fn with_mock_modules<'a>(modules: impl IntoIterator<Item = &'a str>) -> Self {
        let mut table = ModuleTable::new();
        for module in modules {
            table.register(module, || {
                ModuleExports::new().export("Widget", mock_factory(Capability::COMPONENT))
            });
        }
        Self::new(table)
    }

    /// Modules loaded so far, in load order.
    pub fn loads(&self) -> Vec<String> {
        self.loads
            .lock()
            .map(|loads| loads.clone())
            .unwrap_or_default()
    }

    /// Forget previously recorded loads.
    pub fn clear(&self) {
        if let Ok(mut loads) = self.loads.lock() {
            loads.clear();
        }
    }
}

impl ModuleLoader for RecordingLoader {
    fn load(&self, request: &ModuleRequest<'_>) -> Result<ModuleExports, ComponentryError> {
        if let Ok(mut loads) = self.loads.lock() {
            loads.push(request.module.to_string());
        }
        self.table.load(request)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn clones_share_the_load_log() {
        let loader = RecordingLoader::with_mock_modules(["a", "b"]);
        let handle = loader.clone();
        let request = |module| ModuleRequest {
            module,
            directory: Path::new("/components"),
            search_paths: &[],
        };

        loader.load(&request("b")).unwrap();
        loader.load(&request("a")).unwrap();
        assert!(loader.load(&request("missing")).is_err());

        assert_eq!(handle.loads(), vec!["b", "a", "missing"]);
        handle.clear();
        assert!(loader.loads().is_empty());
    }
}
