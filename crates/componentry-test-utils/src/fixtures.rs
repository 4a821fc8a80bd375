// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! On-disk descriptor fixtures.
//!
//! `ComponentTree` owns a temporary directory and writes descriptors laid
//! out the way hosts ship them: `<root>/<namespace>/<id>/<id>.rc` next to
//! the module source `<module>.rs`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Builder for one descriptor file.
#[derive(Debug, Clone)]
pub struct DescriptorSpec {
    id: String,
    namespace: String,
    module: Option<String>,
    object: String,
    version: String,
    title: Option<String>,
    require: Vec<String>,
    author: Option<String>,
    email: Option<String>,
    url: Option<String>,
    description: Option<String>,
    module_source: bool,
}

impl DescriptorSpec {
    /// A `core.<id>` component with module `<id>` exporting `Widget`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            namespace: "core".to_string(),
            module: None,
            object: "Widget".to_string(),
            version: "1.0".to_string(),
            title: None,
            require: Vec::new(),
            author: None,
            email: None,
            url: None,
            description: None,
            module_source: true,
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn object(mut self, object: impl Into<String>) -> Self {
        self.object = object.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Requires the given fully qualified component names.
    pub fn requires<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.require = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Skip writing the module source file next to the descriptor.
    pub fn without_module_source(mut self) -> Self {
        self.module_source = false;
        self
    }

    /// Fully qualified component name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.namespace, self.id)
    }

    pub fn module_name(&self) -> &str {
        self.module.as_deref().unwrap_or(&self.id)
    }

    /// Descriptor file content.
    pub fn render(&self) -> String {
        let mut out = String::from("[Component]\n");
        out.push_str(&format!("Name = {}\n", self.name()));
        if let Some(title) = &self.title {
            out.push_str(&format!("Title = {title}\n"));
        }
        out.push_str(&format!("Module = {}\n", self.module_name()));
        out.push_str(&format!("Object = {}\n", self.object));
        out.push_str(&format!("Version = {}\n", self.version));
        out.push_str(&format!("Require = {}\n", self.require.join("|")));

        let informations = [
            ("Author", &self.author),
            ("Email", &self.email),
            ("Url", &self.url),
            ("Description", &self.description),
        ];
        if informations.iter().any(|(_, value)| value.is_some()) {
            out.push_str("\n[Informations]\n");
            for (key, value) in informations {
                if let Some(value) = value {
                    out.push_str(&format!("{key} = {value}\n"));
                }
            }
        }
        out
    }
}

/// Temporary directory holding component descriptors.
///
/// The directory is removed when the tree is dropped.
pub struct ComponentTree {
    dir: TempDir,
}

impl ComponentTree {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Directory a descriptor built from `spec` lives in.
    pub fn component_dir(&self, spec: &DescriptorSpec) -> PathBuf {
        self.root().join(&spec.namespace).join(&spec.id)
    }

    /// Writes the descriptor (and module source) and returns its path.
    pub fn write(&self, spec: &DescriptorSpec) -> io::Result<PathBuf> {
        let dir = self.component_dir(spec);
        fs::create_dir_all(&dir)?;
        if spec.module_source {
            fs::write(dir.join(format!("{}.rs", spec.module_name())), "")?;
        }
        let path = dir.join(format!("{}.rc", spec.id));
        fs::write(&path, spec.render())?;
        tracing::debug!("wrote descriptor {}", path.display());
        Ok(path)
    }

    /// Writes arbitrary content at `relative`, creating parent directories.
    pub fn write_raw(&self, relative: impl AsRef<Path>, content: &str) -> io::Result<PathBuf> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// The A/B/C/D diamond: B requires A, C requires A and B, D requires B and C.
    pub fn diamond(&self) -> io::Result<Vec<PathBuf>> {
        [
            DescriptorSpec::new("d").requires(["core.b", "core.c"]),
            DescriptorSpec::new("c").requires(["core.a", "core.b"]),
            DescriptorSpec::new("b").requires(["core.a"]),
            DescriptorSpec::new("a"),
        ]
        .iter()
        .map(|spec| self.write(spec))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_optional_sections_only_when_set() {
        let plain = DescriptorSpec::new("a").render();
        assert!(plain.contains("Name = core.a\n"));
        assert!(plain.contains("Require = \n"));
        assert!(!plain.contains("[Informations]"));

        let full = DescriptorSpec::new("b")
            .requires(["core.a", "core.c"])
            .author("Jane Doe")
            .render();
        assert!(full.contains("Require = core.a|core.c\n"));
        assert!(full.contains("[Informations]\nAuthor = Jane Doe\n"));
    }

    #[test]
    fn write_lays_out_descriptor_and_module() {
        let tree = ComponentTree::new().unwrap();
        let spec = DescriptorSpec::new("a").namespace("addons");
        let path = tree.write(&spec).unwrap();

        assert_eq!(path, tree.root().join("addons/a/a.rc"));
        assert!(tree.root().join("addons/a/a.rs").is_file());
    }
}
