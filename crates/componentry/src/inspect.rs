// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only inspection commands: `list`, `show`, `dependents`, `filter`.

use componentry_core::{ComponentryError, ProfileState};
use componentry_registry::{Descriptor, Manager, Profile};
use serde::Serialize;

/// One row of `componentry list`.
#[derive(Debug, Serialize)]
pub struct ComponentSummary {
    pub name: String,
    pub title: String,
    pub version: String,
    pub state: ProfileState,
    pub category: Option<String>,
    pub require: Vec<String>,
}

impl From<&Profile> for ComponentSummary {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name().to_string(),
            title: profile.title().to_string(),
            version: profile.version().to_string(),
            state: profile.state(),
            category: profile.category().map(str::to_string),
            require: profile.require().to_vec(),
        }
    }
}

/// Structured output of `componentry show --json`.
#[derive(Debug, Serialize)]
struct ComponentDetails<'a> {
    #[serde(flatten)]
    descriptor: &'a Descriptor,
    state: ProfileState,
    category: Option<&'a str>,
}

/// Registers everything under the configured roots, reporting failures
/// without aborting.
pub fn register_all(manager: &mut Manager) {
    if let Err(err) = manager.register_all() {
        eprintln!("componentry: {err}");
    }
}

/// Run `componentry list`.
pub fn run_list(manager: &Manager, by_dependency: bool, json: bool) -> Result<(), ComponentryError> {
    let summaries: Vec<ComponentSummary> = manager
        .list_ordered(by_dependency)?
        .iter()
        .filter_map(|name| manager.profile(name))
        .map(ComponentSummary::from)
        .collect();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summaries).unwrap_or_else(|_| "[]".to_string())
        );
    } else {
        print!("{}", render_table(&summaries));
    }
    Ok(())
}

/// Run `componentry show <name>`.
pub fn run_show(manager: &Manager, name: &str, json: bool) -> Result<(), ComponentryError> {
    let profile = manager
        .profile(name)
        .ok_or_else(|| ComponentryError::NotFound {
            name: name.to_string(),
        })?;

    if json {
        let details = ComponentDetails {
            descriptor: profile.descriptor(),
            state: profile.state(),
            category: profile.category(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&details).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        print!("{}", render_details(profile));
    }
    Ok(())
}

/// Run `componentry dependents <name>`.
pub fn run_dependents(manager: &Manager, name: &str) -> Result<(), ComponentryError> {
    if !manager.contains(name) {
        return Err(ComponentryError::NotFound {
            name: name.to_string(),
        });
    }
    for dependent in manager.list_dependents(name)? {
        println!("{dependent}");
    }
    Ok(())
}

/// Run `componentry filter <pattern>`.
pub fn run_filter(
    manager: &Manager,
    pattern: &str,
    category: Option<&str>,
) -> Result<(), ComponentryError> {
    for name in manager.filter(pattern, category)? {
        println!("{name}");
    }
    Ok(())
}

fn render_table(summaries: &[ComponentSummary]) -> String {
    if summaries.is_empty() {
        return "no components registered\n".to_string();
    }

    let width = summaries
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let mut out = format!("{:<width$}  {:<10}  {:<12}  REQUIRES\n", "NAME", "VERSION", "STATE");
    for summary in summaries {
        let requires = if summary.require.is_empty() {
            "-".to_string()
        } else {
            summary.require.join(", ")
        };
        out.push_str(&format!(
            "{:<width$}  {:<10}  {:<12}  {requires}\n",
            summary.name,
            summary.version,
            summary.state.to_string(),
        ));
    }
    out
}

fn render_details(profile: &Profile) -> String {
    let mut out = String::new();
    let mut line = |key: &str, value: &str| out.push_str(&format!("{key:<12} {value}\n"));

    line("Name:", profile.name());
    line("Title:", profile.title());
    line("Version:", profile.version());
    line("Module:", profile.module());
    line("Object:", profile.attribute());
    line("Requires:", &profile.require().join(", "));
    line("State:", &profile.state().to_string());
    if let Some(category) = profile.category() {
        line("Category:", category);
    }
    for (key, value) in [
        ("Author:", profile.author()),
        ("Email:", profile.email()),
        ("Url:", profile.url()),
        ("Description:", profile.description()),
    ] {
        if let Some(value) = value {
            line(key, value);
        }
    }
    line("File:", &profile.file().display().to_string());
    out
}
