// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `componentry check` command implementation.
//!
//! Registers every descriptor under the configured roots and reports
//! registration failures, dependency cycles, and unresolved requirements.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use componentry_registry::Manager;

/// Status of a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: String, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message,
            duration: start.elapsed(),
        }
    }
}

/// Run the `componentry check` command.
///
/// Returns `true` when no check failed. With `--plain`, disables colored output.
pub fn run_check(manager: &mut Manager, plain: bool) -> bool {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_registration(manager),
        check_dependency_order(manager),
        check_requirements(manager),
        check_categories(manager),
    ];

    println!();
    println!("  componentry check");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", render_line(result, use_color));
    }
    println!();

    let fail_count = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();
    let warn_count = results
        .iter()
        .filter(|r| r.status == CheckStatus::Warn)
        .count();
    let issues = fail_count + warn_count;
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    fail_count == 0
}

fn render_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!("    {symbol} {:<20} {message} ({duration_ms}ms)", result.name)
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

/// Register every descriptor under the configured roots.
fn check_registration(manager: &mut Manager) -> CheckResult {
    let start = Instant::now();
    if manager.paths().is_empty() {
        return CheckResult::new(
            "Registration",
            CheckStatus::Warn,
            "no descriptor paths configured".to_string(),
            start,
        );
    }

    match manager.register_all() {
        Ok(names) => CheckResult::new(
            "Registration",
            CheckStatus::Pass,
            format!("{} component(s) registered", names.len()),
            start,
        ),
        Err(err) => CheckResult::new("Registration", CheckStatus::Fail, err.to_string(), start),
    }
}

/// Resolve the global dependency order.
fn check_dependency_order(manager: &Manager) -> CheckResult {
    let start = Instant::now();
    match manager.list_ordered(true) {
        Ok(order) if order.is_empty() => CheckResult::new(
            "Dependencies",
            CheckStatus::Pass,
            "nothing to order".to_string(),
            start,
        ),
        Ok(order) => CheckResult::new(
            "Dependencies",
            CheckStatus::Pass,
            format!("load order: {}", order.join(", ")),
            start,
        ),
        Err(err) => CheckResult::new("Dependencies", CheckStatus::Fail, err.to_string(), start),
    }
}

/// Report required names that are not registered.
fn check_requirements(manager: &Manager) -> CheckResult {
    let start = Instant::now();
    let missing: Vec<String> = manager
        .profiles()
        .flat_map(|profile| {
            profile
                .require()
                .iter()
                .filter(move |required| !manager.contains(required))
                .map(move |required| format!("{} -> {required}", profile.name()))
        })
        .collect();

    if missing.is_empty() {
        CheckResult::new(
            "Requirements",
            CheckStatus::Pass,
            "all requirements registered".to_string(),
            start,
        )
    } else {
        CheckResult::new(
            "Requirements",
            CheckStatus::Warn,
            format!("unregistered: {}", missing.join(", ")),
            start,
        )
    }
}

/// Summarize the category table.
fn check_categories(manager: &Manager) -> CheckResult {
    let start = Instant::now();
    let table: Vec<String> = manager
        .categories()
        .iter()
        .map(|(label, capability)| format!("{label} ({capability})"))
        .collect();
    CheckResult::new("Categories", CheckStatus::Pass, table.join(", "), start)
}
