// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Componentry - inspect component descriptor trees.
//!
//! This is the binary entry point. It loads configuration, builds a
//! manager over the configured descriptor roots, and runs one command.

mod check;
mod inspect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use componentry_config::ComponentryConfig;
use componentry_core::ComponentryError;
use componentry_registry::{Manager, ModuleTable};
use tracing::debug;

/// Componentry - inspect component descriptor trees.
#[derive(Parser, Debug)]
#[command(name = "componentry", version, about, long_about = None)]
struct Cli {
    /// Configuration file to load instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Additional descriptor root (repeatable).
    #[arg(long = "path", global = true)]
    paths: Vec<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered components.
    List {
        /// Order by dependency instead of by name.
        #[arg(long)]
        by_dependency: bool,
        /// Output JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show one component's descriptor.
    Show {
        name: String,
        /// Output JSON.
        #[arg(long)]
        json: bool,
    },
    /// List components that depend on a component, directly or transitively.
    Dependents { name: String },
    /// List components whose name matches a regular expression.
    Filter {
        pattern: String,
        /// Only components instantiated under this category.
        #[arg(long)]
        category: Option<String>,
    },
    /// Register everything and report problems.
    Check,
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => componentry_config::load_and_validate_path(path),
        None => componentry_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            componentry_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.logging.level);

    let Some(command) = cli.command else {
        println!("componentry: use --help for available commands");
        return;
    };

    let mut manager = match build_manager(&config, &cli.paths) {
        Ok(manager) => manager,
        Err(err) => {
            eprintln!("componentry: {err}");
            std::process::exit(1);
        }
    };
    debug!(
        paths = ?manager.paths(),
        extension = manager.extension(),
        "manager configured"
    );

    let result = match command {
        Commands::Check => {
            if check::run_check(&mut manager, cli.plain) {
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
        Commands::List {
            by_dependency,
            json,
        } => {
            inspect::register_all(&mut manager);
            inspect::run_list(&manager, by_dependency, json)
        }
        Commands::Show { name, json } => {
            inspect::register_all(&mut manager);
            inspect::run_show(&manager, &name, json)
        }
        Commands::Dependents { name } => {
            inspect::register_all(&mut manager);
            inspect::run_dependents(&manager, &name)
        }
        Commands::Filter { pattern, category } => {
            inspect::register_all(&mut manager);
            inspect::run_filter(&manager, &pattern, category.as_deref())
        }
    };

    if let Err(err) = result {
        eprintln!("componentry: {err}");
        std::process::exit(1);
    }
}

/// Builds a manager over the configured roots plus `extra_paths`.
///
/// No modules are compiled into the CLI, so it registers and orders
/// components but never instantiates them.
fn build_manager(
    config: &ComponentryConfig,
    extra_paths: &[PathBuf],
) -> Result<Manager, ComponentryError> {
    let mut paths = config.manager.paths.clone();
    paths.extend(extra_paths.iter().cloned());
    Ok(Manager::from_config(config, ModuleTable::new())?.with_paths(paths))
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "componentry={log_level},componentry_registry={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
