// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `plugreg validate` command implementation.
//!
//! Loads a catalog and reports every schema violation at once, so a catalog
//! author can fix them all in one pass.

use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;

use plugreg_config::PlugregConfig;
use plugreg_registry::{RegistryError, RegistryStore};

use crate::catalog;

/// Outcome of validating one catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Catalog is valid and holds this many plugins.
    Valid { plugins: usize },
    /// Catalog is invalid; one line per problem.
    Invalid { problems: Vec<String> },
}

/// Validate the catalog at `path`, or the configured/built-in one.
pub fn check_catalog(config: &PlugregConfig, path: Option<&Path>) -> Report {
    match catalog::open_source(config, path).and_then(|source| RegistryStore::load(&source)) {
        Ok(store) => Report::Valid {
            plugins: store.len(),
        },
        Err(e) => Report::Invalid {
            problems: problems_of(&e),
        },
    }
}

fn problems_of(err: &RegistryError) -> Vec<String> {
    match err.violations() {
        Some(violations) => violations.iter().map(ToString::to_string).collect(),
        None => vec![err.to_string()],
    }
}

/// Run the `plugreg validate` command. Exits 1 when the catalog is invalid.
pub fn run_validate(config: &PlugregConfig, path: Option<&Path>, plain: bool) -> ExitCode {
    let use_color = !plain && std::io::stdout().is_terminal();
    let label = path
        .map(|p| p.display().to_string())
        .or_else(|| config.catalog.path.clone())
        .unwrap_or_else(|| "<built-in>".to_string());

    println!();
    println!("  plugreg validate {label}");
    println!("  {}", "-".repeat(50));

    let code = match check_catalog(config, path) {
        Report::Valid { plugins } => {
            let word = if plugins == 1 { "plugin" } else { "plugins" };
            if use_color {
                use colored::Colorize;
                println!("    {} {plugins} {word} registered", "✓".green());
            } else {
                println!("    [OK]   {plugins} {word} registered");
            }
            ExitCode::SUCCESS
        }
        Report::Invalid { problems } => {
            for problem in &problems {
                if use_color {
                    use colored::Colorize;
                    println!("    {} {}", "✗".red(), problem.red());
                } else {
                    println!("    [FAIL] {problem}");
                }
            }
            println!();
            let word = if problems.len() == 1 { "problem" } else { "problems" };
            println!("  {} {word} found.", problems.len());
            ExitCode::from(1)
        }
    };

    println!();
    code
}
