// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! plugreg - governance plugin registry.
//!
//! This is the binary entry point: it loads configuration, opens the catalog
//! once, and dispatches to a subcommand.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use plugreg_config::PlugregConfig;
use plugreg_registry::RegistryError;
use tracing::{debug, error};

mod catalog;
mod query;
mod validate;

/// plugreg - inspect plugins and resolve their effective configuration.
#[derive(Parser, Debug)]
#[command(name = "plugreg", version, about, long_about = None)]
struct Cli {
    /// Configuration file to use instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog file to use instead of the configured one.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List every registered plugin in catalog order.
    List {
        /// Print records as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show one plugin record as JSON.
    Show { key: String },
    /// Search plugins by key, name, or author.
    Search { query: String },
    /// Print the effective configuration of a plugin for a scope.
    Resolve {
        key: String,
        /// `space` or `proposal`.
        scope: String,
        /// Overrides as a JSON object.
        #[arg(long)]
        overrides: Option<String>,
        /// Reject overrides that replace structurally fixed values.
        #[arg(long)]
        strict: bool,
    },
    /// Check whether a plugin satisfies a required version or range.
    Check { key: String, required: String },
    /// Validate a catalog file and report every violation.
    Validate { path: Option<PathBuf> },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => plugreg_config::load_and_validate_path(path),
        None => plugreg_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            plugreg_config::render_errors(&errors);
            return ExitCode::from(2);
        }
    };

    init_tracing(&config.log.level);
    // Loading ran before the subscriber existed.
    debug!(?config, "configuration loaded");

    match run(cli, &config) {
        Ok(code) => code,
        Err(e) => {
            if e.is_fatal() {
                error!(error = %e, "failed to load plugin catalog");
            }
            eprintln!("plugreg: {e}");
            ExitCode::from(2)
        }
    }
}

/// Dispatch a subcommand. The catalog is only opened by commands that query it.
fn run(cli: Cli, config: &PlugregConfig) -> Result<ExitCode, RegistryError> {
    let catalog_path = cli.catalog.as_deref();
    let open = || catalog::open_store(config, catalog_path);

    match cli.command {
        Commands::List { json } => query::run_list(&open()?, json, cli.plain),
        Commands::Show { key } => query::run_show(&open()?, &key),
        Commands::Search { query } => query::run_search(&open()?, &query, cli.plain),
        Commands::Resolve {
            key,
            scope,
            overrides,
            strict,
        } => query::run_resolve(
            &open()?,
            &key,
            &scope,
            overrides.as_deref(),
            strict || config.resolve.strict,
        ),
        Commands::Check { key, required } => query::run_check(&open()?, &key, &required),
        Commands::Validate { path } => Ok(validate::run_validate(
            config,
            path.as_deref().or(catalog_path),
            cli.plain,
        )),
    }
}

/// Filter directives for plugreg's own crates at `log_level`, `warn` elsewhere.
fn default_filter(log_level: &str) -> String {
    let level = log_level.to_ascii_lowercase();
    ["plugreg", "plugreg_config", "plugreg_registry"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .chain(std::iter::once("warn".to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
