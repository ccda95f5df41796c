//! Reflection Registry Inspector
//!
//! Loads a reflection snapshot (plain JSON or the `const root = {...}` form
//! emitted by producers), validates it, and answers structural queries.
//!
//! # Usage
//!
//! ```bash
//! # Validate a snapshot
//! registry-inspect check root.js
//!
//! # List enums of one package as JSON
//! registry-inspect --json types root.js --package marionette --kind Enum
//!
//! # Re-emit in canonical form
//! registry-inspect dump root.js --js root
//! ```

// CLI tools are expected to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod config;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reflection_registry::infra::{read_snapshot_file, to_snapshot_js, to_snapshot_value};
use reflection_registry::{Registry, SnapshotLoader};
use reflection_registry_sdk::{QualifiedName, ReflectionRegistryApi, TypeKind, ValidationError};
use tracing_subscriber::EnvFilter;

use crate::config::InspectConfig;
use crate::output::Output;

/// Reflection Registry Inspector
///
/// Validates reflection snapshots and queries the packages and types they describe.
#[derive(Parser, Debug)]
#[command(name = "registry-inspect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the snapshot and report whether it is usable
    Check {
        /// Snapshot file
        path: PathBuf,
    },
    /// List declared packages with their type counts
    Packages {
        /// Snapshot file
        path: PathBuf,
    },
    /// List types in snapshot order
    Types {
        /// Snapshot file
        path: PathBuf,

        /// Only types declared in this package
        #[arg(long, short = 'p')]
        package: Option<String>,

        /// Only types of this kind (Class, Interface, Enum, AbstractClass)
        #[arg(long, short = 'k', value_parser = parse_kind)]
        kind: Option<TypeKind>,
    },
    /// Show one type by qualified name (e.g. `marionette.platform.Color`)
    Show {
        /// Snapshot file
        path: PathBuf,

        /// Qualified type name; the last segment is the type name
        qualified_name: String,
    },
    /// Re-emit the snapshot in canonical form
    Dump {
        /// Snapshot file
        path: PathBuf,

        /// Wrap the output as a JavaScript assignment to this variable
        #[arg(long, value_name = "VAR")]
        js: Option<String>,
    },
}

fn parse_kind(s: &str) -> Result<TypeKind, String> {
    s.parse().map_err(|e: ValidationError| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = InspectConfig::load(cli.config.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    let loader = SnapshotLoader::new(config.registry);
    let out = Output::new(cli.json);

    match &cli.command {
        Commands::Check { path } => Ok(check(&loader, path, &out)),
        Commands::Packages { path } => {
            let registry = load(&loader, path)?;
            out.packages(&registry);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Types {
            path,
            package,
            kind,
        } => {
            let registry = load(&loader, path)?;
            let types = match package {
                Some(package) => registry.types_in(package),
                None => registry.types().iter().collect(),
            };
            let types: Vec<_> = types
                .into_iter()
                .filter(|t| kind.is_none_or(|k| t.kind() == k))
                .collect();
            out.types(&types);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Show {
            path,
            qualified_name,
        } => {
            let registry = load(&loader, path)?;
            let Some(qn) = QualifiedName::parse(qualified_name) else {
                anyhow::bail!("`{qualified_name}` is not a qualified name (expected `package.Name`)");
            };
            match registry.type_by_qualified_name(&qn.package, &qn.name) {
                Some(ty) => {
                    out.type_detail(ty);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    out.not_found(&qn);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Dump { path, js } => {
            let registry = load(&loader, path)?;
            let text = match js {
                Some(var) => to_snapshot_js(&registry, var)?,
                None => serde_json::to_string_pretty(&to_snapshot_value(&registry))? + "\n",
            };
            print!("{text}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load(loader: &SnapshotLoader, path: &Path) -> Result<Registry> {
    let value = read_snapshot_file(path)?;
    loader
        .load(&value)
        .with_context(|| format!("snapshot `{}` is not usable", path.display()))
}

fn check(loader: &SnapshotLoader, path: &Path, out: &Output) -> ExitCode {
    let result = read_snapshot_file(path)
        .map_err(anyhow::Error::from)
        .and_then(|value| loader.load(&value).map_err(anyhow::Error::from));

    match result {
        Ok(registry) => {
            out.check_ok(path, &registry);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "snapshot rejected");
            out.check_failed(path, &e);
            ExitCode::FAILURE
        }
    }
}
