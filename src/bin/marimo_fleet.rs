//! Command-line front end for launching and tracking marimo notebook servers.
//!
//! Usage:
//!
//! ```text
//! marimo_fleet [--project-root DIR] launch <notebook> [--host HOST] [-- extra...]
//! marimo_fleet [--project-root DIR] sessions
//! marimo_fleet [--project-root DIR] cleanup
//! marimo_fleet [--project-root DIR] allocate
//! marimo_fleet [--project-root DIR] agents <manifest> [--reports-dir DIR] [names...]
//! ```
//!
//! Port policy comes from `MARIMO_PORT_RANGE`, `MARIMO_PORT` and
//! `MARIMO_HOST`; `MARIMO_FLEET_RUNTIME` overrides the notebook runtime.
//! Results are printed to stdout as JSON and logs go to stderr, filtered by
//! `MARIMO_FLEET_LOG` when set.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use marimo_fleet::config::{ConfigError, FleetConfig, ProcessEnv};
use marimo_fleet::coordinator::domain::AgentManifest;
use marimo_fleet::launcher::{
    domain::{DEFAULT_LAUNCH_HOST, LaunchRequest},
    ports::{LaunchError, NotebookLaunch},
};
use marimo_fleet::port_allocation::domain::PortAllocationError;
use marimo_fleet::session::{ports::SessionStoreError, services::SessionRegistryError};
use marimo_fleet::system::{self, SystemError};
use serde::Serialize;
use serde_json::json;
use std::io;
use std::process::ExitCode;
use thiserror::Error;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_VAR: &str = "MARIMO_FLEET_LOG";

#[derive(Debug, Parser)]
#[command(name = "marimo_fleet", version, about = "Launch and track marimo notebook servers")]
struct Cli {
    /// Project root holding the notebooks and `.marimo/`.
    #[arg(long, default_value = ".", global = true)]
    project_root: Utf8PathBuf,

    /// Log at debug level unless `MARIMO_FLEET_LOG` is set.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Launch one notebook server and print the launch record.
    Launch {
        /// Notebook path, relative to the project root or absolute.
        notebook: Utf8PathBuf,
        /// Host the server binds to.
        #[arg(long, default_value = DEFAULT_LAUNCH_HOST)]
        host: String,
        /// Arguments passed to the runtime after `--port`.
        #[arg(last = true)]
        extra: Vec<String>,
    },
    /// Print the recorded sessions.
    Sessions,
    /// Remove sessions whose process is gone and print how many were removed.
    Cleanup,
    /// Print the port the configured policy would allocate.
    Allocate,
    /// Launch agents from a JSON manifest and print the status summary.
    Agents {
        /// Manifest path.
        manifest: Utf8PathBuf,
        /// Directory agents write reports to, relative to the project root.
        #[arg(long, default_value = "reports")]
        reports_dir: Utf8PathBuf,
        /// Agents to launch. Defaults to every agent without dependencies.
        names: Vec<String>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot resolve project root {path}: {source}")]
    ProjectRoot { path: Utf8PathBuf, source: io::Error },
    #[error("cannot read manifest {path}: {source}")]
    ManifestRead { path: Utf8PathBuf, source: io::Error },
    #[error("invalid manifest {path}: {source}")]
    ManifestParse {
        path: Utf8PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
    #[error(transparent)]
    Registry(#[from] SessionRegistryError),
    #[error(transparent)]
    Allocation(#[from] PortAllocationError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
    #[error(transparent)]
    System(#[from] SystemError),
    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "marimo_fleet failed");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("marimo_fleet=debug")
        } else {
            EnvFilter::new("marimo_fleet=info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let project_root = cli
        .project_root
        .canonicalize_utf8()
        .map_err(|source| CliError::ProjectRoot {
            path: cli.project_root.clone(),
            source,
        })?;
    let config = FleetConfig::from_env(project_root, &ProcessEnv)?;

    match cli.command {
        Command::Launch {
            notebook,
            host,
            extra,
        } => {
            let request = LaunchRequest::new(notebook)
                .with_host(host)
                .with_extra_args(extra);
            let result = system::notebook_launcher(&config)?.launch(&request)?;
            emit(&result)
        }
        Command::Sessions => emit(&system::session_registry(&config)?.list_sessions()?),
        Command::Cleanup => {
            let removed = system::session_registry(&config)?.cleanup_dead_sessions()?;
            emit(&json!({ "removed": removed }))
        }
        Command::Allocate => {
            let port = system::port_allocator(&config).allocate()?;
            emit(&json!({ "port": port }))
        }
        Command::Agents {
            manifest,
            reports_dir,
            names,
        } => run_agents(&config, &manifest, &reports_dir, names),
    }
}

fn run_agents(
    config: &FleetConfig,
    manifest_path: &Utf8Path,
    reports_dir: &Utf8Path,
    names: Vec<String>,
) -> Result<(), CliError> {
    let manifest = load_manifest(manifest_path)?;
    let requested = if names.is_empty() {
        manifest
            .agents()
            .iter()
            .filter(|agent| agent.depends_on().is_empty())
            .map(|agent| agent.name().to_string())
            .collect()
    } else {
        names
    };

    let mut coordinator = system::coordinator(config, reports_dir)?;
    for agent in manifest.into_agents() {
        coordinator.register_agent(agent);
    }
    let report = coordinator.launch_parallel(&requested);
    let failures: Vec<_> = report
        .failed
        .iter()
        .map(|failure| json!({ "agent": failure.agent, "error": failure.error.to_string() }))
        .collect();

    emit(&json!({
        "summary": coordinator.status_summary(),
        "failed": failures,
    }))
}

fn load_manifest(path: &Utf8Path) -> Result<AgentManifest, CliError> {
    let document = std::fs::read_to_string(path).map_err(|source| CliError::ManifestRead {
        path: path.to_owned(),
        source,
    })?;
    AgentManifest::from_json(&document).map_err(|source| CliError::ManifestParse {
        path: path.to_owned(),
        source,
    })
}

#[expect(
    clippy::print_stdout,
    reason = "stdout carries the command's JSON result"
)]
fn emit(value: &impl Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
