//! Production wiring.
//!
//! Builds the launcher, registry and coordinator over real sockets, real
//! processes and the `.marimo/` JSON file.

use crate::config::FleetConfig;
use crate::coordinator::services::{CoordinatorError, ParallelCoordinator};
use crate::launcher::{adapters::OsProcessSpawner, services::NotebookLauncher};
use crate::port_allocation::{adapters::TcpPortProbe, services::PortAllocator};
use crate::session::{
    adapters::{JsonFileSessionStore, SignalProcessProbe},
    ports::SessionStoreError,
    services::SessionRegistry,
};
use camino::Utf8Path;
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;

/// Registry over the JSON file and `kill(pid, 0)` probing.
pub type SystemSessionRegistry = SessionRegistry<JsonFileSessionStore, SignalProcessProbe>;

/// Launcher spawning real notebook servers.
pub type SystemNotebookLauncher = NotebookLauncher<
    OsProcessSpawner,
    JsonFileSessionStore,
    SignalProcessProbe,
    TcpPortProbe,
    DefaultClock,
>;

/// Coordinator driving [`SystemNotebookLauncher`].
pub type SystemCoordinator = ParallelCoordinator<SystemNotebookLauncher, TcpPortProbe>;

/// Errors raised while wiring production components.
#[derive(Debug, Error)]
pub enum SystemError {
    /// The session store could not be opened.
    #[error(transparent)]
    Store(#[from] SessionStoreError),
    /// The coordinator could not be created.
    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),
}

/// Opens the session registry under the configured project root.
///
/// # Errors
///
/// Returns [`SessionStoreError`] when `.marimo/` cannot be created.
pub fn session_registry(
    config: &FleetConfig,
) -> Result<SystemSessionRegistry, SessionStoreError> {
    let store =
        JsonFileSessionStore::open_with_file_name(config.project_root(), config.registry_file())?;
    Ok(SessionRegistry::new(
        Arc::new(store),
        Arc::new(SignalProcessProbe::new()),
    ))
}

/// Returns an allocator bind-testing real sockets under the configured
/// policy.
#[must_use]
pub fn port_allocator(config: &FleetConfig) -> PortAllocator<TcpPortProbe> {
    PortAllocator::tcp(config.port_policy().clone())
}

/// Builds a launcher for the configured project.
///
/// # Errors
///
/// Returns [`SessionStoreError`] when the registry cannot be opened.
pub fn notebook_launcher(
    config: &FleetConfig,
) -> Result<SystemNotebookLauncher, SessionStoreError> {
    Ok(NotebookLauncher::new(
        config,
        session_registry(config)?,
        TcpPortProbe::new(),
        Arc::new(OsProcessSpawner::new()),
        Arc::new(DefaultClock),
    ))
}

/// Builds a coordinator writing reports to `reports_dir`.
///
/// # Errors
///
/// Returns [`SystemError`] when the registry cannot be opened or the reports
/// directory cannot be created.
pub fn coordinator(
    config: &FleetConfig,
    reports_dir: &Utf8Path,
) -> Result<SystemCoordinator, SystemError> {
    let launcher = notebook_launcher(config)?;
    Ok(ParallelCoordinator::new(
        config,
        reports_dir,
        launcher,
        TcpPortProbe::new(),
    )?)
}
