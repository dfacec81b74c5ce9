//! Notebook launch port consumed by the coordinator.

use crate::launcher::domain::{LaunchRequest, LaunchResult};
use crate::port_allocation::domain::PortAllocationError;
use crate::session::services::SessionRegistryError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Result type for launch operations.
pub type LauncherResult<T> = Result<T, LaunchError>;

/// Launches one notebook server per call.
#[cfg_attr(test, mockall::automock)]
pub trait NotebookLaunch: Send + Sync {
    /// Launches the notebook described by `request`.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError`] when the notebook is missing, no port is free,
    /// the process cannot be spawned or the session cannot be recorded.
    fn launch(&self, request: &LaunchRequest) -> LauncherResult<LaunchResult>;
}

/// Errors returned by notebook launches.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The resolved notebook path does not exist.
    #[error("notebook not found: {0}")]
    NotebookNotFound(Utf8PathBuf),

    /// No port could be allocated.
    #[error(transparent)]
    PortAllocation(#[from] PortAllocationError),

    /// The OS refused to create the child process.
    #[error(transparent)]
    Spawn(#[from] std::io::Error),

    /// The session could not be recorded.
    #[error(transparent)]
    Registry(#[from] SessionRegistryError),
}
