//! Child process spawning port.

use crate::launcher::domain::LaunchCommand;
use std::io;

/// Starts child processes without waiting for them.
pub trait ProcessSpawner: Send + Sync {
    /// Spawns `command` and returns the child's process id.
    ///
    /// # Errors
    ///
    /// Returns the OS error when the process cannot be created, e.g. because
    /// the executable does not exist.
    fn spawn(&self, command: &LaunchCommand) -> io::Result<u32>;
}
