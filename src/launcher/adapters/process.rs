//! OS process spawner.

use crate::launcher::{domain::LaunchCommand, ports::ProcessSpawner};
use std::io;
use std::process::{Child, Command};
use std::thread;
use tracing::debug;

/// Spawns real child processes with `std::process::Command`.
///
/// The child's environment is exactly the command's environment, its working
/// directory is the command's working directory and stdio is inherited. A
/// detached thread reaps the child when it exits so that dead notebook
/// servers do not linger as zombies that still answer liveness probes.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsProcessSpawner;

impl OsProcessSpawner {
    /// Creates an OS spawner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessSpawner for OsProcessSpawner {
    fn spawn(&self, command: &LaunchCommand) -> io::Result<u32> {
        let child = Command::new(command.program())
            .args(command.args())
            .env_clear()
            .envs(command.env())
            .current_dir(command.working_dir())
            .spawn()?;
        let pid = child.id();
        debug!(pid, program = command.program(), "spawned child process");
        reap_in_background(child);
        Ok(pid)
    }
}

fn reap_in_background(mut child: Child) {
    let pid = child.id();
    let spawned = thread::Builder::new()
        .name(format!("reap-{pid}"))
        .spawn(move || match child.wait() {
            Ok(status) => debug!(pid, %status, "child process exited"),
            Err(err) => debug!(pid, error = %err, "failed to wait for child process"),
        });
    if let Err(err) = spawned {
        debug!(pid, error = %err, "could not start reaper thread");
    }
}
