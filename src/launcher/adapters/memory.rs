//! Recording spawner for tests and dry runs.

use crate::launcher::{domain::LaunchCommand, ports::ProcessSpawner};
use std::io;
use std::sync::{Arc, PoisonError, RwLock};

const FIRST_FAKE_PID: u32 = 40_000;

/// Spawner that records commands and hands out sequential fake pids.
///
/// Clones share state. Commands whose arguments contain a configured
/// fragment fail with `NotFound`, mimicking a missing executable.
#[derive(Debug, Clone)]
pub struct RecordingProcessSpawner {
    state: Arc<RwLock<SpawnerState>>,
}

#[derive(Debug)]
struct SpawnerState {
    next_pid: Option<u32>,
    commands: Vec<LaunchCommand>,
    failing_fragments: Vec<String>,
}

impl RecordingProcessSpawner {
    /// Creates a spawner whose first pid is 40000.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(FIRST_FAKE_PID)
    }

    /// Creates a spawner whose first pid is `pid`.
    ///
    /// Once `u32::MAX` has been handed out, further spawns fail.
    #[must_use]
    pub fn starting_at(pid: u32) -> Self {
        Self {
            state: Arc::new(RwLock::new(SpawnerState {
                next_pid: Some(pid),
                commands: Vec::new(),
                failing_fragments: Vec::new(),
            })),
        }
    }

    /// Makes every command with an argument containing `fragment` fail.
    pub fn fail_when_arg_contains(&self, fragment: impl Into<String>) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .failing_fragments
            .push(fragment.into());
    }

    /// Returns the successfully spawned commands in order.
    #[must_use]
    pub fn commands(&self) -> Vec<LaunchCommand> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .commands
            .clone()
    }
}

impl Default for RecordingProcessSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSpawner for RecordingProcessSpawner {
    fn spawn(&self, command: &LaunchCommand) -> io::Result<u32> {
        let mut state = self
            .state
            .write()
            .map_err(|err| io::Error::other(err.to_string()))?;

        let fails = command.args().iter().any(|arg| {
            state
                .failing_fragments
                .iter()
                .any(|fragment| arg.contains(fragment.as_str()))
        });
        if fails {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("cannot spawn {}", command.program()),
            ));
        }

        let pid = state
            .next_pid
            .ok_or_else(|| io::Error::other("fake pid space exhausted"))?;
        state.next_pid = pid.checked_add(1);
        state.commands.push(command.clone());
        Ok(pid)
    }
}
