//! Fully resolved child process command.

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;

/// A command ready to spawn: executable, arguments, complete environment and
/// working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    program: String,
    args: Vec<String>,
    env: BTreeMap<String, String>,
    working_dir: Utf8PathBuf,
}

impl LaunchCommand {
    /// Creates a command. `env` replaces the child's environment entirely.
    #[must_use]
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        env: BTreeMap<String, String>,
        working_dir: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            env,
            working_dir: working_dir.into(),
        }
    }

    /// Returns the executable.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the child environment.
    #[must_use]
    pub const fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Returns the working directory.
    #[must_use]
    pub fn working_dir(&self) -> &Utf8Path {
        &self.working_dir
    }

    /// Returns the command line: executable followed by arguments.
    #[must_use]
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}
