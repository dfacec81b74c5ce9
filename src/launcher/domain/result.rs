//! Launch outcome record.

use serde::{Deserialize, Serialize};

/// What was actually launched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchResult {
    notebook: String,
    port: u16,
    pid: u32,
    url: String,
    command: Vec<String>,
}

impl LaunchResult {
    /// Creates a launch record.
    #[must_use]
    pub const fn new(
        notebook: String,
        port: u16,
        pid: u32,
        url: String,
        command: Vec<String>,
    ) -> Self {
        Self {
            notebook,
            port,
            pid,
            url,
            command,
        }
    }

    /// Returns the notebook label.
    #[must_use]
    pub fn notebook(&self) -> &str {
        &self.notebook
    }

    /// Returns the port the server was told to bind.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the child process id.
    #[must_use]
    pub const fn pid(&self) -> u32 {
        self.pid
    }

    /// Returns the display URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the exact command line that was spawned.
    #[must_use]
    pub fn command(&self) -> &[String] {
        &self.command
    }
}
