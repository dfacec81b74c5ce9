//! Session record value object.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One launched notebook-serving process.
///
/// Identity is the process id: registering a record whose `pid` matches an
/// existing one replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    notebook: String,
    port: u16,
    pid: u32,
    host: String,
    url: String,
    started_at: DateTime<Utc>,
}

/// Parameter object for recording a freshly launched session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    /// Notebook label, relative to the project root when possible.
    pub notebook: String,
    /// Port the server was told to bind.
    pub port: u16,
    /// Process id of the server.
    pub pid: u32,
    /// Host the server was told to bind.
    pub host: String,
    /// URL shown to the user.
    pub url: String,
}

impl SessionInfo {
    /// Creates a session record stamped with the current time.
    #[must_use]
    pub fn new(session: NewSession, clock: &impl Clock) -> Self {
        Self {
            notebook: session.notebook,
            port: session.port,
            pid: session.pid,
            host: session.host,
            url: session.url,
            started_at: clock.utc(),
        }
    }

    /// Returns the notebook label.
    #[must_use]
    pub fn notebook(&self) -> &str {
        &self.notebook
    }

    /// Returns the bound port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the process id.
    #[must_use]
    pub const fn pid(&self) -> u32 {
        self.pid
    }

    /// Returns the bound host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the display URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns when the session was recorded.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
