//! Process liveness outcome.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of asking the OS whether a process id exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessLiveness {
    /// The process exists and may be signalled.
    Alive,
    /// No process has this id.
    Dead,
    /// The process exists but belongs to someone else.
    Inaccessible,
}

impl ProcessLiveness {
    /// Returns whether the session should be kept. Inaccessible processes
    /// still exist, so they count as alive.
    #[must_use]
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive | Self::Inaccessible)
    }

    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alive => "alive",
            Self::Dead => "dead",
            Self::Inaccessible => "inaccessible",
        }
    }
}

impl fmt::Display for ProcessLiveness {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
