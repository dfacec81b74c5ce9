//! Execution status of a launched agent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an agent execution.
///
/// Every execution starts `Running`. The only allowed transitions are
/// `Running -> Completed` and `Running -> Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// The notebook process was launched.
    Running,
    /// The agent reported success.
    Completed,
    /// The agent reported failure.
    Failed,
}

impl ExecutionStatus {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Returns whether transition to `target` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Running, Self::Completed | Self::Failed)
        )
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
