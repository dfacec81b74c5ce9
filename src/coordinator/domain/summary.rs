//! Read-only status snapshots.

use super::{AgentExecution, ExecutionStatus};
use serde::Serialize;

/// One row of a [`StatusSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionSummary {
    /// Agent name.
    pub agent: String,
    /// Display URL of the notebook server.
    pub url: String,
    /// Port the notebook server was told to bind.
    pub port: u16,
    /// Current status.
    pub status: ExecutionStatus,
}

impl From<&AgentExecution> for ExecutionSummary {
    fn from(execution: &AgentExecution) -> Self {
        Self {
            agent: execution.agent().name().to_string(),
            url: execution.launch().url().to_owned(),
            port: execution.launch().port(),
            status: execution.status(),
        }
    }
}

/// Snapshot of the coordinator's agents and executions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    /// Number of registered agents, launched or not.
    pub total_agents: usize,
    /// Executions currently running.
    pub running: usize,
    /// Executions marked completed.
    pub completed: usize,
    /// Executions marked failed.
    pub failed: usize,
    /// Every execution, ordered by agent name.
    pub executions: Vec<ExecutionSummary>,
}

impl StatusSummary {
    /// Builds a summary from the registered agent count and executions.
    #[must_use]
    pub fn new<'a>(
        total_agents: usize,
        executions: impl IntoIterator<Item = &'a AgentExecution>,
    ) -> Self {
        let rows: Vec<ExecutionSummary> =
            executions.into_iter().map(ExecutionSummary::from).collect();
        let count =
            |status: ExecutionStatus| rows.iter().filter(|row| row.status == status).count();

        Self {
            total_agents,
            running: count(ExecutionStatus::Running),
            completed: count(ExecutionStatus::Completed),
            failed: count(ExecutionStatus::Failed),
            executions: rows,
        }
    }

    /// Returns the number of executions in `status`.
    #[must_use]
    pub const fn count(&self, status: ExecutionStatus) -> usize {
        match status {
            ExecutionStatus::Running => self.running,
            ExecutionStatus::Completed => self.completed,
            ExecutionStatus::Failed => self.failed,
        }
    }
}
