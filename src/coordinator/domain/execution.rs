//! Agent execution record.

use super::{AnalysisAgent, CoordinatorDomainError, ExecutionStatus};
use crate::launcher::domain::LaunchResult;
use camino::Utf8PathBuf;
use serde::Serialize;

/// A launched agent together with its launch record and reported status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentExecution {
    agent: AnalysisAgent,
    launch: LaunchResult,
    status: ExecutionStatus,
    outputs: Vec<Utf8PathBuf>,
}

impl AgentExecution {
    /// Creates a `Running` execution without outputs.
    #[must_use]
    pub const fn new(agent: AnalysisAgent, launch: LaunchResult) -> Self {
        Self {
            agent,
            launch,
            status: ExecutionStatus::Running,
            outputs: Vec::new(),
        }
    }

    /// Returns the agent definition.
    #[must_use]
    pub const fn agent(&self) -> &AnalysisAgent {
        &self.agent
    }

    /// Returns the launch record.
    #[must_use]
    pub const fn launch(&self) -> &LaunchResult {
        &self.launch
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> ExecutionStatus {
        self.status
    }

    /// Returns the output paths reported so far.
    #[must_use]
    pub fn outputs(&self) -> &[Utf8PathBuf] {
        &self.outputs
    }

    /// Moves the execution to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorDomainError::InvalidStatusTransition`] unless the
    /// execution is running and `target` is terminal.
    pub fn transition_to(&mut self, target: ExecutionStatus) -> Result<(), CoordinatorDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(CoordinatorDomainError::InvalidStatusTransition {
                from: self.status.as_str().to_owned(),
                to: target.as_str().to_owned(),
            });
        }
        self.status = target;
        Ok(())
    }

    /// Appends an output path.
    pub fn record_output(&mut self, path: impl Into<Utf8PathBuf>) {
        self.outputs.push(path.into());
    }
}
