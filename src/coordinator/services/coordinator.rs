//! Parallel agent coordinator service.

use crate::config::FleetConfig;
use crate::coordinator::domain::{
    AgentExecution, AgentName, AnalysisAgent, CoordinatorDomainError, ExecutionStatus,
    StatusSummary,
};
use crate::launcher::{
    domain::LaunchRequest,
    ports::{LaunchError, NotebookLaunch},
};
use crate::port_allocation::{
    domain::PortAllocationError, ports::PortProbe, services::PortAllocator,
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::collections::BTreeMap;
use std::io;
use thiserror::Error;
use tracing::{info, warn};

/// Variable carrying the agent name into the notebook process.
pub const AGENT_NAME_VAR: &str = "ANALYSIS_AGENT_NAME";

/// Variable carrying the absolute reports directory.
pub const REPORTS_DIR_VAR: &str = "ANALYSIS_REPORTS_DIR";

/// Variable carrying the pre-flight allocated port.
pub const AGENT_PORT_VAR: &str = "ANALYSIS_AGENT_PORT";

/// Service-level errors for coordinator operations.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CoordinatorDomainError),

    /// No agent is registered under the name.
    #[error("unknown agent: {0}")]
    UnknownAgent(String),

    /// The agent has never been launched.
    #[error("agent {0} has no execution")]
    NotLaunched(String),

    /// A dependency has not reached `completed`.
    #[error("agent {agent} depends on {dependency}, which has not completed")]
    UnmetDependency {
        /// Agent being launched.
        agent: String,
        /// First dependency that is not completed.
        dependency: String,
    },

    /// The pre-flight port allocation failed.
    #[error(transparent)]
    PortAllocation(#[from] PortAllocationError),

    /// The launcher failed.
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// The reports directory could not be created.
    #[error("failed to create reports directory {path}: {source}")]
    ReportsDir {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Result type for coordinator operations.
pub type CoordinatorResult<T> = Result<T, CoordinatorError>;

/// An agent of a batch that could not be launched.
#[derive(Debug)]
pub struct LaunchFailure {
    /// Requested agent name.
    pub agent: String,
    /// Why the launch failed.
    pub error: CoordinatorError,
}

/// Outcome of [`ParallelCoordinator::launch_parallel`].
#[derive(Debug, Default)]
pub struct ParallelLaunchReport {
    /// Executions that started, in request order.
    pub launched: Vec<AgentExecution>,
    /// Agents that did not start, in request order.
    pub failed: Vec<LaunchFailure>,
}

impl ParallelLaunchReport {
    /// Returns whether every requested agent started.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Launches analysis agents in dependency order.
///
/// The coordinator is the single writer of its agent and execution maps.
/// Launching is gated on dependencies having been marked completed; nothing
/// waits for a dependency to finish.
pub struct ParallelCoordinator<L, P>
where
    L: NotebookLaunch,
    P: PortProbe,
{
    reports_dir: Utf8PathBuf,
    launcher: L,
    allocator: PortAllocator<P>,
    agents: BTreeMap<AgentName, AnalysisAgent>,
    executions: BTreeMap<AgentName, AgentExecution>,
}

impl<L, P> ParallelCoordinator<L, P>
where
    L: NotebookLaunch,
    P: PortProbe,
{
    /// Creates a coordinator and ensures `reports_dir` exists.
    ///
    /// A relative `reports_dir` is resolved against the project root. The
    /// pre-flight allocator uses the configured port policy and `probe`.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::ReportsDir`] when the directory cannot be
    /// created.
    pub fn new(
        config: &FleetConfig,
        reports_dir: &Utf8Path,
        launcher: L,
        probe: P,
    ) -> CoordinatorResult<Self> {
        let resolved = if reports_dir.is_absolute() {
            reports_dir.to_owned()
        } else {
            config.project_root().join(reports_dir)
        };
        Dir::create_ambient_dir_all(&resolved, ambient_authority()).map_err(|source| {
            CoordinatorError::ReportsDir {
                path: resolved.clone(),
                source,
            }
        })?;

        Ok(Self {
            reports_dir: resolved,
            launcher,
            allocator: PortAllocator::new(config.port_policy().clone(), probe),
            agents: BTreeMap::new(),
            executions: BTreeMap::new(),
        })
    }

    /// Returns the reports directory.
    #[must_use]
    pub fn reports_dir(&self) -> &Utf8Path {
        &self.reports_dir
    }

    /// Returns the launcher.
    #[must_use]
    pub const fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Registers an agent, replacing any agent with the same name.
    pub fn register_agent(&mut self, agent: AnalysisAgent) {
        if self.agents.contains_key(agent.name()) {
            warn!(agent = %agent.name(), "replacing registered agent");
        }
        self.agents.insert(agent.name().clone(), agent);
    }

    /// Returns the registered agent called `name`.
    #[must_use]
    pub fn agent(&self, name: &str) -> Option<&AnalysisAgent> {
        self.agents.get(name)
    }

    /// Returns the latest execution of `name`.
    #[must_use]
    pub fn execution(&self, name: &str) -> Option<&AgentExecution> {
        self.executions.get(name)
    }

    /// Launches one agent.
    ///
    /// The agent's notebook receives `ANALYSIS_AGENT_NAME`,
    /// `ANALYSIS_REPORTS_DIR` and `ANALYSIS_AGENT_PORT`, overlaid by the
    /// agent's own environment. The port variable comes from a pre-flight
    /// allocation and is only a hint: the server binds whatever port the
    /// launcher allocates. A successful launch replaces any earlier
    /// execution of the agent.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::UnknownAgent`] for unregistered names,
    /// [`CoordinatorError::UnmetDependency`] when a dependency has not
    /// completed, and allocation or launch errors otherwise. On error the
    /// coordinator is left unchanged.
    pub fn launch_agent(&mut self, name: &str) -> CoordinatorResult<AgentExecution> {
        let agent = self
            .agents
            .get(name)
            .ok_or_else(|| CoordinatorError::UnknownAgent(name.to_owned()))?;
        self.check_dependencies(agent)?;

        let port = self.allocator.allocate()?;
        let request = LaunchRequest::new(agent.notebook()).with_env(self.agent_env(agent, port));
        let launch = self.launcher.launch(&request)?;
        info!(
            agent = %agent.name(),
            pid = launch.pid(),
            url = launch.url(),
            "agent launched"
        );

        let execution = AgentExecution::new(agent.clone(), launch);
        self.executions.insert(agent.name().clone(), execution.clone());
        Ok(execution)
    }

    /// Launches every named agent in order.
    ///
    /// A failing agent is logged and reported; the remaining agents still
    /// launch. Dependencies are checked per agent at its turn, so an agent
    /// whose dependency launches earlier in the same batch is still refused
    /// because that dependency is only `running`.
    pub fn launch_parallel<I, N>(&mut self, names: I) -> ParallelLaunchReport
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let mut report = ParallelLaunchReport::default();
        for requested in names {
            let name = requested.as_ref();
            match self.launch_agent(name) {
                Ok(execution) => report.launched.push(execution),
                Err(error) => {
                    warn!(agent = name, error = %error, "agent launch failed");
                    report.failed.push(LaunchFailure {
                        agent: name.to_owned(),
                        error,
                    });
                }
            }
        }
        report
    }

    /// Returns a snapshot of registered agents and executions.
    #[must_use]
    pub fn status_summary(&self) -> StatusSummary {
        StatusSummary::new(self.agents.len(), self.executions.values())
    }

    /// Sets the status of the agent's latest execution.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::NotLaunched`] when the agent has no
    /// execution, or [`CoordinatorError::Domain`] when the transition is not
    /// `running -> completed | failed`.
    pub fn set_status(
        &mut self,
        name: &str,
        status: ExecutionStatus,
    ) -> CoordinatorResult<&AgentExecution> {
        let execution = self.execution_mut(name)?;
        execution.transition_to(status)?;
        info!(agent = name, %status, "agent status updated");
        Ok(execution)
    }

    /// Marks the agent completed, recording its outputs.
    ///
    /// # Errors
    ///
    /// See [`Self::set_status`]. Outputs are only recorded when the
    /// transition succeeds.
    pub fn mark_completed<I, O>(
        &mut self,
        name: &str,
        outputs: I,
    ) -> CoordinatorResult<&AgentExecution>
    where
        I: IntoIterator<Item = O>,
        O: Into<Utf8PathBuf>,
    {
        let execution = self.execution_mut(name)?;
        execution.transition_to(ExecutionStatus::Completed)?;
        for output in outputs {
            execution.record_output(output);
        }
        info!(agent = name, outputs = execution.outputs().len(), "agent completed");
        Ok(execution)
    }

    /// Marks the agent failed.
    ///
    /// # Errors
    ///
    /// See [`Self::set_status`].
    pub fn mark_failed(&mut self, name: &str) -> CoordinatorResult<&AgentExecution> {
        self.set_status(name, ExecutionStatus::Failed)
    }

    /// Appends an output path to the agent's latest execution.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::NotLaunched`] when the agent has no
    /// execution.
    pub fn record_output(
        &mut self,
        name: &str,
        path: impl Into<Utf8PathBuf>,
    ) -> CoordinatorResult<&AgentExecution> {
        let execution = self.execution_mut(name)?;
        execution.record_output(path);
        Ok(execution)
    }

    fn execution_mut(&mut self, name: &str) -> CoordinatorResult<&mut AgentExecution> {
        self.executions
            .get_mut(name)
            .ok_or_else(|| CoordinatorError::NotLaunched(name.to_owned()))
    }

    fn check_dependencies(&self, agent: &AnalysisAgent) -> CoordinatorResult<()> {
        let unmet = agent.depends_on().iter().find(|dependency| {
            self.executions
                .get(dependency.as_str())
                .is_none_or(|execution| execution.status() != ExecutionStatus::Completed)
        });

        match unmet {
            Some(dependency) => Err(CoordinatorError::UnmetDependency {
                agent: agent.name().to_string(),
                dependency: dependency.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn agent_env(&self, agent: &AnalysisAgent, port: u16) -> BTreeMap<String, String> {
        let mut env = BTreeMap::from([
            (AGENT_NAME_VAR.to_owned(), agent.name().to_string()),
            (REPORTS_DIR_VAR.to_owned(), self.reports_dir.to_string()),
            (AGENT_PORT_VAR.to_owned(), port.to_string()),
        ]);
        env.extend(
            agent
                .env()
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        env
    }
}
