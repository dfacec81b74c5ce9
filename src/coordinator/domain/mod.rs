//! Domain model for analysis agents and their executions.

mod agent;
mod error;
mod execution;
mod manifest;
mod status;
mod summary;

pub use agent::{AgentName, AnalysisAgent};
pub use error::CoordinatorDomainError;
pub use execution::AgentExecution;
pub use manifest::AgentManifest;
pub use status::ExecutionStatus;
pub use summary::{ExecutionSummary, StatusSummary};
