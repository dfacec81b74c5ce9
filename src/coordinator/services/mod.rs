//! Application services for agent coordination.

mod coordinator;

pub use coordinator::{
    AGENT_NAME_VAR, AGENT_PORT_VAR, CoordinatorError, CoordinatorResult, LaunchFailure,
    ParallelCoordinator, ParallelLaunchReport, REPORTS_DIR_VAR,
};
