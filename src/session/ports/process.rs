//! Process liveness port.

use crate::session::domain::ProcessLiveness;

/// Answers whether a process id still refers to a running process.
pub trait ProcessProbe: Send + Sync {
    /// Probes `pid` without affecting the process.
    fn liveness(&self, pid: u32) -> ProcessLiveness;
}
