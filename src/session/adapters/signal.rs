//! Liveness probe using `kill(pid, 0)`.

use crate::session::{domain::ProcessLiveness, ports::ProcessProbe};

/// Probes processes by sending the null signal.
///
/// `ESRCH` means dead and `EPERM` means the process exists but belongs to
/// another user. Any other failure is reported as inaccessible so that an
/// unexpected error never prunes a live session. Pids that do not name a
/// single process (zero, or too large for `pid_t`) are dead.
///
/// On non-Unix targets every pid reports as inaccessible, which keeps all
/// sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalProcessProbe;

impl SignalProcessProbe {
    /// Creates a signal-based probe.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
impl ProcessProbe for SignalProcessProbe {
    fn liveness(&self, pid: u32) -> ProcessLiveness {
        use nix::errno::Errno;
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        let Ok(raw_pid) = i32::try_from(pid) else {
            return ProcessLiveness::Dead;
        };
        if raw_pid <= 0 {
            return ProcessLiveness::Dead;
        }

        match kill(Pid::from_raw(raw_pid), None) {
            Ok(()) => ProcessLiveness::Alive,
            Err(Errno::ESRCH) => ProcessLiveness::Dead,
            Err(_) => ProcessLiveness::Inaccessible,
        }
    }
}

#[cfg(not(unix))]
impl ProcessProbe for SignalProcessProbe {
    fn liveness(&self, _pid: u32) -> ProcessLiveness {
        ProcessLiveness::Inaccessible
    }
}
