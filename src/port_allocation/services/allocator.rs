//! Port allocator service.

use crate::port_allocation::{
    adapters::TcpPortProbe,
    domain::{PortAllocationError, PortPolicy},
    ports::PortProbe,
};
use tracing::debug;

/// Result type for port allocation.
pub type PortAllocationResult<T> = Result<T, PortAllocationError>;

/// Hands out ports according to a [`PortPolicy`].
#[derive(Debug, Clone)]
pub struct PortAllocator<P>
where
    P: PortProbe,
{
    policy: PortPolicy,
    probe: P,
}

impl<P> PortAllocator<P>
where
    P: PortProbe,
{
    /// Creates an allocator that bind-tests through `probe`.
    #[must_use]
    pub const fn new(policy: PortPolicy, probe: P) -> Self {
        Self { policy, probe }
    }

    /// Returns the allocation policy.
    #[must_use]
    pub const fn policy(&self) -> &PortPolicy {
        &self.policy
    }

    /// Picks a port.
    ///
    /// With a fixed port, exactly one bind-test runs on it and there is no
    /// fallback to the range. Otherwise the range is scanned in ascending
    /// order and the first bindable port is returned.
    ///
    /// # Errors
    ///
    /// Returns [`PortAllocationError::FixedPortInUse`] when the fixed port is
    /// taken, or [`PortAllocationError::RangeExhausted`] when no port of the
    /// range is free.
    pub fn allocate(&self) -> PortAllocationResult<u16> {
        let host = self.policy.host();

        if let Some(port) = self.policy.fixed_port() {
            if self.probe.is_bindable(host, port) {
                debug!(host, port, "allocated fixed port");
                return Ok(port);
            }
            return Err(PortAllocationError::FixedPortInUse {
                host: host.to_owned(),
                port,
            });
        }

        let range = self.policy.range();
        let port = range
            .iter()
            .find(|&candidate| self.probe.is_bindable(host, candidate))
            .ok_or_else(|| PortAllocationError::RangeExhausted {
                host: host.to_owned(),
                range,
            })?;
        debug!(host, port, %range, "allocated port from range");
        Ok(port)
    }
}

impl PortAllocator<TcpPortProbe> {
    /// Creates an allocator that bind-tests real sockets.
    #[must_use]
    pub const fn tcp(policy: PortPolicy) -> Self {
        Self::new(policy, TcpPortProbe::new())
    }
}
