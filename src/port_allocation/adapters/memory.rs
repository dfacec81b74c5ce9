//! In-memory bind-test adapter.

use crate::port_allocation::ports::PortProbe;
use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

/// Bind-test adapter backed by a set of occupied ports.
///
/// Clones share state, so a test can keep one handle to occupy ports while an
/// allocator probes through another. Every probe is recorded in order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPortProbe {
    state: Arc<RwLock<ProbeState>>,
}

#[derive(Debug, Default)]
struct ProbeState {
    occupied: BTreeSet<u16>,
    probed: Vec<u16>,
}

impl InMemoryPortProbe {
    /// Creates a probe where every port is free.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks ports as occupied.
    pub fn occupy(&self, ports: impl IntoIterator<Item = u16>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.occupied.extend(ports);
    }

    /// Marks a port as free again.
    pub fn release(&self, port: u16) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.occupied.remove(&port);
    }

    /// Returns every probed port in probe order.
    #[must_use]
    pub fn probed(&self) -> Vec<u16> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.probed.clone()
    }
}

impl PortProbe for InMemoryPortProbe {
    fn is_bindable(&self, _host: &str, port: u16) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.probed.push(port);
        !state.occupied.contains(&port)
    }
}
