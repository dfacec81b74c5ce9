//! Socket-backed bind-test adapter.

use crate::port_allocation::ports::PortProbe;
use std::net::TcpListener;
use tracing::debug;

/// Bind-tests ports by opening and immediately dropping a real listener.
///
/// `std::net::TcpListener` sets `SO_REUSEADDR` on Unix, so sockets lingering
/// in `TIME_WAIT` do not read as occupied.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpPortProbe;

impl TcpPortProbe {
    /// Creates a socket-backed probe.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PortProbe for TcpPortProbe {
    fn is_bindable(&self, host: &str, port: u16) -> bool {
        match TcpListener::bind((host, port)) {
            Ok(listener) => {
                drop(listener);
                true
            }
            Err(err) => {
                debug!(host, port, error = %err, "bind-test failed");
                false
            }
        }
    }
}
