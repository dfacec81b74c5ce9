//! Adapter implementations for the bind-test port.

pub mod memory;

mod tcp;

pub use tcp::TcpPortProbe;
