//! Port contracts for port allocation.

mod probe;

pub use probe::PortProbe;
