//! Adapter implementations for session storage and liveness ports.

pub mod memory;

mod json_file;
mod signal;

pub use json_file::{JsonFileSessionStore, STATE_DIR};
pub use signal::SignalProcessProbe;
