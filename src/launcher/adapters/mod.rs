//! Adapter implementations for the process spawning port.

pub mod memory;

mod process;

pub use process::OsProcessSpawner;
