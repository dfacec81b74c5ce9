//! Notebook server launching.
//!
//! Launching resolves a notebook under the project root, allocates a port,
//! spawns the notebook runtime as a child process and records the session.
//! The call returns as soon as the child exists; it never waits for the
//! server to accept connections. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Launch services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
