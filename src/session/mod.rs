//! Persistent registry of running notebook sessions.
//!
//! Every launched notebook server is recorded in `.marimo/sessions.json`
//! under the project root so that later invocations can see what is running.
//! Entries are keyed by process id and pruned by probing whether the process
//! still exists. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Registry services in [`services`]
//!
//! Writes are full read-modify-write rewrites without locking: when two
//! processes register concurrently, the last writer wins.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
