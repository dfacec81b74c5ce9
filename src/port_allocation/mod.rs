//! TCP port allocation for notebook servers.
//!
//! A notebook server needs a port before it is spawned. This module decides
//! which one by bind-testing candidates: either a single operator-supplied
//! fixed port, or the first bindable port of a configured range. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Allocation services in [`services`]
//!
//! Bind-testing is a check-then-act race: nothing stops another process from
//! taking the port between the probe and the notebook server's own bind.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
