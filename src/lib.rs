//! Marimo fleet: orchestration of marimo notebook servers.
//!
//! This crate launches notebook servers as child processes on allocated TCP
//! ports, keeps a durable record of the running sessions, and sequences
//! groups of "analysis agent" notebooks by their dependencies.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure values and rules with no infrastructure dependencies
//! - **Ports**: Trait interfaces for sockets, processes and storage
//! - **Adapters**: Concrete implementations of ports, plus in-memory doubles
//!
//! # Modules
//!
//! - [`port_allocation`]: Bind-tested port selection from a range or a fixed
//!   port
//! - [`session`]: The `.marimo/sessions.json` registry and liveness pruning
//! - [`launcher`]: Spawning notebook servers and registering their sessions
//! - [`coordinator`]: Dependency-gated launching of analysis agents
//! - [`config`]: Explicit configuration built from the environment
//! - [`system`]: Production wiring of the above

pub mod config;
pub mod coordinator;
pub mod launcher;
pub mod port_allocation;
pub mod session;
pub mod system;
