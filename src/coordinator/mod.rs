//! Dependency-aware coordination of analysis agent notebooks.
//!
//! The coordinator keeps a named set of agents, launches an agent only after
//! every agent it depends on has been marked `completed`, and launches
//! batches without letting one failure stop the rest. It never observes
//! notebook completion itself; callers report it through the status hooks.
//!
//! - Domain types in [`domain`]
//! - Coordination services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
