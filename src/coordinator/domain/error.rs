//! Error types for coordinator domain validation.

use thiserror::Error;

/// Errors returned while constructing or mutating coordinator domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoordinatorDomainError {
    /// The agent name is empty after trimming.
    #[error("agent name must not be empty")]
    EmptyAgentName,

    /// Transitioning between two execution statuses is invalid.
    #[error("invalid execution status transition: {from} -> {to}")]
    InvalidStatusTransition {
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },
}

