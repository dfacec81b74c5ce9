//! Error types for port configuration and allocation.

use super::PortRange;
use thiserror::Error;

/// Errors returned while constructing port configuration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PortConfigError {
    /// A port number lies outside `1..=65535`.
    #[error("port {0} is outside the valid range 1-65535")]
    PortOutOfRange(u32),

    /// The range start is greater than the range end.
    #[error("invalid port range {start}-{end}: start must not exceed end")]
    InvertedRange {
        /// Requested first port.
        start: u32,
        /// Requested last port.
        end: u32,
    },

    /// A textual port or range specification could not be parsed.
    #[error("invalid port specification '{0}', expected 'start-end' or a single port")]
    InvalidSpec(String),
}

/// Errors returned when no port can be handed out.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PortAllocationError {
    /// The fixed port failed its bind-test.
    #[error("port {port} already in use on {host}")]
    FixedPortInUse {
        /// Host the bind-test ran against.
        host: String,
        /// The configured fixed port.
        port: u16,
    },

    /// Every port of the configured range failed its bind-test.
    #[error("no free port in range {range} on {host}")]
    RangeExhausted {
        /// Host the bind-test ran against.
        host: String,
        /// The scanned range.
        range: PortRange,
    },
}
