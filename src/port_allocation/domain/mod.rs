//! Domain model for port allocation.
//!
//! Port ranges and allocation policies are validated value objects. Socket
//! access stays outside this boundary.

mod error;
mod policy;
mod range;

pub use error::{PortAllocationError, PortConfigError};
pub use policy::{
    BIND_HOST_VAR, DEFAULT_BIND_HOST, FIXED_PORT_VAR, PORT_RANGE_VAR, PortPolicy,
};
pub use range::{PortRange, parse_port};
