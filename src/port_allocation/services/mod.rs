//! Application services for port allocation.

mod allocator;

pub use allocator::{PortAllocationResult, PortAllocator};
