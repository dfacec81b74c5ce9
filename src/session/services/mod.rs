//! Application services for the session registry.

mod registry;

pub use registry::{SessionRegistry, SessionRegistryError, SessionRegistryResult};
