//! Port contracts for session persistence and process liveness.

mod process;
mod store;

pub use process::ProcessProbe;
pub use store::{SessionStore, SessionStoreError, SessionStoreResult};
