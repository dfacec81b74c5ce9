//! Domain model for notebook sessions.

mod document;
mod info;
mod liveness;

pub use document::{decode_session_document, encode_session_document, entry_pid};
pub use info::{NewSession, SessionInfo};
pub use liveness::ProcessLiveness;
