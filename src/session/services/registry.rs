//! Session registry service.

use crate::session::{
    domain::{SessionInfo, entry_pid},
    ports::{ProcessProbe, SessionStore, SessionStoreError},
};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for session registry operations.
#[derive(Debug, Error)]
pub enum SessionRegistryError {
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] SessionStoreError),
    /// A session record could not be encoded as JSON.
    #[error("failed to encode session record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for session registry operations.
pub type SessionRegistryResult<T> = Result<T, SessionRegistryError>;

/// Durable record of launched notebook processes.
pub struct SessionRegistry<S, L>
where
    S: SessionStore,
    L: ProcessProbe,
{
    store: Arc<S>,
    liveness: Arc<L>,
}

impl<S, L> SessionRegistry<S, L>
where
    S: SessionStore,
    L: ProcessProbe,
{
    /// Creates a registry over `store`, probing processes through `liveness`.
    #[must_use]
    pub const fn new(store: Arc<S>, liveness: Arc<L>) -> Self {
        Self { store, liveness }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records a session, replacing any entry with the same pid.
    ///
    /// # Errors
    ///
    /// Returns [`SessionRegistryError`] when the store cannot be read or
    /// written.
    pub fn register_session(&self, session: &SessionInfo) -> SessionRegistryResult<()> {
        let mut entries = self.store.load()?;
        let before = entries.len();
        entries.retain(|entry| entry_pid(entry) != Some(session.pid()));
        if entries.len() != before {
            debug!(pid = session.pid(), "replacing session with the same pid");
        }

        entries.push(serde_json::to_value(session)?);
        self.store.save(&entries)?;
        info!(
            notebook = session.notebook(),
            pid = session.pid(),
            port = session.port(),
            "session registered"
        );
        Ok(())
    }

    /// Returns every well-formed persisted session.
    ///
    /// Entries that do not decode into a [`SessionInfo`] are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SessionRegistryError::Store`] when the store cannot be read.
    pub fn list_sessions(&self) -> SessionRegistryResult<Vec<SessionInfo>> {
        let sessions = self
            .store
            .load()?
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<SessionInfo>(entry).ok())
            .collect();
        Ok(sessions)
    }

    /// Removes entries whose process is gone and returns how many were
    /// removed.
    ///
    /// Entries without a usable pid count as dead. Processes that exist but
    /// cannot be signalled are kept. The store is only rewritten when
    /// something was removed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionRegistryError::Store`] when the store cannot be read
    /// or written.
    pub fn cleanup_dead_sessions(&self) -> SessionRegistryResult<usize> {
        let entries = self.store.load()?;
        let total = entries.len();
        let survivors: Vec<Value> = entries
            .into_iter()
            .filter(|entry| self.is_alive(entry))
            .collect();

        let removed = total - survivors.len();
        if removed > 0 {
            self.store.save(&survivors)?;
            info!(removed, "pruned dead sessions");
        }
        Ok(removed)
    }

    fn is_alive(&self, entry: &Value) -> bool {
        entry_pid(entry).is_some_and(|pid| {
            let liveness = self.liveness.liveness(pid);
            debug!(pid, %liveness, "probed session process");
            liveness.is_alive()
        })
    }
}
