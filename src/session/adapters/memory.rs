//! In-memory adapters for session storage and liveness.

use crate::session::{
    domain::ProcessLiveness,
    ports::{ProcessProbe, SessionStore, SessionStoreError, SessionStoreResult},
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Thread-safe in-memory session store.
///
/// Clones share state. The number of saves is tracked so tests can tell
/// whether a rewrite happened.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    entries: Vec<Value>,
    saves: usize,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with raw entries.
    #[must_use]
    pub fn with_entries(entries: Vec<Value>) -> Self {
        let store = Self::new();
        store
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entries = entries;
        store
    }

    /// Returns the stored raw entries.
    #[must_use]
    pub fn entries(&self) -> Vec<Value> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.entries.clone()
    }

    /// Returns how many times entries were saved.
    #[must_use]
    pub fn save_count(&self) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.saves
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> SessionStoreResult<Vec<Value>> {
        let state = self.state.read().map_err(|err| {
            SessionStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.entries.clone())
    }

    fn save(&self, entries: &[Value]) -> SessionStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            SessionStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.entries = entries.to_vec();
        state.saves += 1;
        Ok(())
    }
}

/// Liveness probe with scripted answers.
///
/// Unknown pids are alive.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProcessProbe {
    outcomes: Arc<RwLock<BTreeMap<u32, ProcessLiveness>>>,
}

impl InMemoryProcessProbe {
    /// Creates a probe that reports every pid as alive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the outcome for `pid`.
    pub fn set(&self, pid: u32, liveness: ProcessLiveness) {
        self.outcomes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(pid, liveness);
    }

    /// Marks `pid` as dead.
    pub fn mark_dead(&self, pid: u32) {
        self.set(pid, ProcessLiveness::Dead);
    }
}

impl ProcessProbe for InMemoryProcessProbe {
    fn liveness(&self, pid: u32) -> ProcessLiveness {
        self.outcomes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&pid)
            .copied()
            .unwrap_or(ProcessLiveness::Alive)
    }
}
