//! Storage port for persisted session entries.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for session store operations.
pub type SessionStoreResult<T> = Result<T, SessionStoreError>;

/// Whole-document storage for raw session entries.
///
/// Implementations do not lock: `save` replaces whatever is stored, so
/// concurrent read-modify-write cycles resolve as last-writer-wins.
pub trait SessionStore: Send + Sync {
    /// Loads every stored entry.
    ///
    /// Missing or undecodable content yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Persistence`] when the backing storage
    /// cannot be read at all.
    fn load(&self) -> SessionStoreResult<Vec<Value>>;

    /// Replaces the stored entries.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Persistence`] when the write fails.
    fn save(&self, entries: &[Value]) -> SessionStoreResult<()>;
}

/// Errors returned by session store implementations.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    /// Persistence-layer failure.
    #[error("session store error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SessionStoreError {
    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
