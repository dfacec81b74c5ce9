//! JSON file session store scoped to a project root.

use crate::config::DEFAULT_REGISTRY_FILE;
use crate::session::{
    domain::{decode_session_document, encode_session_document},
    ports::{SessionStore, SessionStoreError, SessionStoreResult},
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde_json::Value;
use std::fmt;
use std::io;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Directory under the project root that holds runtime state.
pub const STATE_DIR: &str = ".marimo";

/// Session store persisting `{"sessions": [...]}` to `.marimo/<file>`.
///
/// All file access goes through a capability handle on the state directory.
/// Each save writes its own uniquely named sibling temporary file and renames
/// it over the registry file. Concurrent writers, in this process or another,
/// never share a temporary file; the last rename wins.
pub struct JsonFileSessionStore {
    dir: Dir,
    file_name: String,
    path: Utf8PathBuf,
}

impl JsonFileSessionStore {
    /// Opens the default `sessions.json` store under `project_root`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Persistence`] when the project root cannot
    /// be opened or `.marimo/` cannot be created.
    pub fn open(project_root: &Utf8Path) -> SessionStoreResult<Self> {
        Self::open_with_file_name(project_root, DEFAULT_REGISTRY_FILE)
    }

    /// Opens a store with a custom file name under `project_root/.marimo/`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Persistence`] when the project root cannot
    /// be opened or `.marimo/` cannot be created.
    pub fn open_with_file_name(
        project_root: &Utf8Path,
        name: impl Into<String>,
    ) -> SessionStoreResult<Self> {
        let root = Dir::open_ambient_dir(project_root, ambient_authority())
            .map_err(SessionStoreError::persistence)?;
        root.create_dir_all(STATE_DIR)
            .map_err(SessionStoreError::persistence)?;
        let dir = root
            .open_dir(STATE_DIR)
            .map_err(SessionStoreError::persistence)?;
        let file_name = name.into();
        let path = project_root.join(STATE_DIR).join(&file_name);

        Ok(Self {
            dir,
            file_name,
            path,
        })
    }

    /// Returns the registry file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn temp_file_name(&self) -> String {
        let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("{}.{}.{sequence}.tmp", self.file_name, process::id())
    }
}

impl fmt::Debug for JsonFileSessionStore {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("JsonFileSessionStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SessionStore for JsonFileSessionStore {
    fn load(&self) -> SessionStoreResult<Vec<Value>> {
        match self.dir.read_to_string(&self.file_name) {
            Ok(text) => Ok(decode_session_document(&text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                debug!(path = %self.path, "session registry is not UTF-8; treating it as empty");
                Ok(Vec::new())
            }
            Err(err) => Err(SessionStoreError::persistence(err)),
        }
    }

    fn save(&self, entries: &[Value]) -> SessionStoreResult<()> {
        let text = encode_session_document(entries).map_err(SessionStoreError::persistence)?;
        let temp_name = self.temp_file_name();
        self.dir
            .write(&temp_name, text)
            .map_err(SessionStoreError::persistence)?;
        if let Err(err) = self.dir.rename(&temp_name, &self.dir, &self.file_name) {
            if let Err(cleanup) = self.dir.remove_file(&temp_name) {
                warn!(
                    path = %self.path,
                    error = %cleanup,
                    "failed to remove temporary registry file"
                );
            }
            return Err(SessionStoreError::persistence(err));
        }
        debug!(path = %self.path, entries = entries.len(), "session registry written");
        Ok(())
    }
}
