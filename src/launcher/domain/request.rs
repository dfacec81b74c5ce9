//! Launch request value object.

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;

/// Host notebook servers bind to unless the request says otherwise.
pub const DEFAULT_LAUNCH_HOST: &str = "0.0.0.0";

/// What to launch and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    notebook: Utf8PathBuf,
    host: String,
    extra_args: Vec<String>,
    env: BTreeMap<String, String>,
}

impl LaunchRequest {
    /// Creates a request for `notebook`, relative to the project root or
    /// absolute.
    #[must_use]
    pub fn new(notebook: impl Into<Utf8PathBuf>) -> Self {
        Self {
            notebook: notebook.into(),
            host: DEFAULT_LAUNCH_HOST.to_owned(),
            extra_args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    /// Sets the host the server binds to.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets arguments appended verbatim after `--port`.
    #[must_use]
    pub fn with_extra_args(mut self, values: impl IntoIterator<Item = String>) -> Self {
        self.extra_args = values.into_iter().collect();
        self
    }

    /// Sets per-launch environment overrides.
    #[must_use]
    pub fn with_env(mut self, values: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env = values.into_iter().collect();
        self
    }

    /// Returns the notebook path as given.
    #[must_use]
    pub fn notebook(&self) -> &Utf8Path {
        &self.notebook
    }

    /// Returns the bind host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the extra arguments.
    #[must_use]
    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }

    /// Returns the environment overrides.
    #[must_use]
    pub const fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }
}
