//! Analysis agent definitions.

use super::CoordinatorDomainError;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// Validated, unique agent name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentName(String);

impl AgentName {
    /// Creates an agent name. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorDomainError::EmptyAgentName`] when nothing is left
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, CoordinatorDomainError> {
        let normalized = value.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(CoordinatorDomainError::EmptyAgentName);
        }
        Ok(Self(normalized))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AgentName {
    type Error = CoordinatorDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AgentName> for String {
    fn from(value: AgentName) -> Self {
        value.0
    }
}

impl AsRef<str> for AgentName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for AgentName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A notebook run as a named analysis step.
///
/// `depends_on` lists agents that must have completed before this one may
/// launch. `env` is layered over the coordinator-injected variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisAgent {
    name: AgentName,
    notebook: Utf8PathBuf,
    #[serde(default)]
    description: String,
    #[serde(default)]
    depends_on: Vec<AgentName>,
    #[serde(default)]
    env: BTreeMap<String, String>,
}

impl AnalysisAgent {
    /// Creates an agent without dependencies or extra environment.
    #[must_use]
    pub fn new(
        name: AgentName,
        notebook: impl Into<Utf8PathBuf>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name,
            notebook: notebook.into(),
            description: description.into(),
            depends_on: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    /// Sets the agents this one waits for, in order.
    #[must_use]
    pub fn with_dependencies(mut self, names: impl IntoIterator<Item = AgentName>) -> Self {
        self.depends_on = names.into_iter().collect();
        self
    }

    /// Sets agent-specific environment variables.
    #[must_use]
    pub fn with_env(mut self, values: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env = values.into_iter().collect();
        self
    }

    /// Returns the agent name.
    #[must_use]
    pub const fn name(&self) -> &AgentName {
        &self.name
    }

    /// Returns the notebook path.
    #[must_use]
    pub fn notebook(&self) -> &Utf8Path {
        &self.notebook
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the dependencies.
    #[must_use]
    pub fn depends_on(&self) -> &[AgentName] {
        &self.depends_on
    }

    /// Returns the agent-specific environment.
    #[must_use]
    pub const fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }
}
