//! JSON agent manifests.

use super::AnalysisAgent;
use serde::{Deserialize, Serialize};

/// A set of agent definitions read from JSON.
///
/// ```json
/// {"agents": [{"name": "ingest", "notebook": "notebooks/ingest.py"}]}
/// ```
///
/// `description`, `depends_on` and `env` may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgentManifest {
    agents: Vec<AnalysisAgent>,
}

impl AgentManifest {
    /// Parses a manifest.
    ///
    /// # Errors
    ///
    /// Returns the decoding error when the document is not a valid manifest,
    /// including when an agent name is blank.
    pub fn from_json(document: &str) -> serde_json::Result<Self> {
        serde_json::from_str(document)
    }

    /// Returns the agents in document order.
    #[must_use]
    pub fn agents(&self) -> &[AnalysisAgent] {
        &self.agents
    }

    /// Consumes the manifest, returning its agents.
    #[must_use]
    pub fn into_agents(self) -> Vec<AnalysisAgent> {
        self.agents
    }
}
