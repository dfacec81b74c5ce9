//! Allocation policy: which ports may be handed out and where to probe them.

use super::{PortConfigError, PortRange, parse_port};
use crate::config::EnvSource;

/// Host that bind-tests run against unless configured otherwise.
pub const DEFAULT_BIND_HOST: &str = "127.0.0.1";

/// Variable holding a range specification (`"start-end"` or a single port).
pub const PORT_RANGE_VAR: &str = "MARIMO_PORT_RANGE";

/// Variable holding a fixed port that overrides the range.
pub const FIXED_PORT_VAR: &str = "MARIMO_PORT";

/// Variable holding the host to bind-test against.
pub const BIND_HOST_VAR: &str = "MARIMO_HOST";

/// Port allocation policy.
///
/// When a fixed port is set, allocation only ever tries that port and the
/// range is never consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortPolicy {
    range: PortRange,
    fixed_port: Option<u16>,
    host: String,
}

impl PortPolicy {
    /// Creates a policy scanning [`PortRange::DEFAULT`] on
    /// [`DEFAULT_BIND_HOST`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            range: PortRange::DEFAULT,
            fixed_port: None,
            host: DEFAULT_BIND_HOST.to_owned(),
        }
    }

    /// Reads the policy from `MARIMO_PORT_RANGE`, `MARIMO_PORT` and
    /// `MARIMO_HOST`.
    ///
    /// Unset or blank variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PortConfigError`] when a variable holds an invalid port or
    /// range. Invalid values are never clamped.
    pub fn from_env(env: &impl EnvSource) -> Result<Self, PortConfigError> {
        let mut policy = Self::new();

        if let Some(spec) = non_blank(env, PORT_RANGE_VAR) {
            policy = policy.with_range(spec.parse()?);
        }
        if let Some(value) = non_blank(env, FIXED_PORT_VAR) {
            policy = policy.with_fixed_port(parse_port(&value)?)?;
        }
        if let Some(host) = non_blank(env, BIND_HOST_VAR) {
            policy = policy.with_host(host);
        }

        Ok(policy)
    }

    /// Replaces the scanned range.
    #[must_use]
    pub const fn with_range(mut self, range: PortRange) -> Self {
        self.range = range;
        self
    }

    /// Sets a fixed port that bypasses range scanning.
    ///
    /// # Errors
    ///
    /// Returns [`PortConfigError::PortOutOfRange`] when `port` is zero.
    pub fn with_fixed_port(mut self, port: u16) -> Result<Self, PortConfigError> {
        if port == 0 {
            return Err(PortConfigError::PortOutOfRange(0));
        }
        self.fixed_port = Some(port);
        Ok(self)
    }

    /// Sets the host bind-tests run against.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Returns the scanned range.
    #[must_use]
    pub const fn range(&self) -> PortRange {
        self.range
    }

    /// Returns the fixed port, if any.
    #[must_use]
    pub const fn fixed_port(&self) -> Option<u16> {
        self.fixed_port
    }

    /// Returns the bind-test host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }
}

impl Default for PortPolicy {
    fn default() -> Self {
        Self::new()
    }
}

fn non_blank(env: &impl EnvSource, key: &str) -> Option<String> {
    env.var(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
