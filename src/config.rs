//! Fleet configuration.
//!
//! Configuration is an explicit value built once by the entry point and
//! passed down. Environment variables are only consulted through
//! [`FleetConfig::from_env`], which reads them via an [`EnvSource`] so tests
//! never touch the real process environment.

use crate::port_allocation::domain::{PortConfigError, PortPolicy};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use std::env;
use thiserror::Error;

/// Variable overriding the runtime command line, e.g. `"marimo edit"`.
pub const RUNTIME_VAR: &str = "MARIMO_FLEET_RUNTIME";

/// Default registry file name inside `.marimo/`.
pub const DEFAULT_REGISTRY_FILE: &str = "sessions.json";

/// Read access to a set of environment variables.
pub trait EnvSource {
    /// Returns the value of `key`, if set and valid UTF-8.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns every variable with a UTF-8 name and value.
    fn vars(&self) -> BTreeMap<String, String>;
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn vars(&self) -> BTreeMap<String, String> {
        env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }

    fn vars(&self) -> BTreeMap<String, String> {
        self.clone()
    }
}

/// Errors returned while building configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Port policy variables were invalid.
    #[error(transparent)]
    Port(#[from] PortConfigError),

    /// The runtime command has no executable.
    #[error("runtime command must not be empty")]
    EmptyRuntime,
}

/// Result type for configuration construction.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Executable and leading arguments that start a notebook server.
///
/// The launcher appends the notebook path, `--host`, `--port` and any extra
/// arguments after these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeCommand {
    program: String,
    args: Vec<String>,
}

impl RuntimeCommand {
    /// Creates a runtime command.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyRuntime`] when `program` is blank.
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = String>,
    ) -> ConfigResult<Self> {
        let normalized = program.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(ConfigError::EmptyRuntime);
        }

        Ok(Self {
            program: normalized,
            args: args.into_iter().collect(),
        })
    }

    /// Parses a whitespace-separated command line such as `"marimo edit"`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyRuntime`] when the line is blank.
    pub fn parse(line: &str) -> ConfigResult<Self> {
        let mut words = line.split_whitespace().map(str::to_owned);
        let program = words.next().ok_or(ConfigError::EmptyRuntime)?;
        Self::new(program, words)
    }

    /// Returns the executable.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the leading arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Default for RuntimeCommand {
    /// `uv run marimo edit`.
    fn default() -> Self {
        Self {
            program: "uv".to_owned(),
            args: vec!["run".to_owned(), "marimo".to_owned(), "edit".to_owned()],
        }
    }
}

/// Everything the launcher and coordinator need from the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetConfig {
    project_root: Utf8PathBuf,
    port_policy: PortPolicy,
    runtime: RuntimeCommand,
    base_env: BTreeMap<String, String>,
    registry_file: String,
}

impl FleetConfig {
    /// Creates a configuration with defaults and an empty base environment.
    #[must_use]
    pub fn new(project_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            port_policy: PortPolicy::new(),
            runtime: RuntimeCommand::default(),
            base_env: BTreeMap::new(),
            registry_file: DEFAULT_REGISTRY_FILE.to_owned(),
        }
    }

    /// Builds a configuration from environment variables.
    ///
    /// The port policy comes from [`PortPolicy::from_env`], the runtime from
    /// `MARIMO_FLEET_RUNTIME` when set, and the base environment handed to
    /// notebook processes is the full variable set of `env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value.
    pub fn from_env(
        project_root: impl Into<Utf8PathBuf>,
        env: &impl EnvSource,
    ) -> ConfigResult<Self> {
        let mut config = Self::new(project_root)
            .with_port_policy(PortPolicy::from_env(env)?)
            .with_base_env(env.vars());

        if let Some(line) = env.var(RUNTIME_VAR).filter(|line| !line.trim().is_empty()) {
            config = config.with_runtime(RuntimeCommand::parse(&line)?);
        }

        Ok(config)
    }

    /// Replaces the port policy.
    #[must_use]
    pub fn with_port_policy(mut self, port_policy: PortPolicy) -> Self {
        self.port_policy = port_policy;
        self
    }

    /// Replaces the runtime command.
    #[must_use]
    pub fn with_runtime(mut self, runtime: RuntimeCommand) -> Self {
        self.runtime = runtime;
        self
    }

    /// Replaces the base environment of spawned notebooks.
    #[must_use]
    pub fn with_base_env(mut self, values: impl IntoIterator<Item = (String, String)>) -> Self {
        self.base_env = values.into_iter().collect();
        self
    }

    /// Replaces the registry file name inside `.marimo/`.
    #[must_use]
    pub fn with_registry_file(mut self, file_name: impl Into<String>) -> Self {
        self.registry_file = file_name.into();
        self
    }

    /// Returns the project root.
    #[must_use]
    pub fn project_root(&self) -> &Utf8Path {
        &self.project_root
    }

    /// Returns the port policy.
    #[must_use]
    pub const fn port_policy(&self) -> &PortPolicy {
        &self.port_policy
    }

    /// Returns the runtime command.
    #[must_use]
    pub const fn runtime(&self) -> &RuntimeCommand {
        &self.runtime
    }

    /// Returns the base environment.
    #[must_use]
    pub const fn base_env(&self) -> &BTreeMap<String, String> {
        &self.base_env
    }

    /// Returns the registry file name.
    #[must_use]
    pub fn registry_file(&self) -> &str {
        &self.registry_file
    }
}
