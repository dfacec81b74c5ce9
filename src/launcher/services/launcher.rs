//! Notebook launcher service.

use crate::config::{FleetConfig, RuntimeCommand};
use crate::launcher::{
    domain::{LaunchCommand, LaunchRequest, LaunchResult, display_url},
    ports::{LaunchError, LauncherResult, NotebookLaunch, ProcessSpawner},
};
use crate::port_allocation::{ports::PortProbe, services::PortAllocator};
use crate::session::{
    domain::{NewSession, SessionInfo},
    ports::{ProcessProbe, SessionStore},
    services::SessionRegistry,
};
use camino::{Utf8Path, Utf8PathBuf};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Spawns notebook servers and records them in the session registry.
pub struct NotebookLauncher<X, S, L, P, C>
where
    X: ProcessSpawner,
    S: SessionStore,
    L: ProcessProbe,
    P: PortProbe,
    C: Clock + Send + Sync,
{
    project_root: Utf8PathBuf,
    runtime: RuntimeCommand,
    base_env: BTreeMap<String, String>,
    registry: SessionRegistry<S, L>,
    allocator: PortAllocator<P>,
    spawner: Arc<X>,
    clock: Arc<C>,
}

impl<X, S, L, P, C> NotebookLauncher<X, S, L, P, C>
where
    X: ProcessSpawner,
    S: SessionStore,
    L: ProcessProbe,
    P: PortProbe,
    C: Clock + Send + Sync,
{
    /// Creates a launcher.
    ///
    /// Project root, runtime command, base environment and port policy come
    /// from `config`; bind-tests run through `probe`.
    #[must_use]
    pub fn new(
        config: &FleetConfig,
        registry: SessionRegistry<S, L>,
        probe: P,
        spawner: Arc<X>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            project_root: config.project_root().to_owned(),
            runtime: config.runtime().clone(),
            base_env: config.base_env().clone(),
            registry,
            allocator: PortAllocator::new(config.port_policy().clone(), probe),
            spawner,
            clock,
        }
    }

    /// Returns the project root.
    #[must_use]
    pub fn project_root(&self) -> &Utf8Path {
        &self.project_root
    }

    /// Returns the session registry.
    #[must_use]
    pub const fn registry(&self) -> &SessionRegistry<S, L> {
        &self.registry
    }

    /// Returns the port allocator.
    #[must_use]
    pub const fn allocator(&self) -> &PortAllocator<P> {
        &self.allocator
    }

    fn resolve_notebook(&self, notebook: &Utf8Path) -> LauncherResult<Utf8PathBuf> {
        let candidate = if notebook.is_absolute() {
            notebook.to_owned()
        } else {
            self.project_root.join(notebook)
        };

        candidate
            .canonicalize_utf8()
            .map_err(|_| LaunchError::NotebookNotFound(candidate))
    }

    fn notebook_label(&self, resolved: &Utf8Path) -> String {
        let root = self
            .project_root
            .canonicalize_utf8()
            .unwrap_or_else(|_| self.project_root.clone());

        resolved
            .strip_prefix(&root)
            .map_or_else(|_| resolved.to_string(), ToString::to_string)
    }

    fn build_command(
        &self,
        notebook: &Utf8Path,
        port: u16,
        request: &LaunchRequest,
    ) -> LaunchCommand {
        let mut args = self.runtime.args().to_vec();
        args.extend([
            notebook.to_string(),
            "--host".to_owned(),
            request.host().to_owned(),
            "--port".to_owned(),
            port.to_string(),
        ]);
        args.extend(request.extra_args().iter().cloned());

        let mut env = self.base_env.clone();
        env.extend(
            request
                .env()
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );

        LaunchCommand::new(self.runtime.program(), args, env, self.project_root.clone())
    }

    fn prune_dead_sessions(&self) {
        match self.registry.cleanup_dead_sessions() {
            Ok(0) => {}
            Ok(removed) => info!(removed, "pruned dead sessions before registering"),
            Err(err) => warn!(error = %err, "session pruning failed; continuing"),
        }
    }
}

impl<X, S, L, P, C> NotebookLaunch for NotebookLauncher<X, S, L, P, C>
where
    X: ProcessSpawner,
    S: SessionStore,
    L: ProcessProbe,
    P: PortProbe,
    C: Clock + Send + Sync,
{
    fn launch(&self, request: &LaunchRequest) -> LauncherResult<LaunchResult> {
        let notebook = self.resolve_notebook(request.notebook())?;
        let port = self.allocator.allocate()?;
        let command = self.build_command(&notebook, port, request);

        let pid = self.spawner.spawn(&command)?;
        let url = display_url(request.host(), port);
        info!(notebook = %notebook, pid, port, url = %url, "launched notebook");

        self.prune_dead_sessions();

        let label = self.notebook_label(&notebook);
        let session = SessionInfo::new(
            NewSession {
                notebook: label.clone(),
                port,
                pid,
                host: request.host().to_owned(),
                url: url.clone(),
            },
            &*self.clock,
        );
        self.registry.register_session(&session)?;

        Ok(LaunchResult::new(label, port, pid, url, command.argv()))
    }
}
