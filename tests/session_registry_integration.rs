//! Session registry against the JSON file store and real processes.

use camino::Utf8PathBuf;
use eyre::{Result, ensure, eyre};
use marimo_fleet::session::{
    adapters::{JsonFileSessionStore, SignalProcessProbe},
    domain::{NewSession, ProcessLiveness, SessionInfo},
    ports::ProcessProbe,
    services::SessionRegistry,
};
use mockable::DefaultClock;
use std::fs;
#[cfg(unix)]
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;

type FileRegistry = SessionRegistry<JsonFileSessionStore, SignalProcessProbe>;

fn registry() -> Result<(TempDir, Utf8PathBuf, FileRegistry)> {
    let temp = tempfile::tempdir()?;
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
        .map_err(|path| eyre!("temporary path is not UTF-8: {}", path.display()))?;
    let store = JsonFileSessionStore::open(&root)?;
    let registry = SessionRegistry::new(Arc::new(store), Arc::new(SignalProcessProbe::new()));
    Ok((temp, root, registry))
}

fn session(pid: u32, port: u16) -> SessionInfo {
    SessionInfo::new(
        NewSession {
            notebook: format!("notebooks/{pid}.py"),
            port,
            pid,
            host: "0.0.0.0".to_owned(),
            url: format!("http://localhost:{port}"),
        },
        &DefaultClock,
    )
}

/// Returns the pid of a process that has exited and been reaped.
#[cfg(unix)]
fn exited_pid() -> Result<u32> {
    let mut child = Command::new("true").spawn()?;
    let pid = child.id();
    child.wait()?;
    Ok(pid)
}

#[test]
fn current_process_is_alive() {
    let probe = SignalProcessProbe::new();

    assert!(probe.liveness(std::process::id()).is_alive());
}

#[cfg(unix)]
#[test]
fn reaped_child_is_dead() -> Result<()> {
    let pid = exited_pid()?;

    let liveness = SignalProcessProbe::new().liveness(pid);

    ensure!(
        liveness == ProcessLiveness::Dead,
        "expected reaped pid {pid} to be dead, got {liveness}"
    );
    Ok(())
}

#[cfg(unix)]
#[test]
fn cleanup_removes_exactly_the_dead_session() -> Result<()> {
    let (_temp, root, registry) = registry()?;
    let dead = exited_pid()?;
    registry.register_session(&session(std::process::id(), 41_000))?;
    registry.register_session(&session(dead, 41_001))?;

    let removed = registry.cleanup_dead_sessions()?;

    ensure!(removed == 1, "expected one removal, got {removed}");
    let remaining = registry.list_sessions()?;
    ensure!(remaining.len() == 1, "expected one survivor");
    ensure!(
        remaining.iter().all(|info| info.pid() == std::process::id()),
        "survivor should be the live session"
    );
    let document = fs::read_to_string(root.join(".marimo/sessions.json"))?;
    ensure!(
        !document.contains(&format!("\"pid\": {dead}")),
        "dead session still persisted"
    );
    Ok(())
}

#[test]
fn same_pid_registration_replaces_entry() -> Result<()> {
    let (_temp, _root, registry) = registry()?;
    registry.register_session(&session(4242, 41_000))?;
    registry.register_session(&session(4242, 41_005))?;

    let sessions = registry.list_sessions()?;

    ensure!(sessions.len() == 1, "expected exactly one entry");
    ensure!(
        sessions.iter().all(|info| info.port() == 41_005),
        "entry should reflect the second registration"
    );
    Ok(())
}

#[test]
fn corrupt_registry_file_reads_as_empty() -> Result<()> {
    let (_temp, root, registry) = registry()?;
    fs::write(root.join(".marimo/sessions.json"), "{not json")?;

    ensure!(registry.list_sessions()?.is_empty(), "corrupt file should be empty");
    registry.register_session(&session(4242, 41_000))?;
    ensure!(registry.list_sessions()?.len() == 1, "registration should recover");
    Ok(())
}
