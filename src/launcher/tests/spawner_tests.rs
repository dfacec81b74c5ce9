//! Recording spawner tests.

use crate::launcher::{
    adapters::memory::RecordingProcessSpawner, domain::LaunchCommand, ports::ProcessSpawner,
};
use std::collections::BTreeMap;

fn command() -> LaunchCommand {
    LaunchCommand::new(
        "marimo",
        vec!["edit".to_owned(), "nb.py".to_owned()],
        BTreeMap::new(),
        "/work",
    )
}

#[test]
fn pids_are_handed_out_sequentially() {
    let spawner = RecordingProcessSpawner::starting_at(7);

    assert_eq!(spawner.spawn(&command()).ok(), Some(7));
    assert_eq!(spawner.spawn(&command()).ok(), Some(8));
    assert_eq!(spawner.commands().len(), 2);
}

#[test]
fn last_pid_is_issued_once_then_spawns_fail() {
    let spawner = RecordingProcessSpawner::starting_at(u32::MAX);

    assert_eq!(spawner.spawn(&command()).ok(), Some(u32::MAX));
    let error = spawner.spawn(&command()).err();

    assert!(error.is_some(), "pid space should be exhausted");
    assert_eq!(spawner.commands().len(), 1);
}
