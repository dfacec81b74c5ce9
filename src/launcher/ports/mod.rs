//! Port contracts for notebook launching.

mod launch;
mod spawner;

#[cfg(test)]
pub use launch::MockNotebookLaunch;
pub use launch::{LaunchError, LauncherResult, NotebookLaunch};
pub use spawner::ProcessSpawner;
