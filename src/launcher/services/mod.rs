//! Application services for notebook launching.

mod launcher;

pub use launcher::NotebookLauncher;
