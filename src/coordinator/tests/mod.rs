//! Unit tests for agent coordination.

mod coordinator_tests;
mod domain_tests;
