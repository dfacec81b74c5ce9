//! Unit tests for notebook launching.

mod spawner_tests;
