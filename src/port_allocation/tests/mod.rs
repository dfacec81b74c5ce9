//! Unit tests for port allocation.

mod domain_tests;
