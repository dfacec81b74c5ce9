//! Unit tests for the session registry.

mod document_tests;
