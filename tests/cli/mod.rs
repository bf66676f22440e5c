//! Tests for the `extdoc` binary

pub mod extract_tests;
