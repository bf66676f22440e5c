//! Common test utilities and fixtures for extdoc-engine integration tests
//!
//! This module provides:
//! - `TestRepo` for writing source files and running the `extdoc` binary
//! - Helpers for running the library pipeline and finding entities

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod assertions;
pub mod test_repo;

pub use assertions::*;
pub use test_repo::TestRepo;
