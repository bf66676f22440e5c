//! Whole-file extraction through the library API

pub mod classes;
pub mod members;
pub mod scenarios;
