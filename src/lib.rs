//! extdoc-engine: documentation entity extraction for JavaScript
//!
//! Reads JavaScript written in the Ext JS class idioms and produces
//! structured documentation entities (classes, methods, properties, events
//! and listeners) by combining two sources:
//!
//! - doc-comments (`/** ... */`) with `@tags`
//! - facts detected from the code the comment documents
//!
//! Explicit documentation wins field by field; detection fills the gaps.
//! Class definitions are expanded into members, and undocumented members
//! are listed inline on their class.
//!
//! # Example
//!
//! ```ignore
//! use extdoc_engine::{extract, EngineContext};
//!
//! let source = r#"
//! Ext.define("Foo.Bar", {
//!     extend: "Ext.Base",
//!     someMethod: function(a, b) { return this; }
//! });
//! "#;
//!
//! let engine = EngineContext::default();
//! let extraction = extract(source, &engine)?;
//! let class = &extraction.entities[0];
//! assert_eq!(class.name.as_deref(), Some("Foo.Bar"));
//! assert_eq!(class.members[0].name.as_deref(), Some("someMethod"));
//! ```

pub mod adapter;
pub mod ast;
pub mod cli;
pub mod config;
pub mod context;
pub mod detectors;
pub mod error;
pub mod extract;
pub mod merge;
pub mod namespace;
pub mod parsing;
pub mod report;
pub mod schema;
pub mod tags;

// Re-export commonly used types
pub use config::{EngineConfig, LoggingConfig};
pub use context::EngineContext;
pub use detectors::ScopeMode;
pub use error::{ExtdocError, Result};
pub use extract::{extract, extract_file};
pub use namespace::{Idiom, NamespaceAliases};
pub use schema::{
    CommentKind, Docset, Entity, EntityKind, Extraction, Param, ReturnValue, Warning, WarningKind,
};
pub use tags::{TagBehavior, TagRegistry};
