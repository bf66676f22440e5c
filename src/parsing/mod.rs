//! Parsing JavaScript source into a tree-sitter tree
//!
//! tree-sitter recovers from almost any input by inserting `ERROR` and
//! `MISSING` nodes. Documentation extraction over a recovered tree would
//! attach comments to invented code, so any recovery is treated as a fatal
//! syntax error for the whole file.
//!
//! # Example
//!
//! ```ignore
//! use extdoc_engine::parsing::parse_source;
//!
//! let tree = parse_source("Ext.define('App.Foo', {});")?;
//! assert_eq!(tree.root_node().kind(), "program");
//! ```

use tree_sitter::{Language, Node, Parser, Tree};

use crate::error::{ExtdocError, Result};

/// The JavaScript grammar used for all sources
pub fn javascript_language() -> Language {
    tree_sitter_javascript::LANGUAGE.into()
}

/// Parse source code, rejecting trees that needed error recovery.
///
/// # Errors
///
/// - `ExtdocError::ParseFailure` if the grammar cannot be loaded or the
///   parser produced no tree
/// - `ExtdocError::Syntax` with the first offending token if the source is
///   not valid JavaScript
pub fn parse_source(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&javascript_language())
        .map_err(|e| ExtdocError::ParseFailure {
            message: format!("Failed to set JavaScript grammar: {:?}", e),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ExtdocError::ParseFailure {
            message: "parser returned no tree".to_string(),
        })?;

    let root = tree.root_node();
    if root.has_error() {
        let err = first_error(&root, source)
            .unwrap_or_else(|| ExtdocError::syntax(root.end_position().row + 1, "end of file"));
        tracing::debug!("rejecting source: {}", err);
        return Err(err);
    }

    Ok(tree)
}

/// Locate the first `ERROR` or `MISSING` node in source order
fn first_error(node: &Node, source: &str) -> Option<ExtdocError> {
    if node.is_error() || node.is_missing() {
        let line = node.start_position().row + 1;
        let token = if node.is_missing() || node.start_byte() >= source.len() {
            "end of file".to_string()
        } else {
            offending_token(node, source)
        };
        return Some(ExtdocError::syntax(line, token));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            if let Some(err) = first_error(&child, source) {
                return Some(err);
            }
        }
    }
    None
}

/// First token of an error node, quoted
fn offending_token(node: &Node, source: &str) -> String {
    let text = node.utf8_text(source.as_bytes()).unwrap_or("");
    let token = text.split_whitespace().next().unwrap_or("");
    if token.is_empty() {
        "end of file".to_string()
    } else {
        format!("'{}'", token)
    }
}
