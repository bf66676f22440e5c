//! Output formatting for extraction results

use std::fmt::Write;

use crate::error::{ExtdocError, Result};
use crate::schema::{Entity, Extraction};

/// Pretty-printed JSON of the whole extraction
pub fn format_json(extraction: &Extraction) -> Result<String> {
    serde_json::to_string_pretty(extraction).map_err(|e| ExtdocError::ParseFailure {
        message: format!("JSON serialization failed: {}", e),
    })
}

/// Indented listing of the merged entities, members nested under classes
pub fn format_text(extraction: &Extraction) -> String {
    let mut out = String::new();
    for entity in &extraction.entities {
        write_entity(&mut out, entity, 0);
    }
    for warning in &extraction.warnings {
        let _ = writeln!(out, "warning: line {}: {}", warning.line, warning.message);
    }
    out
}

fn write_entity(out: &mut String, entity: &Entity, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{}{} {}", indent, entity.kind.as_str(), entity.name_str());

    if !entity.params.is_empty() {
        let params: Vec<&str> = entity.params.iter().map(|p| p.name.as_str()).collect();
        let _ = write!(out, "({})", params.join(", "));
    }
    if let Some(parent) = &entity.extends {
        let _ = write!(out, " extends {}", parent);
    }
    if let Some(ty) = &entity.value_type {
        let _ = write!(out, " : {}", ty);
    }

    let flags = flag_names(entity);
    if !flags.is_empty() {
        let _ = write!(out, " [{}]", flags.join(", "));
    }
    if let Some(line) = entity.line {
        let _ = write!(out, " (line {})", line);
    }
    out.push('\n');

    for member in &entity.members {
        write_entity(out, member, depth + 1);
    }
}

fn flag_names(entity: &Entity) -> Vec<&'static str> {
    [
        (entity.is_static, "static"),
        (entity.private, "private"),
        (entity.protected, "protected"),
        (entity.config, "config"),
        (entity.chainable, "chainable"),
        (entity.singleton, "singleton"),
        (entity.doc_only_enum, "enum"),
        (entity.autodetected, "autodetected"),
        (entity.inheritdoc, "inheritdoc"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect()
}
