//! Doc/code reconciliation
//!
//! Every registered tag writes its own field of the merged entity. Explicit
//! doc data wins; detected data fills fields the comment left absent or
//! empty. Apart from the name, detected data is used only when the
//! documented kind matches the detected one.

use crate::schema::{Entity, EntityKind, Warning};
use crate::tags::{DocEntity, TagRegistry};

/// State shared by the tag merges of one entity
#[derive(Debug)]
pub struct MergeContext<'m> {
    /// Doc side, after `process_doc`
    pub doc: &'m Entity,
    /// Detected side
    pub code: &'m Entity,
    /// Whether the final kind equals the detected kind
    pub same_kind: bool,
    /// Docset line, for warnings
    pub line: usize,
    pub warnings: Vec<Warning>,
}

/// Merge the doc side of a comment with its detected entity
pub fn merge(
    registry: &TagRegistry,
    doc: &DocEntity,
    code: &Entity,
    line: usize,
) -> (Entity, Vec<Warning>) {
    let kind = doc.resolve_kind(code);
    let same_kind = kind == code.kind;

    let mut target = Entity::new(kind);
    target.doc = doc.entity.doc.clone();

    let mut cx = MergeContext {
        doc: &doc.entity,
        code,
        same_kind,
        line,
        warnings: Vec::new(),
    };
    for tag in registry.iter() {
        tag.merge(&mut target, &mut cx);
    }

    if same_kind {
        target.calls = code.calls.clone();
        if kind == EntityKind::Class {
            target.members = code.members.clone();
        }
    }
    target.line = Some(line);
    target.node = code.node;

    tracing::debug!(
        "merged {} {:?} (detected as {})",
        kind.as_str(),
        target.name_str(),
        code.kind.as_str()
    );
    (target, cx.warnings)
}
