//! Extraction pipeline
//!
//! One source file goes through these stages:
//!
//! 1. parse; a tree that needed error recovery is a fatal syntax error
//! 2. build docsets from the comments (see [`crate::adapter`])
//! 3. detect the entity of every docset's code node
//! 4. add comment-less docsets for undocumented classes; below the top
//!    level only define, extend and override calls count
//! 5. fold a comment on the body argument of a class call into that class
//! 6. hand each class member to the doc-comment documenting its node, or
//!    list it inline on the class
//! 7. give comment-only docsets the anonymous fallback
//! 8. merge doc and code sides into the final entities
//!
//! Member association runs after every docset has been detected, so a
//! member finds its doc-comment wherever the comment sits in the file.

use std::fs;
use std::path::Path;

use ahash::AHashSet;

use crate::adapter::{build_docsets, DocsetIndex, PendingDocset};
use crate::ast::{AstContext, AstNode, NodeId};
use crate::context::EngineContext;
use crate::detectors::class::{detect_class, uses_class_idiom};
use crate::detectors::detect;
use crate::error::{ExtdocError, Result};
use crate::merge::merge;
use crate::parsing::parse_source;
use crate::schema::{Docset, Entity, EntityKind, Extraction};
use crate::tags::DocEntity;

/// Extract documentation entities from one source text
pub fn extract(source: &str, engine: &EngineContext) -> Result<Extraction> {
    let tree = parse_source(source)?;
    let cx = AstContext::new(source, &engine.aliases);
    let adapted = build_docsets(tree.root_node(), cx);

    // Phase 1: detection. Comments on the body argument of a class call wait
    // for the enclosing class to be known.
    let mut pending = adapted.docsets;
    for docset in &mut pending {
        if let Some(node) = docset.node {
            if node.enclosing_class_call().is_none() {
                docset.docset.code = Some(detect(&node, engine));
            }
        }
    }

    for statement in adapted.uncommented {
        let code = statement.node.unwrap_statement();
        if !statement.top_level && !uses_class_idiom(&code) {
            continue;
        }
        if let Some(mut class) = detect_class(&code, engine) {
            class.node = statement.node.id();
            let mut synthesized = PendingDocset::synthesized(statement.node);
            synthesized.docset.code = Some(class);
            pending.push(synthesized);
        }
    }
    pending.sort_by_key(|p| p.docset.offset);
    fold_class_body_comments(&mut pending, engine);

    // Phase 2: member association
    let index = DocsetIndex::build(&pending);
    let mut docsets: Vec<Docset> = pending.into_iter().map(|p| p.docset).collect();
    associate_members(&mut docsets, &index);

    for docset in &mut docsets {
        if docset.code.is_none() {
            docset.code = Some(Entity::anonymous());
        }
    }

    let mut extraction = Extraction {
        docsets,
        ..Extraction::default()
    };
    merge_documented(&mut extraction, engine);

    tracing::debug!(
        "extracted {} docsets, {} entities, {} warnings",
        extraction.docsets.len(),
        extraction.entities.len(),
        extraction.warnings.len()
    );
    Ok(extraction)
}

/// Read and extract one file
pub fn extract_file(path: &Path, engine: &EngineContext) -> Result<Extraction> {
    if !path.exists() {
        return Err(ExtdocError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let source = fs::read_to_string(path)?;
    tracing::info!("extracting {}", path.display());
    extract(&source, engine)
}

/// Resolve docsets whose node is the config or members argument of a class
/// call, such as `Ext.define('A', /** docs */ { ... })`.
///
/// An undocumented enclosing class takes the comment over. Under a
/// documented one the comment keeps no code and falls back to anonymous.
/// Without an enclosing class the node is detected like any other.
fn fold_class_body_comments(pending: &mut Vec<PendingDocset<'_>>, engine: &EngineContext) {
    let mut pos = 0;
    while pos < pending.len() {
        let Some(node) = pending[pos].node else {
            pos += 1;
            continue;
        };
        let Some(call) = node.enclosing_class_call() else {
            pos += 1;
            continue;
        };

        let owner = owning_class(pending, call);
        let folds = owner.is_some_and(|owner| {
            pending[pos].docset.is_doc_comment() && !pending[owner].docset.is_doc_comment()
        });
        match owner {
            Some(owner) if folds => {
                let inner = pending.remove(pos);
                let owner = if owner > pos { owner - 1 } else { owner };
                tracing::debug!(
                    "class body comment at line {} folded into its class",
                    inner.docset.line
                );
                let target = &mut pending[owner].docset;
                target.comment = inner.docset.comment;
                target.comment_kind = inner.docset.comment_kind;
                target.text_line = inner.docset.text_line;
            }
            Some(_) => pos += 1,
            None => {
                pending[pos].docset.code = Some(detect(&node, engine));
                pos += 1;
            }
        }
    }
}

/// Position of the class docset whose node encloses `call`
fn owning_class(pending: &[PendingDocset<'_>], call: AstNode<'_>) -> Option<usize> {
    let mut ancestor = call.parent();
    while let Some(id) = ancestor.id() {
        let found = pending.iter().position(|p| {
            p.docset.node == Some(id)
                && p.docset.code.as_ref().is_some_and(|c| c.kind == EntityKind::Class)
        });
        if found.is_some() {
            return found;
        }
        ancestor = ancestor.parent();
    }
    None
}

/// Move each class member either to the doc-comment docset that documents
/// its node, or inline onto the class
fn associate_members(docsets: &mut [Docset], index: &DocsetIndex) {
    let mut listed: AHashSet<NodeId> = AHashSet::new();
    for class_pos in 0..docsets.len() {
        let members = match docsets[class_pos].code.as_mut() {
            Some(class) if class.kind == EntityKind::Class => std::mem::take(&mut class.members),
            _ => continue,
        };

        let mut inline = Vec::with_capacity(members.len());
        for mut member in members {
            let documented = member
                .node
                .and_then(|id| index.get(id))
                .filter(|&pos| pos != class_pos && docsets[pos].is_doc_comment());

            match documented {
                Some(pos) => {
                    tracing::debug!(
                        "member {} documented by docset at line {}",
                        member.name_str(),
                        docsets[pos].line
                    );
                    docsets[pos].code = Some(member);
                }
                None => {
                    if let Some(id) = member.node {
                        if !listed.insert(id) {
                            continue;
                        }
                    }
                    member.autodetected = true;
                    if member.is_inheritable_kind() {
                        member.inheritdoc = true;
                    } else {
                        member.private = true;
                    }
                    inline.push(member);
                }
            }
        }

        if let Some(class) = docsets[class_pos].code.as_mut() {
            class.members = inline;
        }
    }
}

/// Merge every doc-comment docset, and every docset holding a class
fn merge_documented(extraction: &mut Extraction, engine: &EngineContext) {
    for docset in &extraction.docsets {
        let Some(code) = &docset.code else {
            continue;
        };

        let doc = match &docset.comment {
            Some(text) if docset.is_doc_comment() => {
                let (doc, warnings) = engine.registry.parse_comment(text, docset.text_line);
                extraction.warnings.extend(warnings);
                doc
            }
            _ if code.kind == EntityKind::Class => DocEntity::default(),
            _ => continue,
        };

        let (mut entity, warnings) = merge(&engine.registry, &doc, code, docset.line);
        if docset.comment.is_none() {
            entity.autodetected = true;
        }
        extraction.warnings.extend(warnings);
        extraction.entities.push(entity);
    }
}
