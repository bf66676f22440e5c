//! Comment association: turning a parsed tree into ordered docsets
//!
//! tree-sitter keeps comments as ordinary sibling nodes. The adapter walks
//! every node list in source order, collects the comments that precede each
//! named node, splits them into groups and emits one docset per group. The
//! last group before a node owns that node; any earlier groups become
//! comment-only docsets.
//!
//! Grouping rules:
//! - consecutive `//` comments on adjacent lines form one group
//! - every block comment is a group of its own
//!
//! This is the only place where comments are paired with code. Class member
//! detection later looks docsets up by [`NodeId`] through [`DocsetIndex`].

use ahash::AHashMap;
use tree_sitter::Node;

use crate::ast::{AstContext, AstNode, NodeId, NodeKind};
use crate::schema::{CommentKind, Docset};

/// A docset together with the node it documents
#[derive(Debug, Clone)]
pub struct PendingDocset<'a> {
    pub docset: Docset,
    pub node: Option<AstNode<'a>>,
}

impl<'a> PendingDocset<'a> {
    fn new(group: &CommentGroup, node: Option<AstNode<'a>>) -> Self {
        Self {
            docset: Docset {
                comment: Some(group.text.clone()),
                comment_kind: group.kind,
                line: group.line,
                code: None,
                node: node.and_then(|n| n.id()),
                text_line: group.text_line,
                offset: group.offset,
            },
            node,
        }
    }

    /// A docset with no comment, for code found without documentation
    pub fn synthesized(node: AstNode<'a>) -> Self {
        Self {
            docset: Docset {
                comment: None,
                comment_kind: CommentKind::PlainComment,
                line: node.line(),
                code: None,
                node: node.id(),
                text_line: node.line(),
                offset: node.start_byte(),
            },
            node: Some(node),
        }
    }
}

/// Output of the adapter for one tree
#[derive(Debug, Default)]
pub struct AdaptedSource<'a> {
    /// Docsets in source order
    pub docsets: Vec<PendingDocset<'a>>,
    /// Statements that no comment precedes, from every statement list
    pub uncommented: Vec<UncommentedStatement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct UncommentedStatement<'a> {
    pub node: AstNode<'a>,
    /// Directly inside the program rather than a block
    pub top_level: bool,
}

/// Build the ordered docset sequence for a tree
pub fn build_docsets<'a>(root: Node<'a>, cx: AstContext<'a>) -> AdaptedSource<'a> {
    let mut out = AdaptedSource::default();
    collect(root, cx, &mut out);
    tracing::debug!(
        "adapter: {} docsets, {} uncommented statements",
        out.docsets.len(),
        out.uncommented.len()
    );
    out
}

fn collect<'a>(node: Node<'a>, cx: AstContext<'a>, out: &mut AdaptedSource<'a>) {
    let list_kind = NodeKind::from_raw(node.kind());
    let statement_list = matches!(list_kind, NodeKind::Program | NodeKind::StatementBlock);
    let mut pending: Vec<Node<'a>> = Vec::new();
    let mut cursor = node.walk();
    let children: Vec<Node<'a>> = node.children(&mut cursor).collect();

    for child in children {
        if NodeKind::from_raw(child.kind()) == NodeKind::Comment {
            pending.push(child);
            continue;
        }
        if !child.is_named() {
            continue;
        }

        if pending.is_empty() {
            if statement_list {
                out.uncommented.push(UncommentedStatement {
                    node: cx.wrap(child),
                    top_level: list_kind == NodeKind::Program,
                });
            }
        } else {
            let groups = group_comments(&pending, cx.source);
            let last = groups.len() - 1;
            for (i, group) in groups.iter().enumerate() {
                let owner = (i == last).then(|| cx.wrap(child));
                out.docsets.push(PendingDocset::new(group, owner));
            }
            pending.clear();
        }

        collect(child, cx, out);
    }

    // Comments with nothing after them inside this node
    for group in group_comments(&pending, cx.source) {
        out.docsets.push(PendingDocset::new(&group, None));
    }
}

// ============================================================================
// Comment grouping
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct CommentGroup {
    kind: CommentKind,
    text: String,
    line: usize,
    text_line: usize,
    offset: usize,
}

fn group_comments(comments: &[Node], source: &str) -> Vec<CommentGroup> {
    let mut groups = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    let mut last_row = 0usize;

    for comment in comments {
        let raw = comment.utf8_text(source.as_bytes()).unwrap_or("");
        let row = comment.start_position().row;

        if let Some(body) = raw.strip_prefix("//") {
            let adjacent = start.is_some() && row == last_row + 1;
            if !adjacent {
                flush_line_group(&mut groups, &mut lines, &mut start);
                start = Some((row + 1, comment.start_byte()));
            }
            lines.push(body.strip_prefix(' ').unwrap_or(body).trim_end().to_string());
            last_row = comment.end_position().row;
            continue;
        }

        flush_line_group(&mut groups, &mut lines, &mut start);
        let (text, skipped) = clean_block(raw);
        groups.push(CommentGroup {
            kind: classify_block(raw),
            text,
            line: row + 1,
            text_line: row + 1 + skipped,
            offset: comment.start_byte(),
        });
    }

    flush_line_group(&mut groups, &mut lines, &mut start);
    groups
}

fn flush_line_group(
    groups: &mut Vec<CommentGroup>,
    lines: &mut Vec<String>,
    start: &mut Option<(usize, usize)>,
) {
    if let Some((line, offset)) = start.take() {
        groups.push(CommentGroup {
            kind: CommentKind::PlainComment,
            text: lines.join("\n"),
            line,
            text_line: line,
            offset,
        });
    }
    lines.clear();
}

/// `/** ... */` is a doc-comment; `/**/` and `/*** ...` are not
fn classify_block(raw: &str) -> CommentKind {
    let is_doc = raw.starts_with("/**") && !raw.starts_with("/***") && raw != "/**/";
    if is_doc {
        CommentKind::DocComment
    } else {
        CommentKind::PlainComment
    }
}

/// Strip delimiters and `*` gutters from a block comment, along with the
/// number of blank lines dropped from the front
fn clean_block(raw: &str) -> (String, usize) {
    let body = raw.strip_prefix("/*").unwrap_or(raw);
    let body = body.strip_suffix("*/").unwrap_or(body);
    let body = body.strip_prefix('*').unwrap_or(body);

    let lines: Vec<&str> = body
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            match trimmed.strip_prefix('*') {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
                None => trimmed,
            }
            .trim_end()
        })
        .collect();

    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => (lines[first..=last].join("\n"), first),
        _ => (String::new(), 0),
    }
}

// ============================================================================
// Docset index
// ============================================================================

/// Lookup from documented node to docset position
#[derive(Debug, Default)]
pub struct DocsetIndex {
    by_node: AHashMap<NodeId, usize>,
}

impl DocsetIndex {
    pub fn build(docsets: &[PendingDocset<'_>]) -> Self {
        let mut by_node = AHashMap::with_capacity(docsets.len());
        for (position, pending) in docsets.iter().enumerate() {
            if let Some(id) = pending.docset.node {
                by_node.insert(id, position);
            }
        }
        Self { by_node }
    }

    pub fn get(&self, id: NodeId) -> Option<usize> {
        self.by_node.get(&id).copied()
    }
}
