//! Methods invoked on the instance from a method body

use crate::ast::{AstNode, NodeKind};
use crate::detectors::traverser::{ScopeMode, ScopedTraverser};

/// Sorted, de-duplicated names of members called as `<alias>.name(...)`
///
/// Computed accesses such as `this[name]()` are skipped.
pub fn detect_method_calls(func: &AstNode<'_>, mode: ScopeMode) -> Vec<String> {
    if !func.is_proper_function() {
        return Vec::new();
    }

    let mut calls = Vec::new();
    ScopedTraverser::new(mode).traverse(func.child("body"), &mut |node, scope| {
        if !node.is(NodeKind::CallExpression) {
            return;
        }
        let callee = node.child("function");
        if !callee.is(NodeKind::MemberExpression) {
            return;
        }
        let rooted_at_alias = callee
            .child("object")
            .ident_name()
            .is_some_and(|receiver| scope.contains(&receiver));
        if rooted_at_alias {
            if let Some(name) = callee.child("property").ident_name() {
                calls.push(name);
            }
        }
    });

    calls.sort();
    calls.dedup();
    calls
}
