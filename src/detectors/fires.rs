//! Events fired from a method body
//!
//! Collects the names passed to `<alias>.fireEvent("name", ...)` where the
//! receiver is `this` or a local alias of it.

use crate::ast::AstNode;
use crate::detectors::traverser::{ScopeMode, ScopedTraverser};

/// Sorted, de-duplicated names of events fired by `func`
pub fn detect_fires(func: &AstNode<'_>, mode: ScopeMode) -> Vec<String> {
    if !func.is_proper_function() {
        return Vec::new();
    }

    let mut events = Vec::new();
    ScopedTraverser::new(mode).traverse(func.child("body"), &mut |node, scope| {
        if let Some(name) =
            node.receiver_call_with_string_arg(&["fireEvent"], |receiver| scope.contains(receiver))
        {
            events.push(name);
        }
    });

    events.sort();
    events.dedup();
    events
}
