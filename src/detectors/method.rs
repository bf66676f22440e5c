//! Method detection

use crate::ast::{AstNode, NodeKind};
use crate::context::EngineContext;
use crate::schema::{Entity, EntityKind};

use super::fires::detect_fires;
use super::last_segment;
use super::method_calls::detect_method_calls;

/// A function value or the `emptyFn` marker
pub fn is_method_value(value: &AstNode<'_>) -> bool {
    let value = value.unparenthesize();
    value.is_function() || value.is_empty_fn_marker()
}

/// Method named `name` whose implementation is `func`
pub fn method_entity(name: String, func: &AstNode<'_>, engine: &EngineContext) -> Entity {
    let func = func.unparenthesize();
    let mut method = Entity::named(EntityKind::Method, name);
    if func.is_function() {
        method.params = func.function_params();
        method.fires = detect_fires(&func, engine.scope_mode);
        method.calls = detect_method_calls(&func, engine.scope_mode);
        method.chainable = func.returns_this();
    }
    method
}

pub fn detect_method(node: &AstNode<'_>, engine: &EngineContext) -> Option<Entity> {
    match node.kind() {
        NodeKind::FunctionDeclaration => {
            let name = node.child("name").to_text()?;
            Some(method_entity(name, node, engine))
        }
        NodeKind::AssignmentExpression => {
            let value = node.child("right");
            if !is_method_value(&value) {
                return None;
            }
            let target = node.child("left");
            let name = target.dotted_name().or_else(|| target.to_text())?;
            Some(method_entity(last_segment(&name).to_string(), &value, engine))
        }
        NodeKind::VariableDeclaration => {
            let declarator = node.first_declarator();
            let value = declarator.child("value");
            if !is_method_value(&value) {
                return None;
            }
            let name = declarator.child("name").ident_name()?;
            Some(method_entity(name, &value, engine))
        }
        NodeKind::Pair => {
            if !is_method_value(&node.child("value")) {
                return None;
            }
            super::detect_member(node, engine)
        }
        NodeKind::MethodDefinition => super::detect_member(node, engine),
        _ => None,
    }
}
