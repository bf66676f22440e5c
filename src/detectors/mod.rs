//! Entity detectors
//!
//! Given the code node a docset documents, decide what kind of entity it is
//! and extract its structural fields. Detectors run in a fixed order and the
//! first match wins:
//!
//! 1. [`class`]: define/override/extend idioms, upper-case names, bare
//!    object and array literals
//! 2. [`method`]: function declarations and function-valued assignments
//! 3. [`event`]: `this.fireEvent("name")`
//! 4. [`listener`]: `this.on("name", handler)`
//! 5. [`property`]: assignments, declarations, bare identifiers and strings
//!
//! Anything else becomes an anonymous property, so every docset ends up
//! with an entity.

pub mod class;
pub mod event;
pub mod fires;
pub mod listener;
pub mod method;
pub mod method_calls;
pub mod property;
pub mod traverser;

pub use traverser::{AliasScope, ScopeMode, ScopedTraverser};

use crate::ast::{AstNode, NodeKind};
use crate::context::EngineContext;
use crate::schema::{Entity, EntityKind};

/// Classify the code following a comment
pub fn detect(node: &AstNode<'_>, engine: &EngineContext) -> Entity {
    let code = node.unwrap_statement();

    let mut entity = class::detect_class(&code, engine)
        .or_else(|| method::detect_method(&code, engine))
        .or_else(|| event::detect_event(&code))
        .or_else(|| listener::detect_listener(&code))
        .or_else(|| property::detect_property(&code))
        .unwrap_or_else(|| {
            tracing::debug!("line {}: no detector matched {:?}", node.line(), code.kind());
            Entity::anonymous()
        });

    entity.node = node.id();
    entity
}

/// Entity for one member of an object literal: a `pair`, a shorthand
/// method or a shorthand property
pub fn detect_member(prop: &AstNode<'_>, engine: &EngineContext) -> Option<Entity> {
    let name = prop.key_name()?;
    let mut member = match prop.kind() {
        NodeKind::MethodDefinition => method::method_entity(name, prop, engine),
        NodeKind::Pair => {
            let value = prop.child("value");
            if method::is_method_value(&value) {
                method::method_entity(name, &value, engine)
            } else {
                property::property_entity(name, &value)
            }
        }
        NodeKind::ShorthandProperty => Entity::named(EntityKind::Property, name),
        _ => return None,
    };
    member.node = prop.id();
    member.line = Some(prop.line());
    Some(member)
}

/// Last segment of a dotted name
pub(crate) fn last_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// True when the last segment of a dotted name starts upper-case
pub(crate) fn is_class_name(name: &str) -> bool {
    last_segment(name)
        .chars()
        .next()
        .is_some_and(char::is_uppercase)
}
