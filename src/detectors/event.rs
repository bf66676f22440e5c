//! Event detection: `this.fireEvent("name", ...)` at statement level
//!
//! Only the literal `this` receiver is accepted here. Aliases such as
//! `me` are resolved inside method bodies by [`super::fires`].

use crate::ast::AstNode;
use crate::schema::{Entity, EntityKind};

pub fn detect_event(node: &AstNode<'_>) -> Option<Entity> {
    if !node.is_fire_event_call(|receiver| receiver == "this") {
        return None;
    }
    let name = node.argument(0).string_value()?;
    Some(Entity::named(EntityKind::Event, name))
}
