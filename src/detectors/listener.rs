//! Listener detection: `this.on("name", handler)` and
//! `this.addListener("name", handler)` at statement level

use crate::ast::AstNode;
use crate::schema::{Entity, EntityKind};

const LISTEN_METHODS: [&str; 2] = ["on", "addListener"];

pub fn detect_listener(node: &AstNode<'_>) -> Option<Entity> {
    let name = node.receiver_call_with_string_arg(&LISTEN_METHODS, |receiver| receiver == "this")?;
    let mut listener = Entity::named(EntityKind::Listener, name);
    listener.params = node.argument(1).unparenthesize().function_params();
    Some(listener)
}
