//! Property detection

use crate::ast::{AstNode, NodeKind};
use crate::schema::{Entity, EntityKind};

use super::last_segment;

/// Property named `name` holding `value`.
///
/// Statically evaluable values give the property its default (as source
/// text) and its type.
pub fn property_entity(name: String, value: &AstNode<'_>) -> Entity {
    let mut property = Entity::named(EntityKind::Property, name);
    if value.to_value().is_some() {
        property.default = value.to_text();
        property.value_type = value.value_kind().map(str::to_string);
    }
    property
}

pub fn detect_property(node: &AstNode<'_>) -> Option<Entity> {
    match node.kind() {
        NodeKind::AssignmentExpression => {
            let target = node.child("left");
            let name = target.dotted_name().or_else(|| target.to_text())?;
            Some(property_entity(
                last_segment(&name).to_string(),
                &node.child("right"),
            ))
        }
        NodeKind::VariableDeclaration => {
            let declarator = node.first_declarator();
            let name = declarator.child("name").to_text()?;
            Some(property_entity(name, &declarator.child("value")))
        }
        NodeKind::Pair => {
            let name = node.key_name()?;
            Some(property_entity(name, &node.child("value")))
        }
        NodeKind::ShorthandProperty | NodeKind::Identifier => {
            Some(Entity::named(EntityKind::Property, node.to_text()?))
        }
        NodeKind::StringLiteral => Some(Entity::named(EntityKind::Property, node.string_value()?)),
        _ => None,
    }
}
