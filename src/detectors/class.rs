//! Class detection and member expansion
//!
//! Alternatives are tried in order; the first that matches decides:
//!
//! | # | Code                                   | Members from        |
//! |---|----------------------------------------|---------------------|
//! | 1 | `Ext.define("Name", {...})`            | config object       |
//! | 2 | `Ext.override(Target, {...})`          | second argument     |
//! | 3 | `Name = Ext.extend(Base, {...})`       | last argument       |
//! | 4 | `Foo.Bar = ...` (upper-case last part) | object/array value  |
//! | 5 | `var Name = Ext.extend(Base, {...})`   | last argument       |
//! | 6 | `var Foo = ...` (upper-case name)      | object/array value  |
//! | 7 | `function Foo() {}`                    | none                |
//! | 8 | `({...})`                              | the object          |
//! | 9 | `[...]`                                | elements, as enum   |

use crate::ast::{AstNode, NodeKind};
use crate::context::EngineContext;
use crate::schema::{Entity, EntityKind};

use super::{detect_member, is_class_name};

pub fn detect_class(node: &AstNode<'_>, engine: &EngineContext) -> Option<Entity> {
    let class = from_define_call(node, engine)
        .or_else(|| from_override_call(node, engine))
        .or_else(|| from_extend_assignment(node, engine))
        .or_else(|| from_class_assignment(node, engine))
        .or_else(|| from_extend_var(node, engine))
        .or_else(|| from_class_var(node, engine))
        .or_else(|| from_class_function(node))
        .or_else(|| from_object_literal(node, engine))
        .or_else(|| from_array_literal(node))?;

    tracing::debug!(
        "line {}: class {:?} with {} members",
        node.line(),
        class.name_str(),
        class.members.len()
    );
    Some(class)
}

/// True when the statement defines a class through a define, override or
/// extend call rather than by naming convention
pub fn uses_class_idiom(code: &AstNode<'_>) -> bool {
    let declarator = code.first_declarator();
    let value = if code.is(NodeKind::AssignmentExpression) {
        code.child("right")
    } else if !declarator.is_empty() {
        declarator.child("value")
    } else {
        *code
    }
    .unparenthesize();
    value.is_define_call() || value.is_override_call() || value.is_extend_call()
}

// ============================================================================
// Alternatives
// ============================================================================

fn from_define_call(node: &AstNode<'_>, engine: &EngineContext) -> Option<Entity> {
    if !node.is_define_call() {
        return None;
    }
    let name_arg = node.argument(0);
    let name = name_arg.string_value().or_else(|| name_arg.to_text())?;
    let mut class = Entity::named(EntityKind::Class, name);

    let config = node.argument(1).unparenthesize();
    if config.is(NodeKind::Object) {
        expand_define_config(&config, engine, &mut class);
    }

    // Everything without a parent derives from the root base class
    let base = format!("{}.Base", engine.aliases.primary_root());
    if class.extends.is_none() && class.override_of.is_none() && class.name_str() != base {
        class.extends = Some(base);
    }
    Some(class)
}

fn from_override_call(node: &AstNode<'_>, engine: &EngineContext) -> Option<Entity> {
    if !node.is_override_call() {
        return None;
    }
    let target = node.argument(0);
    let name = target
        .dotted_name()
        .or_else(|| target.string_value())
        .or_else(|| target.to_text())?;
    let mut class = Entity::named(EntityKind::Class, name);
    expand_literal(&node.argument(1), engine, &mut class);
    Some(class)
}

fn from_extend_assignment(node: &AstNode<'_>, engine: &EngineContext) -> Option<Entity> {
    if !node.is(NodeKind::AssignmentExpression) {
        return None;
    }
    let call = node.child("right").unparenthesize();
    if !call.is_extend_call() {
        return None;
    }
    let mut class = Entity::named(EntityKind::Class, node.child("left").dotted_name()?);
    apply_extend_call(&call, engine, &mut class);
    Some(class)
}

fn from_class_assignment(node: &AstNode<'_>, engine: &EngineContext) -> Option<Entity> {
    if !node.is(NodeKind::AssignmentExpression) {
        return None;
    }
    let name = node.child("left").dotted_name()?;
    if !is_class_name(&name) {
        return None;
    }
    let mut class = Entity::named(EntityKind::Class, name);
    expand_literal(&node.child("right"), engine, &mut class);
    Some(class)
}

fn from_extend_var(node: &AstNode<'_>, engine: &EngineContext) -> Option<Entity> {
    let declarator = node.first_declarator();
    let call = declarator.child("value").unparenthesize();
    if !call.is_extend_call() {
        return None;
    }
    let mut class = Entity::named(EntityKind::Class, declarator.child("name").ident_name()?);
    apply_extend_call(&call, engine, &mut class);
    Some(class)
}

fn from_class_var(node: &AstNode<'_>, engine: &EngineContext) -> Option<Entity> {
    let declarator = node.first_declarator();
    let name = declarator.child("name").ident_name()?;
    if !is_class_name(&name) {
        return None;
    }
    let mut class = Entity::named(EntityKind::Class, name);
    expand_literal(&declarator.child("value"), engine, &mut class);
    Some(class)
}

fn from_class_function(node: &AstNode<'_>) -> Option<Entity> {
    if !node.is(NodeKind::FunctionDeclaration) {
        return None;
    }
    let name = node.child("name").to_text()?;
    is_class_name(&name).then(|| Entity::named(EntityKind::Class, name))
}

fn from_object_literal(node: &AstNode<'_>, engine: &EngineContext) -> Option<Entity> {
    if !node.is(NodeKind::Object) {
        return None;
    }
    let mut class = Entity::new(EntityKind::Class);
    expand_literal(node, engine, &mut class);
    Some(class)
}

fn from_array_literal(node: &AstNode<'_>) -> Option<Entity> {
    if !node.is(NodeKind::Array) {
        return None;
    }
    let mut class = Entity::new(EntityKind::Class);
    expand_enum(node, &mut class);
    Some(class)
}

// ============================================================================
// Expansion
// ============================================================================

/// `Ext.extend(Base, {...})` or the three-argument
/// `Ext.extend(Sub, Base, {...})`
fn apply_extend_call(call: &AstNode<'_>, engine: &EngineContext, class: &mut Entity) {
    let args = call.arguments();
    let (parent, members) = match args.as_slice() {
        [_, parent, members] => (parent, Some(members)),
        [parent, members, ..] => (parent, Some(members)),
        [parent] => (parent, None),
        [] => return,
    };
    class.extends = parent.dotted_name().or_else(|| parent.to_text());
    if let Some(members) = members {
        expand_literal(members, engine, class);
    }
}

/// Members of an object literal, or enum values of an array literal.
/// Any other value contributes nothing.
fn expand_literal(value: &AstNode<'_>, engine: &EngineContext, class: &mut Entity) {
    let value = value.unparenthesize();
    match value.kind() {
        NodeKind::Object => {
            for prop in value.object_properties() {
                if let Some(member) = detect_member(&prop, engine) {
                    class.members.push(member);
                }
            }
        }
        NodeKind::Array => expand_enum(&value, class),
        _ => {}
    }
}

/// Documentation-only enumeration: each element is a property
fn expand_enum(array: &AstNode<'_>, class: &mut Entity) {
    class.doc_only_enum = true;
    for element in array.array_elements() {
        let Some(name) = element.string_value().or_else(|| element.to_text()) else {
            continue;
        };
        let mut value = Entity::named(EntityKind::Property, name);
        if element.to_value().is_some() {
            value.default = element.to_text();
            value.value_type = element.value_kind().map(str::to_string);
        }
        value.node = element.id();
        value.line = Some(element.line());
        class.members.push(value);
    }
}

/// Flags given to every member declared inside one of the grouping keys
#[derive(Debug, Clone, Copy, Default)]
struct MemberGroup {
    config: bool,
    accessor: bool,
    evented: bool,
    is_static: bool,
    inheritable: bool,
    private: bool,
}

impl MemberGroup {
    fn for_key(key: &str) -> Option<Self> {
        let group = match key {
            "config" | "cachedConfig" => Self {
                config: true,
                accessor: true,
                ..Self::default()
            },
            "eventedConfig" => Self {
                config: true,
                accessor: true,
                evented: true,
                ..Self::default()
            },
            "statics" => Self {
                is_static: true,
                ..Self::default()
            },
            "inheritableStatics" => Self {
                is_static: true,
                inheritable: true,
                ..Self::default()
            },
            "privates" => Self {
                private: true,
                ..Self::default()
            },
            _ => return None,
        };
        Some(group)
    }

    fn apply(&self, member: &mut Entity) {
        // Functions inside a config block are still methods
        member.config |= self.config && member.kind == EntityKind::Property;
        member.accessor |= self.accessor;
        member.evented |= self.evented;
        member.is_static |= self.is_static;
        member.inheritable |= self.inheritable;
        member.private |= self.private;
    }
}

/// Walk an `Ext.define` configuration object key by key
fn expand_define_config(config: &AstNode<'_>, engine: &EngineContext, class: &mut Entity) {
    for prop in config.object_properties() {
        let Some(key) = prop.key_name() else {
            continue;
        };
        let value = prop.child("value").unparenthesize();

        if let Some(group) = MemberGroup::for_key(&key) {
            for inner in value.object_properties() {
                if let Some(mut member) = detect_member(&inner, engine) {
                    group.apply(&mut member);
                    class.members.push(member);
                }
            }
            continue;
        }

        if let Some(tag) = engine.registry.by_config_key(&key) {
            if tag.parse_config(&key, &value, class) {
                continue;
            }
            tracing::debug!("line {}: unusable value for {}", prop.line(), key);
        }

        if let Some(member) = detect_member(&prop, engine) {
            class.members.push(member);
        }
    }
}
