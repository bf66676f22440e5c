//! Class-level tags
//!
//! Most of these double as `Ext.define` configuration keys: `extend`,
//! `mixins`, `alias`/`xtype`, `alternateClassName`, `requires`, `uses`,
//! `singleton` and `override`.

use crate::ast::{AstNode, JsValue, NodeKind};
use crate::merge::MergeContext;
use crate::schema::{Entity, EntityKind};

use super::{merge_list, merge_text, split_list, split_type, split_word, DocEntity, TagBehavior, TagData, TagKey, TagRegistry};

pub fn register_all(registry: TagRegistry) -> TagRegistry {
    registry
        .register(ExtendsTag)
        .register(ListTag {
            key: TagKey {
                name: "mixins",
                markers: &["mixins", "mixin"],
                config_keys: &["mixins"],
            },
            get: |e| &e.mixins,
            field: |e| &mut e.mixins,
        })
        .register(AliasTag)
        .register(ListTag {
            key: TagKey {
                name: "alternateClassName",
                markers: &["alternateClassName"],
                config_keys: &["alternateClassName"],
            },
            get: |e| &e.alternate_class_names,
            field: |e| &mut e.alternate_class_names,
        })
        .register(ListTag {
            key: TagKey {
                name: "requires",
                markers: &["requires"],
                config_keys: &["requires"],
            },
            get: |e| &e.requires,
            field: |e| &mut e.requires,
        })
        .register(ListTag {
            key: TagKey {
                name: "uses",
                markers: &["uses"],
                config_keys: &["uses"],
            },
            get: |e| &e.uses,
            field: |e| &mut e.uses,
        })
        .register(SingletonTag)
        .register(OverrideTag)
        .register(EnumTag)
}

/// Class names from a config value: a string, a dotted reference, or an
/// array/object of either
pub fn class_name_list(value: &AstNode<'_>) -> Vec<String> {
    let single = |node: &AstNode<'_>| node.string_value().or_else(|| node.dotted_name());
    match value.kind() {
        NodeKind::Array => value.array_elements().iter().filter_map(single).collect(),
        NodeKind::Object => value
            .object_properties()
            .iter()
            .filter(|p| p.is(NodeKind::Pair))
            .filter_map(|p| single(&p.child("value")))
            .collect(),
        _ => single(value).into_iter().collect(),
    }
}

fn last_name(tags: &[TagData]) -> Option<String> {
    tags.iter().rev().find_map(|t| t.name.clone())
}

// ============================================================================
// @class
// ============================================================================

pub struct ClassTag;

impl TagBehavior for ClassTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: "class",
            markers: &["class"],
            config_keys: &[],
        }
    }

    fn parse_doc(&self, marker: &str, body: &str) -> Vec<TagData> {
        let (name, _) = split_word(body);
        vec![TagData {
            name,
            ..TagData::new(marker)
        }]
    }

    fn process_doc(&self, doc: &mut DocEntity, tags: &[TagData]) {
        doc.kind = Some(EntityKind::Class);
        if let Some(name) = last_name(tags) {
            doc.entity.name = Some(name);
        }
    }
}

// ============================================================================
// @extends / extend:
// ============================================================================

pub struct ExtendsTag;

impl TagBehavior for ExtendsTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: "extends",
            markers: &["extends", "extend"],
            config_keys: &["extend"],
        }
    }

    fn parse_doc(&self, marker: &str, body: &str) -> Vec<TagData> {
        let (name, _) = split_word(body);
        vec![TagData {
            name,
            ..TagData::new(marker)
        }]
    }

    fn process_doc(&self, doc: &mut DocEntity, tags: &[TagData]) {
        doc.entity.extends = last_name(tags);
    }

    fn merge(&self, target: &mut Entity, cx: &mut MergeContext<'_>) {
        target.extends = merge_text(&cx.doc.extends, &cx.code.extends, cx.same_kind);
    }

    fn parse_config(&self, _key: &str, value: &AstNode<'_>, class: &mut Entity) -> bool {
        match value.string_value().or_else(|| value.dotted_name()) {
            Some(parent) => {
                class.extends = Some(parent);
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// List-valued class tags
// ============================================================================

/// Tag whose value is a list of class names
pub struct ListTag {
    key: TagKey,
    get: fn(&Entity) -> &Vec<String>,
    field: fn(&mut Entity) -> &mut Vec<String>,
}

impl TagBehavior for ListTag {
    fn key(&self) -> TagKey {
        self.key
    }

    fn process_doc(&self, doc: &mut DocEntity, tags: &[TagData]) {
        let names: Vec<String> = tags
            .iter()
            .filter_map(|t| t.text.as_deref())
            .flat_map(split_list)
            .collect();
        (self.field)(&mut doc.entity).extend(names);
    }

    fn merge(&self, target: &mut Entity, cx: &mut MergeContext<'_>) {
        let merged = merge_list((self.get)(cx.doc), (self.get)(cx.code), cx.same_kind);
        *(self.field)(target) = merged;
    }

    fn parse_config(&self, _key: &str, value: &AstNode<'_>, class: &mut Entity) -> bool {
        let names = class_name_list(value);
        if names.is_empty() {
            return false;
        }
        (self.field)(class).extend(names);
        true
    }
}

// ============================================================================
// @alias / @xtype / alias: / xtype:
// ============================================================================

pub struct AliasTag;

impl AliasTag {
    fn normalize(marker_or_key: &str, name: &str) -> String {
        if marker_or_key == "xtype" {
            format!("widget.{}", name)
        } else {
            name.to_string()
        }
    }
}

impl TagBehavior for AliasTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: "alias",
            markers: &["alias", "xtype"],
            config_keys: &["alias", "xtype"],
        }
    }

    fn parse_doc(&self, marker: &str, body: &str) -> Vec<TagData> {
        split_list(body)
            .into_iter()
            .map(|name| TagData {
                name: Some(Self::normalize(marker, &name)),
                ..TagData::new(marker)
            })
            .collect()
    }

    fn process_doc(&self, doc: &mut DocEntity, tags: &[TagData]) {
        doc.entity
            .aliases
            .extend(tags.iter().filter_map(|t| t.name.clone()));
    }

    fn merge(&self, target: &mut Entity, cx: &mut MergeContext<'_>) {
        target.aliases = merge_list(&cx.doc.aliases, &cx.code.aliases, cx.same_kind);
    }

    fn parse_config(&self, key: &str, value: &AstNode<'_>, class: &mut Entity) -> bool {
        let names = match value.to_value() {
            Some(v) => v.string_list(),
            None => return false,
        };
        if names.is_empty() {
            return false;
        }
        class
            .aliases
            .extend(names.iter().map(|n| Self::normalize(key, n)));
        true
    }
}

// ============================================================================
// @singleton / singleton:
// ============================================================================

pub struct SingletonTag;

impl TagBehavior for SingletonTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: "singleton",
            markers: &["singleton"],
            config_keys: &["singleton"],
        }
    }

    fn process_doc(&self, doc: &mut DocEntity, _tags: &[TagData]) {
        doc.entity.singleton = true;
    }

    fn merge(&self, target: &mut Entity, cx: &mut MergeContext<'_>) {
        target.singleton = cx.doc.singleton || (cx.same_kind && cx.code.singleton);
    }

    fn parse_config(&self, _key: &str, value: &AstNode<'_>, class: &mut Entity) -> bool {
        match value.to_value() {
            Some(JsValue::Boolean(flag)) => {
                class.singleton = flag;
                true
            }
            _ => false,
        }
    }
}

// ============================================================================
// @override / override:
// ============================================================================

pub struct OverrideTag;

impl TagBehavior for OverrideTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: "override",
            markers: &["override"],
            config_keys: &["override"],
        }
    }

    fn parse_doc(&self, marker: &str, body: &str) -> Vec<TagData> {
        let (name, _) = split_word(body);
        vec![TagData {
            name,
            ..TagData::new(marker)
        }]
    }

    fn process_doc(&self, doc: &mut DocEntity, tags: &[TagData]) {
        doc.entity.override_of = last_name(tags);
    }

    fn merge(&self, target: &mut Entity, cx: &mut MergeContext<'_>) {
        target.override_of = merge_text(&cx.doc.override_of, &cx.code.override_of, cx.same_kind);
    }

    fn parse_config(&self, _key: &str, value: &AstNode<'_>, class: &mut Entity) -> bool {
        match value.string_value().or_else(|| value.dotted_name()) {
            Some(target) => {
                class.override_of = Some(target);
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// @enum
// ============================================================================

pub struct EnumTag;

impl TagBehavior for EnumTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: "enum",
            markers: &["enum"],
            config_keys: &[],
        }
    }

    fn parse_doc(&self, marker: &str, body: &str) -> Vec<TagData> {
        let (type_hint, rest) = split_type(body);
        let (name, _) = split_word(rest);
        vec![TagData {
            name,
            type_hint,
            ..TagData::new(marker)
        }]
    }

    fn process_doc(&self, doc: &mut DocEntity, tags: &[TagData]) {
        doc.kind = Some(EntityKind::Class);
        doc.entity.doc_only_enum = true;
        if let Some(name) = last_name(tags) {
            doc.entity.name = Some(name);
        }
        if let Some(ty) = tags.iter().rev().find_map(|t| t.type_hint.clone()) {
            doc.entity.value_type = Some(ty);
        }
    }

    fn merge(&self, target: &mut Entity, cx: &mut MergeContext<'_>) {
        target.doc_only_enum = cx.doc.doc_only_enum || (cx.same_kind && cx.code.doc_only_enum);
    }
}
