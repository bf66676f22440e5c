//! Member-level tags: kinds, signatures and values

use crate::merge::MergeContext;
use crate::schema::{Entity, EntityKind, Param, ReturnValue, Warning, WarningKind};

use super::{
    merge_list, merge_text, non_empty, split_list, split_name, split_type, split_word, DocEntity,
    TagBehavior, TagData, TagKey, TagRegistry,
};

pub fn register_all(registry: TagRegistry) -> TagRegistry {
    registry
        .register(ParamTag)
        .register(ReturnTag)
        .register(FiresTag)
        .register(TypeTag)
        .register(DefaultTag)
        .register(DeprecatedTag)
}

/// `@marker [name]`
fn parse_name(marker: &str, body: &str) -> Vec<TagData> {
    let (name, rest) = split_word(body);
    vec![TagData {
        name,
        text: non_empty(rest),
        ..TagData::new(marker)
    }]
}

/// `@marker {Type} [name=default] description`
fn parse_typed_name(marker: &str, body: &str) -> Vec<TagData> {
    let (type_hint, rest) = split_type(body);
    let (name, optional, default, rest) = split_name(rest);
    vec![TagData {
        name,
        type_hint,
        text: non_empty(rest),
        optional,
        default,
        ..TagData::new(marker)
    }]
}

fn apply_name(doc: &mut DocEntity, tags: &[TagData]) {
    if let Some(name) = tags.iter().rev().find_map(|t| t.name.clone()) {
        doc.entity.name = Some(name);
    }
}

// ============================================================================
// Kind tags
// ============================================================================

pub struct MethodTag;

impl TagBehavior for MethodTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: "method",
            markers: &["method"],
            config_keys: &[],
        }
    }

    fn parse_doc(&self, marker: &str, body: &str) -> Vec<TagData> {
        parse_name(marker, body)
    }

    fn process_doc(&self, doc: &mut DocEntity, tags: &[TagData]) {
        doc.kind = Some(EntityKind::Method);
        apply_name(doc, tags);
    }
}

/// `@property` and `@cfg`; the latter marks a config option
pub struct PropertyTag;

impl TagBehavior for PropertyTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: "property",
            markers: &["property", "cfg"],
            config_keys: &[],
        }
    }

    fn parse_doc(&self, marker: &str, body: &str) -> Vec<TagData> {
        parse_typed_name(marker, body)
    }

    fn process_doc(&self, doc: &mut DocEntity, tags: &[TagData]) {
        doc.kind = Some(EntityKind::Property);
        apply_name(doc, tags);
        if tags.iter().any(|t| t.marker == "cfg") {
            doc.entity.config = true;
        }
        if let Some(tag) = tags.last() {
            if tag.type_hint.is_some() {
                doc.entity.value_type = tag.type_hint.clone();
            }
            if tag.default.is_some() {
                doc.entity.default = tag.default.clone();
            }
            if let Some(text) = &tag.text {
                doc.entity.doc = Some(match doc.entity.doc.take() {
                    Some(existing) => format!("{}\n{}", existing, text),
                    None => text.clone(),
                });
            }
        }
    }

    fn merge(&self, target: &mut Entity, cx: &mut MergeContext<'_>) {
        target.config = cx.doc.config || (cx.same_kind && cx.code.config);
    }
}

pub struct EventTag;

impl TagBehavior for EventTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: "event",
            markers: &["event"],
            config_keys: &[],
        }
    }

    fn parse_doc(&self, marker: &str, body: &str) -> Vec<TagData> {
        parse_name(marker, body)
    }

    fn process_doc(&self, doc: &mut DocEntity, tags: &[TagData]) {
        doc.kind = Some(EntityKind::Event);
        apply_name(doc, tags);
    }
}

/// Owns the merge of the `name` field.
///
/// Names are set by the kind tags; the merge falls back to the detected
/// name even when the documented kind differs from the detected one.
pub struct NameTag;

impl TagBehavior for NameTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: "name",
            markers: &[],
            config_keys: &[],
        }
    }

    fn process_doc(&self, _doc: &mut DocEntity, _tags: &[TagData]) {}

    fn merge(&self, target: &mut Entity, cx: &mut MergeContext<'_>) {
        target.name = merge_text(&cx.doc.name, &cx.code.name, true);
    }
}

// ============================================================================
// Signature tags
// ============================================================================

pub struct ParamTag;

impl TagBehavior for ParamTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: "param",
            markers: &["param"],
            config_keys: &[],
        }
    }

    fn parse_doc(&self, marker: &str, body: &str) -> Vec<TagData> {
        parse_typed_name(marker, body)
    }

    fn process_doc(&self, doc: &mut DocEntity, tags: &[TagData]) {
        doc.entity.params.extend(tags.iter().filter_map(|t| {
            Some(Param {
                name: t.name.clone()?,
                type_hint: t.type_hint.clone(),
                doc: t.text.clone(),
                optional: t.optional,
                default: t.default.clone(),
            })
        }));
    }

    /// Documented parameters win. When both sides list parameters and the
    /// names disagree, a warning is raised.
    fn merge(&self, target: &mut Entity, cx: &mut MergeContext<'_>) {
        let doc: &[Param] = &cx.doc.params;
        let code: &[Param] = if cx.same_kind { &cx.code.params } else { &[] };

        if doc.is_empty() {
            target.params = code.to_vec();
            return;
        }
        target.params = doc.to_vec();

        if code.is_empty() {
            return;
        }
        let doc_names: Vec<&str> = doc.iter().map(|p| p.name.as_str()).collect();
        let code_names: Vec<&str> = code.iter().map(|p| p.name.as_str()).collect();
        if doc_names != code_names {
            let message = format!(
                "documented parameters ({}) differ from code ({}) for {}",
                doc_names.join(", "),
                code_names.join(", "),
                target.name_str()
            );
            tracing::warn!("line {}: {}", cx.line, message);
            cx.warnings.push(Warning {
                kind: WarningKind::ParamMismatch,
                line: cx.line,
                message,
            });
        }
    }
}

pub struct ReturnTag;

impl TagBehavior for ReturnTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: "return",
            markers: &["return", "returns"],
            config_keys: &[],
        }
    }

    fn parse_doc(&self, marker: &str, body: &str) -> Vec<TagData> {
        let (type_hint, rest) = split_type(body);
        vec![TagData {
            type_hint,
            text: non_empty(rest),
            ..TagData::new(marker)
        }]
    }

    fn process_doc(&self, doc: &mut DocEntity, tags: &[TagData]) {
        if let Some(tag) = tags.last() {
            doc.entity.return_value = Some(ReturnValue {
                type_hint: tag.type_hint.clone(),
                doc: tag.text.clone(),
            });
        }
    }

    fn merge(&self, target: &mut Entity, cx: &mut MergeContext<'_>) {
        target.return_value = cx.doc.return_value.clone();
    }
}

pub struct FiresTag;

impl TagBehavior for FiresTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: "fires",
            markers: &["fires"],
            config_keys: &[],
        }
    }

    fn process_doc(&self, doc: &mut DocEntity, tags: &[TagData]) {
        for event in tags.iter().filter_map(|t| t.text.as_deref()).flat_map(split_list) {
            if !doc.entity.fires.contains(&event) {
                doc.entity.fires.push(event);
            }
        }
    }

    fn merge(&self, target: &mut Entity, cx: &mut MergeContext<'_>) {
        target.fires = merge_list(&cx.doc.fires, &cx.code.fires, cx.same_kind);
    }
}

// ============================================================================
// Value tags
// ============================================================================

pub struct TypeTag;

impl TagBehavior for TypeTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: "type",
            markers: &["type"],
            config_keys: &[],
        }
    }

    fn parse_doc(&self, marker: &str, body: &str) -> Vec<TagData> {
        let (type_hint, rest) = split_type(body);
        let type_hint = type_hint.or_else(|| split_word(rest).0);
        vec![TagData {
            type_hint,
            ..TagData::new(marker)
        }]
    }

    fn process_doc(&self, doc: &mut DocEntity, tags: &[TagData]) {
        if let Some(ty) = tags.iter().rev().find_map(|t| t.type_hint.clone()) {
            doc.entity.value_type = Some(ty);
        }
    }

    fn merge(&self, target: &mut Entity, cx: &mut MergeContext<'_>) {
        target.value_type = merge_text(&cx.doc.value_type, &cx.code.value_type, cx.same_kind);
    }
}

pub struct DefaultTag;

impl TagBehavior for DefaultTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: "default",
            markers: &["default"],
            config_keys: &[],
        }
    }

    fn process_doc(&self, doc: &mut DocEntity, tags: &[TagData]) {
        if let Some(value) = tags.iter().rev().find_map(|t| t.text.clone()) {
            doc.entity.default = Some(value);
        }
    }

    fn merge(&self, target: &mut Entity, cx: &mut MergeContext<'_>) {
        target.default = merge_text(&cx.doc.default, &cx.code.default, cx.same_kind);
    }
}

pub struct DeprecatedTag;

impl TagBehavior for DeprecatedTag {
    fn key(&self) -> TagKey {
        TagKey {
            name: "deprecated",
            markers: &["deprecated"],
            config_keys: &[],
        }
    }

    fn process_doc(&self, doc: &mut DocEntity, tags: &[TagData]) {
        let text = tags.iter().rev().find_map(|t| t.text.clone());
        doc.entity.deprecated = Some(text.unwrap_or_default());
    }

    fn merge(&self, target: &mut Entity, cx: &mut MergeContext<'_>) {
        target.deprecated = cx.doc.deprecated.clone();
    }
}
