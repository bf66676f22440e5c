//! Tag registry: one behavior unit per documentable field
//!
//! Every doc-comment tag (`@param`, `@extends`, `@static`, ...) is a
//! [`TagBehavior`]. A behavior knows how to:
//!
//! 1. parse the text following its marker into [`TagData`] records
//!    (`parse_doc`),
//! 2. fold all records of one comment into the doc-side entity
//!    (`process_doc`),
//! 3. reconcile its field between the doc side and the code side
//!    (`merge`),
//! 4. optionally claim a key of an `Ext.define` configuration object
//!    (`parse_config`), so that `extend: 'Foo'` and `@extends Foo` are
//!    handled by the same unit.
//!
//! The [`TagRegistry`] is built once, then only read. It is passed to the
//! detectors and the merge engine explicitly.

pub mod class_tags;
pub mod flags;
pub mod member_tags;
pub mod scanner;

use ahash::AHashMap;

use crate::ast::AstNode;
use crate::merge::MergeContext;
use crate::schema::{Entity, EntityKind, Warning, WarningKind};

pub use scanner::{scan_doc_comment, DocSection, ScannedComment};

/// How a behavior is found in the registry
#[derive(Debug, Clone, Copy)]
pub struct TagKey {
    /// Unique behavior name
    pub name: &'static str,
    /// Doc-comment markers, without the `@`
    pub markers: &'static [&'static str],
    /// `Ext.define` configuration keys the behavior claims
    pub config_keys: &'static [&'static str],
}

/// One parsed occurrence of a tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagData {
    /// Marker the tag was written with (`extend` vs `extends`)
    pub marker: String,
    pub name: Option<String>,
    pub type_hint: Option<String>,
    pub text: Option<String>,
    pub optional: bool,
    pub default: Option<String>,
}

impl TagData {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.to_string(),
            ..Self::default()
        }
    }

    /// Record carrying the whole body as text
    pub fn with_text(marker: &str, body: &str) -> Self {
        Self {
            text: non_empty(body),
            ..Self::new(marker)
        }
    }
}

/// Doc-side view of one comment before merging
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocEntity {
    /// Kind named explicitly by a tag
    pub kind: Option<EntityKind>,
    /// Kind suggested by `@param`/`@return` without a kind tag
    pub implied_kind: Option<EntityKind>,
    pub entity: Entity,
}

impl DocEntity {
    /// Final kind of the merged entity.
    ///
    /// An explicit kind tag wins. Otherwise the detected kind stands, and
    /// the implied kind only replaces the anonymous fallback.
    pub fn resolve_kind(&self, code: &Entity) -> EntityKind {
        match (self.kind, self.implied_kind) {
            (Some(kind), _) => kind,
            (None, Some(implied)) if code.is_anonymous() => implied,
            _ => code.kind,
        }
    }
}

/// Behavior of one tag
pub trait TagBehavior: Send + Sync {
    fn key(&self) -> TagKey;

    /// Parse the body following `@marker`
    fn parse_doc(&self, marker: &str, body: &str) -> Vec<TagData> {
        vec![TagData::with_text(marker, body)]
    }

    /// Fold all records of one comment into the doc-side entity
    fn process_doc(&self, doc: &mut DocEntity, tags: &[TagData]);

    /// Write the final value of this tag's field
    fn merge(&self, _target: &mut Entity, _cx: &mut MergeContext<'_>) {}

    /// Claim a define-call configuration key; returns false when the value
    /// has an unusable shape
    fn parse_config(&self, _key: &str, _value: &AstNode<'_>, _class: &mut Entity) -> bool {
        false
    }
}

/// Immutable table of tag behaviors
pub struct TagRegistry {
    tags: Vec<Box<dyn TagBehavior>>,
    by_marker: AHashMap<&'static str, usize>,
    by_config_key: AHashMap<&'static str, usize>,
}

impl std::fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.tags.iter().map(|t| t.key().name).collect();
        f.debug_struct("TagRegistry").field("tags", &names).finish()
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TagRegistry {
    /// A registry with no tags
    pub fn empty() -> Self {
        Self {
            tags: Vec::new(),
            by_marker: AHashMap::new(),
            by_config_key: AHashMap::new(),
        }
    }

    /// Add a behavior. Later registrations win on marker or key clashes.
    pub fn register(mut self, tag: impl TagBehavior + 'static) -> Self {
        let key = tag.key();
        let index = self.tags.len();
        for marker in key.markers {
            self.by_marker.insert(*marker, index);
        }
        for config_key in key.config_keys {
            self.by_config_key.insert(*config_key, index);
        }
        self.tags.push(Box::new(tag));
        self
    }

    /// All built-in tags
    pub fn builtin() -> Self {
        let registry = Self::empty()
            // Kind-defining tags
            .register(class_tags::ClassTag)
            .register(member_tags::MethodTag)
            .register(member_tags::PropertyTag)
            .register(member_tags::EventTag)
            .register(member_tags::NameTag);
        let registry = class_tags::register_all(registry);
        let registry = member_tags::register_all(registry);
        flags::register_all(registry)
    }

    pub fn by_marker(&self, marker: &str) -> Option<&dyn TagBehavior> {
        self.by_marker.get(marker).map(|&i| self.tags[i].as_ref())
    }

    pub fn by_config_key(&self, key: &str) -> Option<&dyn TagBehavior> {
        self.by_config_key.get(key).map(|&i| self.tags[i].as_ref())
    }

    /// Behaviors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn TagBehavior> {
        self.tags.iter().map(|t| t.as_ref())
    }

    /// Parse a doc-comment body into its doc-side entity.
    ///
    /// Unknown markers are reported and kept as description text.
    pub fn parse_comment(&self, text: &str, line: usize) -> (DocEntity, Vec<Warning>) {
        let scanned = scan_doc_comment(text);
        let mut warnings = Vec::new();
        let mut description = scanned.description;
        let mut grouped: Vec<Vec<TagData>> = vec![Vec::new(); self.tags.len()];

        for section in &scanned.sections {
            match self.by_marker.get(section.marker.as_str()) {
                Some(&index) => {
                    let parsed = self.tags[index].parse_doc(&section.marker, &section.body);
                    grouped[index].extend(parsed);
                }
                None => {
                    let message = format!("unknown tag @{}", section.marker);
                    tracing::warn!("line {}: {}", line + section.line_offset, message);
                    warnings.push(Warning {
                        kind: WarningKind::UnknownTag,
                        line: line + section.line_offset,
                        message,
                    });
                    let raw = format!("@{} {}", section.marker, section.body);
                    description = match description {
                        Some(d) => Some(format!("{}\n{}", d, raw.trim_end())),
                        None => Some(raw.trim_end().to_string()),
                    };
                }
            }
        }

        let mut doc = DocEntity::default();
        doc.entity.doc = description.and_then(|d| non_empty(&d));
        for (tag, data) in self.tags.iter().zip(&grouped) {
            if !data.is_empty() {
                tag.process_doc(&mut doc, data);
            }
        }

        if doc.kind.is_none()
            && (!doc.entity.params.is_empty() || doc.entity.return_value.is_some())
        {
            doc.implied_kind = Some(EntityKind::Method);
        }
        if let Some(kind) = doc.kind.or(doc.implied_kind) {
            doc.entity.kind = kind;
        }

        (doc, warnings)
    }
}

// ============================================================================
// Shared parsing helpers
// ============================================================================

/// Trimmed copy of `s`, or `None` when blank
pub fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Split a leading `{Type}` off a tag body; braces may nest
pub fn split_type(body: &str) -> (Option<String>, &str) {
    let trimmed = body.trim_start();
    if !trimmed.starts_with('{') {
        return (None, trimmed);
    }

    let mut depth = 0usize;
    for (i, c) in trimmed.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let ty = non_empty(&trimmed[1..i]);
                    return (ty, trimmed[i + 1..].trim_start());
                }
            }
            _ => {}
        }
    }
    // Unbalanced braces: treat the whole body as text
    (None, trimmed)
}

/// Split the first whitespace-delimited word off a body
pub fn split_word(body: &str) -> (Option<String>, &str) {
    let trimmed = body.trim_start();
    match trimmed.find(char::is_whitespace) {
        Some(end) => (non_empty(&trimmed[..end]), trimmed[end..].trim_start()),
        None => (non_empty(trimmed), ""),
    }
}

/// Parse a `[name=default]` or `name` token
pub fn split_name(body: &str) -> (Option<String>, bool, Option<String>, &str) {
    let trimmed = body.trim_start();
    if let Some(rest) = trimmed.strip_prefix('[') {
        if let Some(end) = rest.find(']') {
            let inner = &rest[..end];
            let (name, default) = match inner.split_once('=') {
                Some((name, default)) => (non_empty(name), non_empty(default)),
                None => (non_empty(inner), None),
            };
            return (name, true, default, rest[end + 1..].trim_start());
        }
    }
    let (word, rest) = split_word(trimmed);
    match word {
        Some(word) => match word.split_once('=') {
            Some((name, default)) => (non_empty(name), false, non_empty(default), rest),
            None => (Some(word), false, None, rest),
        },
        None => (None, false, None, rest),
    }
}

/// Split a list body on whitespace and commas
pub fn split_list(body: &str) -> Vec<String> {
    body.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Shared merge helpers
// ============================================================================

/// Doc value when non-empty, otherwise the code value when allowed
pub fn merge_text(doc: &Option<String>, code: &Option<String>, use_code: bool) -> Option<String> {
    match doc {
        Some(value) if !value.trim().is_empty() => Some(value.clone()),
        _ if use_code => code.clone(),
        _ => doc.clone(),
    }
}

/// Doc list when non-empty, otherwise the code list when allowed
pub fn merge_list(doc: &[String], code: &[String], use_code: bool) -> Vec<String> {
    if !doc.is_empty() || !use_code {
        doc.to_vec()
    } else {
        code.to_vec()
    }
}
