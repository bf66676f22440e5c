//! Documentation data model: docsets, entities and warnings

use serde::{Deserialize, Serialize};

use crate::ast::NodeId;

/// Kind of documentable thing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Class,
    Method,
    #[default]
    Property,
    Event,
    Listener,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Method => "method",
            Self::Property => "property",
            Self::Event => "event",
            Self::Listener => "listener",
        }
    }
}

/// Whether a comment uses the documentation marker (`/**`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    DocComment,
    #[default]
    PlainComment,
}

/// Function parameter, detected or documented
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Documented return value of a method
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnValue {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

/// One documentable thing: detected from code, documented, or both
///
/// Class entities carry their undocumented members inline in `members`.
/// Nesting never goes deeper than class → member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,

    /// `None` for the anonymous fallback entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-form description text from the doc-comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    // ------------------------------------------------------------------
    // Class fields
    // ------------------------------------------------------------------
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_class_names: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uses: Vec<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub singleton: bool,

    /// Class patched by an override
    #[serde(default, rename = "override", skip_serializing_if = "Option::is_none")]
    pub override_of: Option<String>,

    /// Documentation-only enumeration built from an array literal
    #[serde(default, rename = "enum", skip_serializing_if = "std::ops::Not::not")]
    pub doc_only_enum: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Entity>,

    // ------------------------------------------------------------------
    // Member fields
    // ------------------------------------------------------------------
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,

    #[serde(default, rename = "return", skip_serializing_if = "Option::is_none")]
    pub return_value: Option<ReturnValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fires: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calls: Vec<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub chainable: bool,

    #[serde(default, rename = "static", skip_serializing_if = "std::ops::Not::not")]
    pub is_static: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub private: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub protected: bool,

    /// Declared inside a `config`-family block (an Ext config option)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub config: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub accessor: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub evented: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inheritable: bool,

    // ------------------------------------------------------------------
    // Provenance
    // ------------------------------------------------------------------
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub autodetected: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inheritdoc: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    /// Node the entity was detected from
    #[serde(skip)]
    pub node: Option<NodeId>,
}

impl Entity {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn named(kind: EntityKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind,
            name: (!name.is_empty()).then_some(name),
            ..Self::default()
        }
    }

    /// The anonymous property every unclassified docset falls back to
    pub fn anonymous() -> Self {
        Self::new(EntityKind::Property)
    }

    /// True for the nameless property given to unrecognized code
    pub fn is_anonymous(&self) -> bool {
        self.kind == EntityKind::Property && self.name.is_none()
    }

    pub fn name_str(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Members that may inherit documentation from an ancestor's member
    /// of the same name
    pub fn is_inheritable_kind(&self) -> bool {
        match self.kind {
            EntityKind::Method => true,
            EntityKind::Property => self.config,
            _ => false,
        }
    }
}

/// A comment paired with the code it documents
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Docset {
    /// Comment body with delimiters stripped; `None` for synthesized docsets
    pub comment: Option<String>,
    pub comment_kind: CommentKind,
    pub line: usize,
    /// Detected entity for the documented code
    pub code: Option<Entity>,

    #[serde(skip)]
    pub node: Option<NodeId>,

    /// Source line of the first line of `comment`
    #[serde(skip)]
    pub text_line: usize,

    /// Byte offset used to keep docsets in source order
    #[serde(skip)]
    pub offset: usize,
}

impl Docset {
    pub fn is_doc_comment(&self) -> bool {
        self.comment_kind == CommentKind::DocComment
    }
}

/// Category of a non-fatal finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Documented parameters disagree with the detected ones
    ParamMismatch,
    /// A doc-comment used a tag the registry does not know
    UnknownTag,
}

/// Non-fatal finding reported alongside the extraction result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub line: usize,
    pub message: String,
}

/// Result of processing one source file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extraction {
    /// Every docset in source order, each with its detected code entity
    pub docsets: Vec<Docset>,
    /// Final merged entity for each documented docset, in source order
    pub entities: Vec<Entity>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}
