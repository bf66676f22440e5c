//! Namespace alias table
//!
//! Framework idioms such as `Ext.define(...)` are recognized by the textual
//! callee of a call. Projects often re-export the framework under their own
//! root (`MyApp.define`), so the set of accepted roots is configurable. The
//! table is built once per run and passed explicitly to every stage that
//! needs it.

/// Root used when no aliases are configured
pub const DEFAULT_ROOT: &str = "Ext";

/// A framework idiom recognized by its callee spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Idiom {
    /// `Ext.define("Name", {...})` and its `Ext.ClassManager.create` alias
    Define,
    /// `Ext.extend(Base, {...})`
    Extend,
    /// `Ext.override(Target, {...})`
    Override,
    /// `Ext.emptyFn`, used as a no-op function value
    EmptyFunction,
}

impl Idiom {
    /// Suffixes that must follow a configured root for this idiom
    pub fn suffixes(&self) -> &'static [&'static str] {
        match self {
            Self::Define => &[".define", ".ClassManager.create"],
            Self::Extend => &[".extend"],
            Self::Override => &[".override"],
            Self::EmptyFunction => &[".emptyFn"],
        }
    }
}

/// Maps each idiom to the root identifiers accepted for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceAliases {
    roots: Vec<String>,
}

impl Default for NamespaceAliases {
    fn default() -> Self {
        Self {
            roots: vec![DEFAULT_ROOT.to_string()],
        }
    }
}

impl NamespaceAliases {
    /// Build a table from a list of roots.
    ///
    /// The list fully replaces the default. Blank entries are dropped and an
    /// empty list falls back to the default root.
    pub fn new<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cleaned: Vec<String> = Vec::new();
        for root in roots {
            let root = root.as_ref().trim();
            if !root.is_empty() && !cleaned.iter().any(|r| r == root) {
                cleaned.push(root.to_string());
            }
        }

        if cleaned.is_empty() {
            return Self::default();
        }

        Self { roots: cleaned }
    }

    /// Configured roots, in configuration order
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// The first configured root, used for implied names like `Ext.Base`
    pub fn primary_root(&self) -> &str {
        self.roots
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_ROOT)
    }

    /// True iff `callee_text` is one of the roots followed by one of the
    /// idiom's suffixes
    pub fn matches(&self, idiom: Idiom, callee_text: &str) -> bool {
        self.roots.iter().any(|root| {
            callee_text
                .strip_prefix(root.as_str())
                .is_some_and(|rest| idiom.suffixes().contains(&rest))
        })
    }
}
