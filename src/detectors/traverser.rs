//! Alias-aware traversal of function bodies
//!
//! Methods often rename the instance before using it:
//!
//! ```js
//! onClick: function() {
//!     var me = this;
//!     me.fireEvent('click', me);
//! }
//! ```
//!
//! [`ScopedTraverser`] walks a function body depth-first and hands every node
//! to a visitor together with the [`AliasScope`] in effect at that node: the
//! set of local names currently bound to `this`.
//!
//! Scopes are immutable. Declaring `var me = this` produces a new scope for
//! the remaining siblings of the declaration; the parent's scope is never
//! touched, so sibling blocks cannot see each other's aliases. The
//! [`ScopeMode::Leaky`] mode instead accumulates every alias into one scope
//! for the rest of the walk, which lets `var me = this` declared inside an
//! `if` block be seen after it.

use std::rc::Rc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::ast::{AstNode, NodeKind};

/// How aliases declared in nested blocks propagate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScopeMode {
    /// Aliases are visible only after their declaration, inside the
    /// enclosing block
    #[default]
    Lexical,
    /// Aliases stay visible for the rest of the traversal once declared
    Leaky,
}

#[derive(Debug)]
struct ScopeLink {
    name: String,
    next: Option<Rc<ScopeLink>>,
}

/// Persistent set of names bound to the enclosing instance
#[derive(Debug, Clone, Default)]
pub struct AliasScope {
    head: Option<Rc<ScopeLink>>,
}

impl AliasScope {
    /// Scope containing only `this`
    pub fn instance() -> Self {
        Self::default().with("this")
    }

    /// A new scope with `name` added; `self` is unchanged
    pub fn with(&self, name: impl Into<String>) -> Self {
        Self {
            head: Some(Rc::new(ScopeLink {
                name: name.into(),
                next: self.head.clone(),
            })),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        let mut link = self.head.as_deref();
        while let Some(current) = link {
            if current.name == name {
                return true;
            }
            link = current.next.as_deref();
        }
        false
    }
}

/// Depth-first walker that tracks `this` aliases
pub struct ScopedTraverser {
    mode: ScopeMode,
    leaked: AliasScope,
}

impl ScopedTraverser {
    pub fn new(mode: ScopeMode) -> Self {
        Self {
            mode,
            leaked: AliasScope::instance(),
        }
    }

    /// Walk `root` and everything below it
    pub fn traverse<'a, F>(&mut self, root: AstNode<'a>, visitor: &mut F)
    where
        F: FnMut(&AstNode<'a>, &AliasScope),
    {
        self.leaked = AliasScope::instance();
        self.walk(root, &AliasScope::instance(), visitor);
    }

    fn walk<'a, F>(&mut self, node: AstNode<'a>, scope: &AliasScope, visitor: &mut F)
    where
        F: FnMut(&AstNode<'a>, &AliasScope),
    {
        match self.mode {
            ScopeMode::Lexical => visitor(&node, scope),
            ScopeMode::Leaky => visitor(&node, &self.leaked),
        }

        let mut inner = scope.clone();
        for child in node.named_children() {
            self.walk(child, &inner, visitor);
            for alias in declared_aliases(&child) {
                tracing::trace!("alias of this: {}", alias);
                if self.mode == ScopeMode::Leaky {
                    self.leaked = self.leaked.with(alias.clone());
                }
                inner = inner.with(alias);
            }
        }
    }
}

/// Names declared as `var name = this` by a declaration or declarator
fn declared_aliases(node: &AstNode<'_>) -> Vec<String> {
    let declarators = match node.kind() {
        NodeKind::VariableDeclaration => node.declarators(),
        NodeKind::VariableDeclarator => vec![*node],
        _ => return Vec::new(),
    };

    declarators
        .into_iter()
        .filter(|d| d.child("value").unparenthesize().is(NodeKind::This))
        .filter_map(|d| d.child("name").ident_name())
        .collect()
}
