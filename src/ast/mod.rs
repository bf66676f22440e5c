//! AST node facade over tree-sitter JavaScript trees
//!
//! The detectors never touch raw tree-sitter nodes. They work with
//! [`AstNode`], a cheap `Copy` wrapper that pairs a node with the source text
//! and the namespace alias table, and answers typed questions about it:
//! normalized kind, keyed children, source text, static values and the
//! framework idiom predicates.
//!
//! A facade may also be *empty* (no underlying node). Child access on an
//! absent field returns an empty facade instead of `None`, so chains like
//! `node.child("left").child("property")` never need intermediate checks.
//!
//! Association between comments and code is by [`NodeId`], which is the
//! identity of the underlying tree-sitter node. Two facades wrapping the same
//! node always report the same id.

pub mod value;

use serde::Serialize;
use tree_sitter::Node;

use crate::namespace::{Idiom, NamespaceAliases};
use crate::schema::Param;

pub use value::JsValue;

/// Identity of a node within one parsed tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

/// Normalized node kinds
///
/// Several grammar spellings collapse into one kind (`var`/`let`/`const`
/// declarations, the various function expression forms). Kinds the engine
/// has no use for pass through unchanged as [`NodeKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    Comment,
    ExpressionStatement,
    VariableDeclaration,
    VariableDeclarator,
    FunctionDeclaration,
    FunctionExpression,
    ArrowFunction,
    MethodDefinition,
    CallExpression,
    MemberExpression,
    SubscriptExpression,
    AssignmentExpression,
    Identifier,
    PropertyIdentifier,
    This,
    StringLiteral,
    TemplateString,
    NumberLiteral,
    True,
    False,
    Null,
    RegExp,
    Object,
    Pair,
    ShorthandProperty,
    Array,
    Arguments,
    FormalParameters,
    StatementBlock,
    ReturnStatement,
    Parenthesized,
    UnaryExpression,
    ExportStatement,
    /// An empty facade
    Empty,
    /// Any grammar kind without a normalized counterpart
    Other(&'static str),
}

impl NodeKind {
    pub fn from_raw(kind: &'static str) -> Self {
        match kind {
            "program" => Self::Program,
            "comment" | "html_comment" => Self::Comment,
            "expression_statement" => Self::ExpressionStatement,
            "variable_declaration" | "lexical_declaration" => Self::VariableDeclaration,
            "variable_declarator" => Self::VariableDeclarator,
            "function_declaration" | "generator_function_declaration" => {
                Self::FunctionDeclaration
            }
            "function_expression" | "function" | "generator_function" => Self::FunctionExpression,
            "arrow_function" => Self::ArrowFunction,
            "method_definition" => Self::MethodDefinition,
            "call_expression" => Self::CallExpression,
            "member_expression" => Self::MemberExpression,
            "subscript_expression" => Self::SubscriptExpression,
            "assignment_expression" => Self::AssignmentExpression,
            "identifier" => Self::Identifier,
            "property_identifier" | "private_property_identifier" => Self::PropertyIdentifier,
            "this" => Self::This,
            "string" => Self::StringLiteral,
            "template_string" => Self::TemplateString,
            "number" => Self::NumberLiteral,
            "true" => Self::True,
            "false" => Self::False,
            "null" => Self::Null,
            "regex" => Self::RegExp,
            "object" => Self::Object,
            "pair" => Self::Pair,
            "shorthand_property_identifier" => Self::ShorthandProperty,
            "array" => Self::Array,
            "arguments" => Self::Arguments,
            "formal_parameters" => Self::FormalParameters,
            "statement_block" => Self::StatementBlock,
            "return_statement" => Self::ReturnStatement,
            "parenthesized_expression" => Self::Parenthesized,
            "unary_expression" => Self::UnaryExpression,
            "export_statement" => Self::ExportStatement,
            other => Self::Other(other),
        }
    }
}

/// Source text and idiom configuration shared by all facades of one tree
#[derive(Debug, Clone, Copy)]
pub struct AstContext<'a> {
    pub source: &'a str,
    pub aliases: &'a NamespaceAliases,
}

impl<'a> AstContext<'a> {
    pub fn new(source: &'a str, aliases: &'a NamespaceAliases) -> Self {
        Self { source, aliases }
    }

    pub fn wrap(&self, node: Node<'a>) -> AstNode<'a> {
        AstNode {
            node: Some(node),
            cx: *self,
        }
    }

    pub fn empty(&self) -> AstNode<'a> {
        AstNode {
            node: None,
            cx: *self,
        }
    }
}

/// Query facade over one tree-sitter node (or nothing)
#[derive(Clone, Copy)]
pub struct AstNode<'a> {
    node: Option<Node<'a>>,
    cx: AstContext<'a>,
}

impl std::fmt::Debug for AstNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.node {
            Some(node) => write!(f, "AstNode({} @ line {})", node.kind(), self.line()),
            None => write!(f, "AstNode(empty)"),
        }
    }
}

impl<'a> AstNode<'a> {
    // ========================================================================
    // Identity and shape
    // ========================================================================

    pub fn raw(&self) -> Option<Node<'a>> {
        self.node
    }

    pub fn id(&self) -> Option<NodeId> {
        self.node.map(|n| NodeId(n.id()))
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    pub fn kind(&self) -> NodeKind {
        match self.node {
            Some(node) => NodeKind::from_raw(node.kind()),
            None => NodeKind::Empty,
        }
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind() == kind
    }

    /// 1-based line of the node start, 0 for an empty facade
    pub fn line(&self) -> usize {
        self.node.map(|n| n.start_position().row + 1).unwrap_or(0)
    }

    pub fn start_byte(&self) -> usize {
        self.node.map(|n| n.start_byte()).unwrap_or(0)
    }

    /// Child stored under a grammar field name
    pub fn child(&self, field: &str) -> AstNode<'a> {
        AstNode {
            node: self.node.and_then(|n| n.child_by_field_name(field)),
            cx: self.cx,
        }
    }

    /// Named children, comments excluded
    pub fn named_children(&self) -> Vec<AstNode<'a>> {
        let Some(node) = self.node else {
            return Vec::new();
        };
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|c| NodeKind::from_raw(c.kind()) != NodeKind::Comment)
            .map(|c| self.cx.wrap(c))
            .collect()
    }

    /// First named, non-comment child
    pub fn first_named_child(&self) -> AstNode<'a> {
        self.named_children()
            .into_iter()
            .next()
            .unwrap_or_else(|| self.cx.empty())
    }

    // ========================================================================
    // Text and values
    // ========================================================================

    /// Source text of the node.
    ///
    /// `None` for an empty facade and for subtrees containing parse errors.
    pub fn to_text(&self) -> Option<String> {
        let node = self.node?;
        if node.has_error() {
            return None;
        }
        node.utf8_text(self.cx.source.as_bytes())
            .ok()
            .map(str::to_string)
    }

    /// Static value of a literal expression, `None` when not evaluable
    pub fn to_value(&self) -> Option<JsValue> {
        value::evaluate(self)
    }

    /// Kind name of the static value: `String`, `Number`, `Boolean`,
    /// `Array`, `Object` or `RegExp`
    pub fn value_kind(&self) -> Option<&'static str> {
        self.to_value().and_then(|v| v.kind_name())
    }

    /// Decoded contents of a string literal
    pub fn string_value(&self) -> Option<String> {
        match self.to_value()? {
            JsValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Identifier text for identifiers, property identifiers and `this`
    pub fn ident_name(&self) -> Option<String> {
        match self.kind() {
            NodeKind::Identifier
            | NodeKind::PropertyIdentifier
            | NodeKind::ShorthandProperty
            | NodeKind::This => self.to_text(),
            _ => None,
        }
    }

    /// Dotted name of an identifier or a chain of non-computed member
    /// accesses, e.g. `Foo.bar.Baz` or `this.items`
    pub fn dotted_name(&self) -> Option<String> {
        match self.kind() {
            NodeKind::Identifier | NodeKind::This => self.to_text(),
            NodeKind::MemberExpression => {
                let object = self.child("object").dotted_name()?;
                let property = self.child("property").ident_name()?;
                Some(format!("{}.{}", object, property))
            }
            _ => None,
        }
    }

    /// Key of an object member (`pair`, method shorthand, shorthand property)
    pub fn key_name(&self) -> Option<String> {
        let key = match self.kind() {
            NodeKind::Pair => self.child("key"),
            NodeKind::MethodDefinition => self.child("name"),
            NodeKind::ShorthandProperty => return self.to_text(),
            _ => return None,
        };
        match key.kind() {
            NodeKind::PropertyIdentifier | NodeKind::Identifier => key.to_text(),
            NodeKind::StringLiteral => key.string_value(),
            NodeKind::NumberLiteral => key.to_text(),
            _ => None,
        }
    }

    // ========================================================================
    // Structure helpers
    // ========================================================================

    /// Strip statement and grouping wrappers down to the documented code.
    ///
    /// `foo = 1;` becomes the assignment, `(expr)` becomes `expr`, and
    /// `export ...` becomes its declaration.
    pub fn unwrap_statement(&self) -> AstNode<'a> {
        match self.kind() {
            NodeKind::ExpressionStatement | NodeKind::Parenthesized => {
                self.first_named_child().unwrap_statement()
            }
            NodeKind::ExportStatement => {
                let declaration = self.child("declaration");
                if !declaration.is_empty() {
                    return declaration;
                }
                let value = self.child("value");
                if !value.is_empty() {
                    return value.unwrap_statement();
                }
                *self
            }
            _ => *self,
        }
    }

    /// Parent node, or an empty facade at the root
    pub fn parent(&self) -> AstNode<'a> {
        match self.node.and_then(|n| n.parent()) {
            Some(parent) => self.cx.wrap(parent),
            None => self.cx.empty(),
        }
    }

    /// Strip parentheses only
    pub fn unparenthesize(&self) -> AstNode<'a> {
        if self.is(NodeKind::Parenthesized) {
            self.first_named_child().unparenthesize()
        } else {
            *self
        }
    }

    /// Arguments of a call expression
    pub fn arguments(&self) -> Vec<AstNode<'a>> {
        if !self.is(NodeKind::CallExpression) {
            return Vec::new();
        }
        self.child("arguments").named_children()
    }

    /// Argument at `index`, or an empty facade
    pub fn argument(&self, index: usize) -> AstNode<'a> {
        self.arguments()
            .into_iter()
            .nth(index)
            .unwrap_or_else(|| self.cx.empty())
    }

    /// Textual callee of a call expression
    pub fn callee_text(&self) -> Option<String> {
        if !self.is(NodeKind::CallExpression) {
            return None;
        }
        let callee = self.child("function");
        callee.dotted_name().or_else(|| callee.to_text())
    }

    /// Members of an object literal
    pub fn object_properties(&self) -> Vec<AstNode<'a>> {
        if !self.is(NodeKind::Object) {
            return Vec::new();
        }
        self.named_children()
    }

    /// Elements of an array literal
    pub fn array_elements(&self) -> Vec<AstNode<'a>> {
        if !self.is(NodeKind::Array) {
            return Vec::new();
        }
        self.named_children()
    }

    /// Declarators of a `var`/`let`/`const` declaration
    pub fn declarators(&self) -> Vec<AstNode<'a>> {
        if !self.is(NodeKind::VariableDeclaration) {
            return Vec::new();
        }
        self.named_children()
            .into_iter()
            .filter(|c| c.is(NodeKind::VariableDeclarator))
            .collect()
    }

    /// First declarator of a declaration
    pub fn first_declarator(&self) -> AstNode<'a> {
        self.declarators()
            .into_iter()
            .next()
            .unwrap_or_else(|| self.cx.empty())
    }

    // ========================================================================
    // Functions
    // ========================================================================

    pub fn is_function(&self) -> bool {
        matches!(
            self.kind(),
            NodeKind::FunctionDeclaration
                | NodeKind::FunctionExpression
                | NodeKind::ArrowFunction
                | NodeKind::MethodDefinition
        )
    }

    /// A function with a real body, as opposed to an `emptyFn` marker
    pub fn is_proper_function(&self) -> bool {
        self.is_function() && !self.child("body").is_empty()
    }

    /// Parameters of a function node
    pub fn function_params(&self) -> Vec<Param> {
        if !self.is_function() {
            return Vec::new();
        }

        // Arrow functions with a single bare parameter use a different field
        let single = self.child("parameter");
        if !single.is_empty() {
            return single.to_text().map(Param::new).into_iter().collect();
        }

        self.child("parameters")
            .named_children()
            .into_iter()
            .filter_map(|p| param_name(&p).map(Param::new))
            .collect()
    }

    /// True when the function body ends with `return this;`
    pub fn returns_this(&self) -> bool {
        let body = self.child("body");
        if !body.is(NodeKind::StatementBlock) {
            return false;
        }
        body.named_children().last().is_some_and(|last| {
            last.is(NodeKind::ReturnStatement)
                && last.first_named_child().unparenthesize().is(NodeKind::This)
        })
    }

    // ========================================================================
    // Idiom predicates
    // ========================================================================

    fn is_idiom_call(&self, idiom: Idiom) -> bool {
        self.callee_text()
            .is_some_and(|callee| self.cx.aliases.matches(idiom, &callee))
    }

    /// `Ext.define("Name", {...})`
    pub fn is_define_call(&self) -> bool {
        self.is_idiom_call(Idiom::Define)
    }

    /// `Ext.extend(Base, {...})`
    pub fn is_extend_call(&self) -> bool {
        self.is_idiom_call(Idiom::Extend)
    }

    /// `Ext.override(Target, {...})`
    pub fn is_override_call(&self) -> bool {
        self.is_idiom_call(Idiom::Override)
    }

    /// The define, override or extend call that takes this node as its
    /// class body argument
    pub fn enclosing_class_call(&self) -> Option<AstNode<'a>> {
        let arguments = self.parent();
        if !arguments.is(NodeKind::Arguments) {
            return None;
        }
        let call = arguments.parent();
        let body = if call.is_define_call() || call.is_override_call() {
            call.argument(1)
        } else if call.is_extend_call() {
            let args = call.arguments();
            if args.len() < 2 {
                return None;
            }
            args[args.len() - 1]
        } else {
            return None;
        };
        (body.id() == self.id()).then_some(call)
    }

    /// `Ext.emptyFn` used as a value
    pub fn is_empty_fn_marker(&self) -> bool {
        self.is(NodeKind::MemberExpression)
            && self
                .dotted_name()
                .is_some_and(|name| self.cx.aliases.matches(Idiom::EmptyFunction, &name))
    }

    /// `<alias>.fireEvent("name", ...)` where `is_alias` accepts the receiver
    pub fn is_fire_event_call(&self, is_alias: impl Fn(&str) -> bool) -> bool {
        self.receiver_call_with_string_arg(&["fireEvent"], is_alias)
            .is_some()
    }

    /// Event name of a matching `<receiver>.<method>("name", ...)` call
    pub fn receiver_call_with_string_arg(
        &self,
        methods: &[&str],
        is_alias: impl Fn(&str) -> bool,
    ) -> Option<String> {
        if !self.is(NodeKind::CallExpression) {
            return None;
        }
        let callee = self.child("function");
        if !callee.is(NodeKind::MemberExpression) {
            return None;
        }
        let method = callee.child("property").ident_name()?;
        if !methods.contains(&method.as_str()) {
            return None;
        }
        let receiver = callee.child("object").ident_name()?;
        if !is_alias(&receiver) {
            return None;
        }
        self.argument(0).string_value()
    }
}

/// Name of one formal parameter; defaults and rest markers are dropped
fn param_name(param: &AstNode<'_>) -> Option<String> {
    match param.raw()?.kind() {
        "identifier" => param.to_text(),
        "assignment_pattern" => param_name(&param.child("left")),
        "rest_pattern" => param.first_named_child().to_text(),
        _ => param.to_text(),
    }
}
