//! Static evaluation of literal expressions

use super::{AstNode, NodeKind};

/// Value of a statically evaluable literal
///
/// Regular expressions are not evaluated; they produce the [`JsValue::RegExp`]
/// sentinel carrying their source text.
#[derive(Debug, Clone, PartialEq)]
pub enum JsValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<JsValue>),
    /// Object literal entries in source order
    Object(Vec<(String, JsValue)>),
    RegExp(String),
}

impl JsValue {
    pub fn kind_name(&self) -> Option<&'static str> {
        match self {
            Self::Null => None,
            Self::Boolean(_) => Some("Boolean"),
            Self::Number(_) => Some("Number"),
            Self::String(_) => Some("String"),
            Self::Array(_) => Some("Array"),
            Self::Object(_) => Some("Object"),
            Self::RegExp(_) => Some("RegExp"),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// String items of an array value, or the value itself when it is a
    /// single string
    pub fn string_list(&self) -> Vec<String> {
        match self {
            Self::String(s) => vec![s.clone()],
            Self::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

pub(super) fn evaluate(node: &AstNode<'_>) -> Option<JsValue> {
    match node.kind() {
        NodeKind::StringLiteral => {
            let text = node.to_text()?;
            Some(JsValue::String(unquote(&text)?))
        }
        NodeKind::TemplateString => {
            let has_substitution = node
                .named_children()
                .iter()
                .any(|c| c.raw().is_some_and(|r| r.kind() == "template_substitution"));
            if has_substitution {
                return None;
            }
            let text = node.to_text()?;
            let inner = text.strip_prefix('`')?.strip_suffix('`')?;
            Some(JsValue::String(unescape(inner)))
        }
        NodeKind::NumberLiteral => parse_number(&node.to_text()?).map(JsValue::Number),
        NodeKind::True => Some(JsValue::Boolean(true)),
        NodeKind::False => Some(JsValue::Boolean(false)),
        NodeKind::Null => Some(JsValue::Null),
        NodeKind::RegExp => node.to_text().map(JsValue::RegExp),
        NodeKind::Parenthesized => evaluate(&node.first_named_child()),
        NodeKind::UnaryExpression => {
            let operator = node.child("operator").raw()?.kind();
            match (operator, evaluate(&node.child("argument"))?) {
                ("-", JsValue::Number(n)) => Some(JsValue::Number(-n)),
                ("+", JsValue::Number(n)) => Some(JsValue::Number(n)),
                ("!", JsValue::Boolean(b)) => Some(JsValue::Boolean(!b)),
                _ => None,
            }
        }
        NodeKind::Array => node
            .array_elements()
            .iter()
            .map(evaluate)
            .collect::<Option<Vec<_>>>()
            .map(JsValue::Array),
        NodeKind::Object => {
            let mut entries = Vec::new();
            for prop in node.object_properties() {
                if !prop.is(NodeKind::Pair) {
                    return None;
                }
                let key = prop.key_name()?;
                let value = evaluate(&prop.child("value"))?;
                entries.push((key, value));
            }
            Some(JsValue::Object(entries))
        }
        _ => None,
    }
}

fn unquote(text: &str) -> Option<String> {
    let quote = text.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let inner = text.strip_prefix(quote)?.strip_suffix(quote)?;
    Some(unescape(inner))
}

fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            // Line continuation
            '\n' => {}
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                push_code_point(&mut out, &hex);
            }
            'u' => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|c| *c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                push_code_point(&mut out, &hex);
            }
            other => out.push(other),
        }
    }
    out
}

fn push_code_point(out: &mut String, hex: &str) {
    if let Some(c) = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        out.push(c);
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let cleaned = text.replace('_', "");
    if cleaned.ends_with('n') {
        // BigInt literals have no f64 counterpart
        return None;
    }
    let lower = cleaned.to_ascii_lowercase();
    let radix = |prefix: &str, radix: u32| {
        lower
            .strip_prefix(prefix)
            .and_then(|digits| u64::from_str_radix(digits, radix).ok())
            .map(|n| n as f64)
    };
    if lower.starts_with("0x") {
        return radix("0x", 16);
    }
    if lower.starts_with("0o") {
        return radix("0o", 8);
    }
    if lower.starts_with("0b") {
        return radix("0b", 2);
    }
    lower.parse::<f64>().ok()
}
