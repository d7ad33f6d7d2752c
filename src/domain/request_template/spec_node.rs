// Classification of template spec nodes

use serde_json::{Map, Value};

/// A node of the template spec, seen by the walker
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpecNode<'a> {
    Object(&'a Map<String, Value>),
    Array(&'a [Value]),
    /// A string of the form `{...}`
    Placeholder(&'a str),
    Literal(&'a Value),
}

impl<'a> SpecNode<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => SpecNode::Object(map),
            Value::Array(items) => SpecNode::Array(items),
            Value::String(s) if is_placeholder(s) => SpecNode::Placeholder(s),
            other => SpecNode::Literal(other),
        }
    }
}

/// Matches `^\{[^}]+\}$`
pub fn is_placeholder(s: &str) -> bool {
    s.strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .map(|inner| !inner.is_empty() && !inner.contains('}'))
        .unwrap_or(false)
}

/// Stricter check used for `uri`: `^\{[^{}]+\}$`.
///
/// `{/a}{/b}` is a URI template, not a single placeholder.
pub fn is_single_placeholder(s: &str) -> bool {
    is_placeholder(s) && !s[1..].contains('{')
}

/// `null`, `false`, zero and the empty string
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
