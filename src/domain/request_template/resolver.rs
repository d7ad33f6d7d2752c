// Compiled units of work executed on every evaluation

use serde_json::{Map, Value};
use std::fmt;

use crate::domain::expression::Evaluator;
use crate::domain::uri_template::UriTemplate;

use super::path_setter::PathSetter;

/// A target path paired with the producer of its value.
///
/// Resolvers hold no per-call state: whatever a producer yields is handed
/// straight to the setter, so one compiled template can be evaluated from
/// many threads at once.
pub enum Resolver {
    /// Constant leaf, written regardless of the context
    Literal { setter: PathSetter, value: Value },
    /// `{...}` leaf, written only when the expression yields a value
    Placeholder {
        setter: PathSetter,
        expression: String,
        evaluator: Evaluator,
    },
    /// `uri` expanded from `context.request.params`
    UriTemplate {
        setter: PathSetter,
        template: UriTemplate,
    },
}

impl Resolver {
    pub fn literal(setter: PathSetter, value: Value) -> Self {
        Resolver::Literal { setter, value }
    }

    pub fn uri_template(setter: PathSetter, template: UriTemplate) -> Self {
        Resolver::UriTemplate { setter, template }
    }

    /// Target path in the output request
    pub fn path(&self) -> &str {
        match self {
            Resolver::Literal { setter, .. }
            | Resolver::Placeholder { setter, .. }
            | Resolver::UriTemplate { setter, .. } => setter.path(),
        }
    }

    pub fn resolve(&self, output: &mut Map<String, Value>, context: &Value) {
        match self {
            Resolver::Literal { setter, value } => setter.set(output, Some(value.clone())),
            Resolver::Placeholder {
                setter,
                expression,
                evaluator,
            } => {
                let value = evaluator(context);
                if value.is_none() {
                    tracing::trace!(%expression, path = setter.path(), "placeholder left unresolved");
                }
                setter.set(output, value);
            }
            Resolver::UriTemplate { setter, template } => {
                let params = context.pointer("/request/params").unwrap_or(&Value::Null);
                match template.expand(params) {
                    Ok(uri) => setter.set(output, Some(Value::String(uri))),
                    Err(e) => tracing::debug!("uri template not expanded: {}", e),
                }
            }
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolver::Literal { setter, value } => f
                .debug_struct("Literal")
                .field("path", &setter.path())
                .field("value", value)
                .finish(),
            Resolver::Placeholder {
                setter, expression, ..
            } => f
                .debug_struct("Placeholder")
                .field("path", &setter.path())
                .field("expression", expression)
                .finish(),
            Resolver::UriTemplate { setter, template } => f
                .debug_struct("UriTemplate")
                .field("path", &setter.path())
                .field("template", template)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expression::{ExpressionCompiler, PathExpressionCompiler};
    use crate::domain::uri_template::UriTemplateParser;
    use serde_json::json;

    #[test]
    fn test_literal_ignores_context() {
        let spec = json!({ "body": { "a": "lit" } });
        let setter = PathSetter::compile("body.a", &spec).unwrap();
        let resolver = Resolver::literal(setter, json!("lit"));

        let mut out = Map::new();
        resolver.resolve(&mut out, &json!(null));
        assert_eq!(Value::Object(out), spec);
    }

    #[test]
    fn test_placeholder_writes_only_when_resolved() {
        let spec = json!({ "body": { "a": "{$.request.body.x}" } });
        let setter = PathSetter::compile("body.a", &spec).unwrap();
        let resolver = Resolver::Placeholder {
            setter,
            expression: "rm.request.body.x".to_string(),
            evaluator: PathExpressionCompiler.compile("rm.request.body.x").unwrap(),
        };

        let mut out = Map::new();
        resolver.resolve(&mut out, &json!({ "request": { "body": {} } }));
        assert!(out.is_empty());

        resolver.resolve(&mut out, &json!({ "request": { "body": { "x": 42 } } }));
        assert_eq!(Value::Object(out), json!({ "body": { "a": 42 } }));
    }

    #[test]
    fn test_uri_template_expands_params() {
        let spec = json!({ "uri": "/a/{id}" });
        let setter = PathSetter::compile("uri", &spec).unwrap();
        let resolver =
            Resolver::uri_template(setter, UriTemplateParser::parse("/a/{id}").unwrap());
        assert_eq!(resolver.path(), "uri");

        let mut out = Map::new();
        resolver.resolve(&mut out, &json!({ "request": {} }));
        assert!(out.is_empty());

        resolver.resolve(&mut out, &json!({ "request": { "params": { "id": 7 } } }));
        assert_eq!(Value::Object(out), json!({ "uri": "/a/7" }));
    }

    #[test]
    fn test_debug_omits_evaluator() {
        let spec = json!({ "q": "{a}" });
        let setter = PathSetter::compile("q", &spec).unwrap();
        let resolver = Resolver::Placeholder {
            setter,
            expression: "m.request.q.a".to_string(),
            evaluator: PathExpressionCompiler.compile("m.request.q.a").unwrap(),
        };
        let debug = format!("{:?}", resolver);
        assert!(debug.contains("Placeholder"));
        assert!(debug.contains("m.request.q.a"));
    }
}
