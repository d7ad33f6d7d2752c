// Recursive spec walker producing one resolver per leaf

use serde_json::Value;

use crate::domain::expression::ExpressionCompiler;
use crate::error::TemplateError;

use super::path_setter::PathSetter;
use super::placeholder::Placeholder;
use super::resolver::Resolver;
use super::spec_node::SpecNode;

/// Builds resolvers for a request part.
///
/// `spec` is the whole template spec; setters consult it to decide whether a
/// missing intermediate position becomes an array or an object.
pub struct SpecWalker<'a> {
    spec: &'a Value,
    compiler: &'a dyn ExpressionCompiler,
}

impl<'a> SpecWalker<'a> {
    pub fn new(spec: &'a Value, compiler: &'a dyn ExpressionCompiler) -> Self {
        Self { spec, compiler }
    }

    /// Resolvers for every leaf under `subspec`, in declaration order
    pub fn walk(&self, subspec: &Value, part: &str) -> Result<Vec<Resolver>, TemplateError> {
        let mut resolvers = Vec::new();
        let mut path = vec![part.to_string()];
        self.walk_node(subspec, part, &mut path, &mut resolvers)?;
        Ok(resolvers)
    }

    fn walk_node(
        &self,
        node: &Value,
        part: &str,
        path: &mut Vec<String>,
        resolvers: &mut Vec<Resolver>,
    ) -> Result<(), TemplateError> {
        match SpecNode::classify(node) {
            SpecNode::Object(map) => {
                for (key, child) in map {
                    path.push(key.clone());
                    self.walk_node(child, part, path, resolvers)?;
                    path.pop();
                }
            }
            SpecNode::Array(items) => {
                for (idx, child) in items.iter().enumerate() {
                    path.push(idx.to_string());
                    self.walk_node(child, part, path, resolvers)?;
                    path.pop();
                }
            }
            SpecNode::Placeholder(token) => {
                let setter = PathSetter::from_segments(path.as_slice(), self.spec)?;
                let resolver = Placeholder::parse(token)?.compile(part, setter, self.compiler)?;
                resolvers.push(resolver);
            }
            SpecNode::Literal(value) => {
                let setter = PathSetter::from_segments(path.as_slice(), self.spec)?;
                resolvers.push(Resolver::literal(setter, value.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expression::PathExpressionCompiler;
    use serde_json::json;

    fn paths(spec: &Value, part: &str) -> Vec<String> {
        let walker = SpecWalker::new(spec, &PathExpressionCompiler);
        walker
            .walk(&spec[part], part)
            .unwrap()
            .iter()
            .map(|r| r.path().to_string())
            .collect()
    }

    #[test]
    fn test_walk_follows_declaration_order() {
        let spec = json!({
            "body": {
                "z": "{z}",
                "a": { "c": "lit", "b": "{$.request.body.b}" },
                "list": ["{x}", { "y": 1 }]
            }
        });
        assert_eq!(
            paths(&spec, "body"),
            vec!["body.z", "body.a.c", "body.a.b", "body.list.0", "body.list.1.y"]
        );
    }

    #[test]
    fn test_walk_scalar_part() {
        let spec = json!({ "body": "{$.request.body}" });
        assert_eq!(paths(&spec, "body"), vec!["body"]);
    }

    #[test]
    fn test_walk_empty_containers() {
        let spec = json!({ "headers": {}, "body": { "a": [] } });
        assert!(paths(&spec, "headers").is_empty());
        assert!(paths(&spec, "body").is_empty());
    }

    #[test]
    fn test_walk_rejects_invalid_placeholder() {
        let spec = json!({ "body": { "ok": "{a}", "bad": "{a..b}" } });
        let walker = SpecWalker::new(&spec, &PathExpressionCompiler);
        let err = walker.walk(&spec["body"], "body").unwrap_err();
        assert_eq!(err, TemplateError::InvalidTemplate("a..b".to_string()));
    }
}
