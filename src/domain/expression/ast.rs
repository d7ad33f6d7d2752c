// Abstract Syntax Tree types for path expressions

use serde_json::Value;

/// Symbol an expression starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Root {
    /// `rm` - the root model, i.e. the whole evaluation context
    RootModel,
    /// `m` - the current model; at the top level this is also the context
    Model,
}

/// One step of a path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// `.name` or `['name']`
    Member(String),
    /// `[3]`
    Index(usize),
}

/// A parsed path expression such as `rm.request.body['x-y']`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub root: Root,
    pub accessors: Vec<Accessor>,
}

/// Why an expression failed to produce a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    MissingField,
    IndexOutOfBounds,
    NotAContainer,
}

impl Expression {
    pub fn new(root: Root, accessors: Vec<Accessor>) -> Self {
        Self { root, accessors }
    }

    /// Walk the accessors starting from `context`.
    pub fn evaluate<'a>(&self, context: &'a Value) -> Result<&'a Value, EvalError> {
        // Both roots are bound to the context at the top level
        let mut current = match self.root {
            Root::RootModel | Root::Model => context,
        };

        for accessor in &self.accessors {
            current = match (current, accessor) {
                (Value::Object(map), Accessor::Member(name)) => {
                    map.get(name).ok_or(EvalError::MissingField)?
                }
                (Value::Array(items), Accessor::Index(idx)) => {
                    items.get(*idx).ok_or(EvalError::IndexOutOfBounds)?
                }
                // Arrays can also be addressed with an integer-like member name
                (Value::Array(items), Accessor::Member(name)) => {
                    let idx: usize = name.parse().map_err(|_| EvalError::MissingField)?;
                    items.get(idx).ok_or(EvalError::IndexOutOfBounds)?
                }
                (Value::Object(map), Accessor::Index(idx)) => map
                    .get(&idx.to_string())
                    .ok_or(EvalError::MissingField)?,
                _ => return Err(EvalError::NotAContainer),
            };
        }

        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn member(name: &str) -> Accessor {
        Accessor::Member(name.to_string())
    }

    #[test]
    fn test_evaluate_nested_member() {
        let expr = Expression::new(Root::RootModel, vec![member("a"), member("b")]);
        let ctx = json!({ "a": { "b": 7 } });
        assert_eq!(expr.evaluate(&ctx), Ok(&json!(7)));
    }

    #[test]
    fn test_evaluate_without_accessors_returns_context() {
        let expr = Expression::new(Root::Model, vec![]);
        let ctx = json!({ "a": 1 });
        assert_eq!(expr.evaluate(&ctx), Ok(&ctx));
    }

    #[test]
    fn test_evaluate_array_index() {
        let expr = Expression::new(Root::Model, vec![member("list"), Accessor::Index(1)]);
        let ctx = json!({ "list": ["x", "y"] });
        assert_eq!(expr.evaluate(&ctx), Ok(&json!("y")));

        let expr = Expression::new(Root::Model, vec![member("list"), member("0")]);
        assert_eq!(expr.evaluate(&ctx), Ok(&json!("x")));
    }

    #[test]
    fn test_evaluate_errors() {
        let ctx = json!({ "a": "scalar", "list": [] });

        let missing = Expression::new(Root::Model, vec![member("nope")]);
        assert_eq!(missing.evaluate(&ctx), Err(EvalError::MissingField));

        let scalar = Expression::new(Root::Model, vec![member("a"), member("b")]);
        assert_eq!(scalar.evaluate(&ctx), Err(EvalError::NotAContainer));

        let oob = Expression::new(Root::Model, vec![member("list"), Accessor::Index(0)]);
        assert_eq!(oob.evaluate(&ctx), Err(EvalError::IndexOutOfBounds));
    }

    #[test]
    fn test_present_null_is_a_value() {
        let expr = Expression::new(Root::Model, vec![member("a")]);
        let ctx = json!({ "a": null });
        assert_eq!(expr.evaluate(&ctx), Ok(&Value::Null));
    }
}
