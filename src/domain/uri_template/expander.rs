// URI template expansion against route parameters

use anyhow::{bail, Result};
use serde_json::Value;

use super::ast::{Operator, TemplatePart, UriTemplate};

impl UriTemplate {
    /// Expand the template using `params`, usually `context.request.params`.
    ///
    /// Anything other than an object is treated as an empty parameter set.
    pub fn expand(&self, params: &Value) -> Result<String> {
        let mut result = String::new();

        for part in &self.parts {
            match part {
                TemplatePart::Literal(s) => result.push_str(s),
                TemplatePart::Variable(var) => {
                    let value = match params.get(&var.name) {
                        Some(value) => param_to_string(&var.name, value)?,
                        None => None,
                    }
                    .or_else(|| var.default.clone());

                    match (value, var.operator) {
                        (Some(val), Operator::Simple) => {
                            result.push_str(&urlencoding::encode(&val))
                        }
                        (Some(val), Operator::Reserved) => result.push_str(&val),
                        (Some(val), Operator::PathSegment) => {
                            result.push('/');
                            result.push_str(&urlencoding::encode(&val));
                        }
                        // Optional segment with no value - omit it
                        (None, Operator::PathSegment) => {}
                        (None, _) => bail!("Missing required parameter: {}", var.name),
                    }
                }
            }
        }

        Ok(result)
    }
}

/// Stringify a scalar parameter. `null` counts as missing.
fn param_to_string(name: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => {
            bail!("Parameter '{}' must be a scalar value", name)
        }
    }
}
