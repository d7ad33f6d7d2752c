// Expression micro-language used by placeholders
//
// Placeholders are translated into path expressions (`rm.request.body.a`,
// `m.request.headers['x-id']`) and compiled once into evaluators.

mod ast;
mod parser;

pub use ast::{Accessor, EvalError, Expression, Root};
pub use parser::ExpressionParser;

use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;

/// Compiled expression. Returns `None` when the expression produced no value.
pub type Evaluator = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// Turns expression source into an evaluator
pub trait ExpressionCompiler: Send + Sync {
    fn compile(&self, source: &str) -> Result<Evaluator>;
}

/// Default compiler for the path expression language.
///
/// Evaluation errors (missing fields, indexing into scalars) are swallowed and
/// reported as no value, so a compiled evaluator never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathExpressionCompiler;

impl ExpressionCompiler for PathExpressionCompiler {
    fn compile(&self, source: &str) -> Result<Evaluator> {
        let expression = ExpressionParser::parse(source)?;
        let evaluator: Evaluator = Arc::new(move |context: &Value| {
            match expression.evaluate(context) {
                Ok(value) => Some(value.clone()),
                Err(err) => {
                    tracing::trace!(?err, "expression produced no value");
                    None
                }
            }
        });
        Ok(evaluator)
    }
}
