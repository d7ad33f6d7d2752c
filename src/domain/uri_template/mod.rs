// URI template module
//
// Parses `uri` values such as `/wiki/{title}{/revision}` once and expands them
// against route parameters on every evaluation.

mod ast;
mod expander;
mod parser;

pub use ast::{Operator, TemplatePart, UriTemplate, VariableExpr};
pub use parser::UriTemplateParser;
