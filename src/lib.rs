// reqtemplate: compile JSON request templates once, remap requests many times
//
// A template spec such as
//
//     { "method": "put", "uri": "/wiki/{title}", "body": { "text": "{$.request.body.html}" } }
//
// is compiled into a `Template`; `Template::evaluate` then builds the outgoing
// request from a context of the form `{ "request": { method, params, headers, query, body } }`.

pub mod config;
pub mod domain;
pub mod error;

pub use config::TemplateRegistry;
pub use domain::expression::{Evaluator, ExpressionCompiler, PathExpressionCompiler};
pub use domain::uri_template::UriTemplate;
pub use domain::{Template, TemplateCache};
pub use error::TemplateError;
