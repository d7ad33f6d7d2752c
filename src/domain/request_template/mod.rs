// Request template compiler and evaluator
//
// A template spec is a JSON skeleton of the outgoing request whose leaves are
// literals or `{path}` placeholders. Compiling it yields a flat list of
// resolvers; evaluating runs them in order against a request context.

mod cache;
mod path_setter;
mod placeholder;
mod resolver;
mod spec_node;
mod walker;

pub use cache::TemplateCache;
pub use path_setter::{Container, PathSetter};
pub use placeholder::Placeholder;
pub use resolver::Resolver;
pub use spec_node::{is_falsy, is_placeholder, is_single_placeholder, SpecNode};
pub use walker::SpecWalker;

use serde_json::{Map, Value};

use crate::domain::expression::{ExpressionCompiler, PathExpressionCompiler};
use crate::domain::uri_template::UriTemplateParser;
use crate::error::TemplateError;

const METHOD_PART: &str = "method";
const URI_PART: &str = "uri";

/// A compiled request template.
///
/// Compile once per spec, then call [`Template::evaluate`] for every request.
/// Evaluation only reads `self`, so a template can be shared across threads.
#[derive(Debug)]
pub struct Template {
    resolvers: Vec<Resolver>,
}

impl Template {
    /// Compile with the built-in path expression language
    pub fn compile(spec: &Value) -> Result<Self, TemplateError> {
        Self::compile_with(spec, &PathExpressionCompiler)
    }

    /// Compile using a caller-provided expression compiler
    pub fn compile_with(
        spec: &Value,
        compiler: &dyn ExpressionCompiler,
    ) -> Result<Self, TemplateError> {
        let parts = spec
            .as_object()
            .ok_or_else(|| TemplateError::InvalidSpec(type_name(spec).to_string()))?;

        let walker = SpecWalker::new(spec, compiler);
        let mut resolvers = Vec::new();

        for (part, subspec) in parts {
            // Absent parts never show up in the output
            if subspec.is_null() {
                continue;
            }

            match part.as_str() {
                METHOD_PART => {
                    let setter = PathSetter::from_segments(&[METHOD_PART], spec)?;
                    resolvers.push(Resolver::literal(setter, subspec.clone()));
                }
                URI_PART => resolvers.push(compile_uri(spec, subspec, compiler)?),
                // `false`, `0` and `""` count as absent for the other parts
                _ if is_falsy(subspec) => {
                    tracing::trace!(part = %part, "skipping empty request part");
                }
                _ => resolvers.extend(walker.walk(subspec, part)?),
            }
        }

        tracing::debug!(resolvers = resolvers.len(), "compiled request template");
        Ok(Self { resolvers })
    }

    /// Build the outgoing request for `context`.
    ///
    /// The output starts as `{ method: context.request.method }` and only
    /// gains the fields whose value could be resolved.
    pub fn evaluate(&self, context: &Value) -> Value {
        let mut request = Map::new();
        if let Some(method) = context.pointer("/request/method") {
            request.insert(METHOD_PART.to_string(), method.clone());
        }

        for resolver in &self.resolvers {
            resolver.resolve(&mut request, context);
        }

        Value::Object(request)
    }

    /// Compiled resolvers in execution order
    pub fn resolvers(&self) -> &[Resolver] {
        &self.resolvers
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

/// `uri` is either a single placeholder, substituted directly, or a URI
/// template expanded from `context.request.params`.
fn compile_uri(
    spec: &Value,
    uri: &Value,
    compiler: &dyn ExpressionCompiler,
) -> Result<Resolver, TemplateError> {
    let uri = uri
        .as_str()
        .ok_or_else(|| TemplateError::InvalidUri(uri.to_string()))?;
    let setter = PathSetter::from_segments(&[URI_PART], spec)?;

    if is_single_placeholder(uri) {
        return Placeholder::parse(uri)?.compile(URI_PART, setter, compiler);
    }

    let template = UriTemplateParser::parse(uri).map_err(|e| TemplateError::UriTemplate {
        template: uri.to_string(),
        message: e.to_string(),
    })?;
    Ok(Resolver::uri_template(setter, template))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
