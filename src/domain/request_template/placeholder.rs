// Placeholder parsing and translation into path expressions

use crate::domain::expression::ExpressionCompiler;
use crate::error::TemplateError;

use super::path_setter::PathSetter;
use super::resolver::Resolver;
use super::spec_node::is_placeholder;

/// Root used for `$.`-prefixed paths
const CONTEXT_ROOT: &str = "rm";
/// Root used for part-relative paths, followed by `request.<part>`
const MODEL_ROOT: &str = "m";

/// A validated `{...}` placeholder token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Inner path without braces, e.g. `$.request.body.a` or `a.b`
    path: String,
}

impl Placeholder {
    /// Parse and validate a token such as `{$.request.body.a}`
    pub fn parse(token: &str) -> Result<Self, TemplateError> {
        if !is_placeholder(token) {
            return Err(TemplateError::InvalidTemplate(token.to_string()));
        }

        let path = &token[1..token.len() - 1];
        if !is_valid_path(path) {
            return Err(TemplateError::InvalidTemplate(path.to_string()));
        }

        Ok(Self {
            path: path.to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// `$.`-prefixed paths address the context root directly
    pub fn is_context_relative(&self) -> bool {
        self.path.starts_with("$.")
    }

    /// Rewrite the path into expression source.
    ///
    /// `$.request.body.a` becomes `rm.request.body.a`; a part-relative `a.x-y`
    /// inside `headers` becomes `m.request.headers.a['x-y']`.
    pub fn to_expression(&self, part: &str) -> String {
        let mut source = String::new();

        if let Some(rest) = self.path.strip_prefix("$.") {
            source.push_str(CONTEXT_ROOT);
            push_segments(&mut source, rest.split('.'));
        } else {
            source.push_str(MODEL_ROOT);
            push_segments(&mut source, ["request", part]);
            push_segments(&mut source, self.path.split('.'));
        }

        source
    }

    /// Compile into a resolver writing through `setter`
    pub fn compile(
        &self,
        part: &str,
        setter: PathSetter,
        compiler: &dyn ExpressionCompiler,
    ) -> Result<Resolver, TemplateError> {
        let source = self.to_expression(part);
        let evaluator = compiler
            .compile(&source)
            .map_err(|e| TemplateError::Expression {
                source: source.clone(),
                message: e.to_string(),
            })?;

        Ok(Resolver::Placeholder {
            setter,
            expression: source,
            evaluator,
        })
    }
}

/// Matches `^(\$\.)?([a-zA-Z][a-zA-Z0-9-_]*)(\.[a-zA-Z][a-zA-Z0-9-_]*)*$`
fn is_valid_path(path: &str) -> bool {
    let path = path.strip_prefix("$.").unwrap_or(path);
    path.split('.').all(is_valid_segment)
}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
        }
        _ => false,
    }
}

/// Segments usable with dot access in the expression language
fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')
        }
        _ => false,
    }
}

// Anything that is not a plain identifier (hyphenated names in particular)
// goes through quoted bracket access
fn push_segments<'s>(source: &mut String, segments: impl IntoIterator<Item = &'s str>) {
    for segment in segments {
        if is_identifier(segment) {
            source.push('.');
            source.push_str(segment);
        } else {
            source.push_str("['");
            for ch in segment.chars() {
                if ch == '\'' || ch == '\\' {
                    source.push('\\');
                }
                source.push(ch);
            }
            source.push_str("']");
        }
    }
}
