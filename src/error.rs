// Error handling for reqtemplate

use std::fmt;

/// Errors raised while compiling a request template.
///
/// Evaluation never fails, so every variant here surfaces at compile time.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// The spec itself is not an object of request parts
    InvalidSpec(String),
    /// A placeholder token whose path does not match the placeholder grammar
    InvalidTemplate(String),
    /// A target path the path setter cannot address
    InvalidPath { path: String, reason: String },
    /// The expression compiler rejected a translated placeholder
    Expression { source: String, message: String },
    /// The `uri` value is not a valid URI template
    UriTemplate { template: String, message: String },
    /// The `uri` value is not a string
    InvalidUri(String),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::InvalidSpec(found) => {
                write!(f, "Invalid template spec: expected an object but found {}", found)
            }
            TemplateError::InvalidTemplate(token) => write!(f, "Invalid template {}", token),
            TemplateError::InvalidPath { path, reason } => {
                write!(f, "Invalid path '{}': {}", path, reason)
            }
            TemplateError::Expression { source, message } => {
                write!(f, "Invalid expression '{}': {}", source, message)
            }
            TemplateError::UriTemplate { template, message } => {
                write!(f, "Invalid uri template '{}': {}", template, message)
            }
            TemplateError::InvalidUri(found) => {
                write!(f, "Invalid uri: expected a string but found {}", found)
            }
        }
    }
}

impl std::error::Error for TemplateError {}
