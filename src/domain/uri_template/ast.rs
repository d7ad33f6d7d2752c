// Abstract Syntax Tree types for URI templates

/// Represents a parsed URI template as a list of parts
#[derive(Debug, Clone, PartialEq)]
pub struct UriTemplate {
    pub parts: Vec<TemplatePart>,
}

impl UriTemplate {
    pub fn new(parts: Vec<TemplatePart>) -> Self {
        Self { parts }
    }

    /// Get all variables in this template
    pub fn variables(&self) -> Vec<&VariableExpr> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                TemplatePart::Variable(var) => Some(var),
                _ => None,
            })
            .collect()
    }
}

/// A template consists of literal strings and variable expressions
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Literal(String),
    Variable(VariableExpr),
}

/// How a variable is expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `{name}` - percent-encoded value
    Simple,
    /// `{+name}` - value inserted as-is
    Reserved,
    /// `{/name}` - optional path segment, `/value` or nothing
    PathSegment,
}

/// A variable expression with its operator and optional default
#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    pub name: String,
    pub operator: Operator,
    pub default: Option<String>,
}

impl VariableExpr {
    pub fn new(name: String) -> Self {
        Self {
            name,
            operator: Operator::Simple,
            default: None,
        }
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    pub fn with_default(mut self, default: String) -> Self {
        self.default = Some(default);
        self
    }
}
