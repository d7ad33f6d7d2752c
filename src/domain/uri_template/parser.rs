// URI template parser using recursive descent

use anyhow::{bail, Result};

use super::ast::{Operator, TemplatePart, UriTemplate, VariableExpr};

pub struct UriTemplateParser {
    input: String,
    pos: usize,
}

impl UriTemplateParser {
    pub fn parse(template: &str) -> Result<UriTemplate> {
        let mut parser = Self {
            input: template.to_string(),
            pos: 0,
        };
        parser.parse_template()
    }

    fn parse_template(&mut self) -> Result<UriTemplate> {
        let mut parts = Vec::new();
        let mut literal_buf = String::new();

        while self.pos < self.input.len() {
            if self.peek_char() == Some('{') {
                // Escaped brace {{
                if self.peek_ahead(1) == Some('{') {
                    self.pos += 2;
                    literal_buf.push('{');
                } else {
                    // Start of an expression, flush the literal first
                    if !literal_buf.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal_buf)));
                    }
                    let var = self.parse_variable()?;
                    parts.push(TemplatePart::Variable(var));
                }
            } else if self.peek_char() == Some('}') {
                // Escaped brace }}
                if self.peek_ahead(1) == Some('}') {
                    self.pos += 2;
                    literal_buf.push('}');
                } else {
                    bail!("Unexpected closing brace at position {}", self.pos);
                }
            } else {
                // Regular character
                literal_buf.push(self.consume_char()?);
            }
        }

        // Flush remaining literal
        if !literal_buf.is_empty() {
            parts.push(TemplatePart::Literal(literal_buf));
        }

        Ok(UriTemplate::new(parts))
    }

    fn parse_variable(&mut self) -> Result<VariableExpr> {
        self.expect_char('{')?;
        self.skip_whitespace();

        // Optional operator: + keeps reserved characters, / adds a segment
        let operator = match self.peek_char() {
            Some('+') => {
                self.consume_char()?;
                Operator::Reserved
            }
            Some('/') => {
                self.consume_char()?;
                Operator::PathSegment
            }
            _ => Operator::Simple,
        };

        let name = self.parse_variable_name()?;
        self.skip_whitespace();

        let mut var = VariableExpr::new(name).with_operator(operator);
        // Default value after =
        if self.peek_char() == Some('=') {
            self.consume_char()?;
            var = var.with_default(self.parse_default_value()?);
        }

        self.expect_char('}')?;
        Ok(var)
    }

    fn parse_variable_name(&mut self) -> Result<String> {
        let mut name = String::new();

        while let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || ch == '_' || ch == '-' || ch == '.' {
                name.push(self.consume_char()?);
            } else if ch == '=' || ch == '}' || ch.is_whitespace() {
                break;
            } else {
                bail!(
                    "Invalid character '{}' in variable name at position {}",
                    ch,
                    self.pos
                );
            }
        }

        if name.is_empty() {
            bail!("Empty variable name at position {}", self.pos);
        }

        Ok(name)
    }

    fn parse_default_value(&mut self) -> Result<String> {
        let mut value = String::new();

        while let Some(ch) = self.peek_char() {
            if ch == '}' {
                break;
            }
            value.push(self.consume_char()?); // closing } is left for the caller
        }

        Ok(value.trim().to_string())
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn consume_char(&mut self) -> Result<char> {
        let ch = self
            .peek_char()
            .ok_or_else(|| anyhow::anyhow!("Unexpected end of input at position {}", self.pos))?;
        self.pos += ch.len_utf8();
        Ok(ch)
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.consume_char()?;
                Ok(())
            }
            Some(ch) => bail!(
                "Expected '{}' but found '{}' at position {}",
                expected,
                ch,
                self.pos
            ),
            None => bail!("Expected '{}' but found end of input", expected),
        }
    }
}
