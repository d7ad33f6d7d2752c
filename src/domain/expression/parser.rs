// Path expression parser using recursive descent

use anyhow::{bail, Result};

use super::ast::{Accessor, Expression, Root};

pub struct ExpressionParser {
    input: String,
    pos: usize,
}

impl ExpressionParser {
    pub fn parse(source: &str) -> Result<Expression> {
        let mut parser = Self {
            input: source.to_string(),
            pos: 0,
        };
        parser.parse_expression()
    }

    fn parse_expression(&mut self) -> Result<Expression> {
        self.skip_whitespace();
        // Every expression starts at rm or m
        let root = self.parse_root()?;

        let mut accessors = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek_char() {
                Some('.') => {
                    // Member access .ident
                    self.consume_char()?;
                    let name = self.parse_identifier()?;
                    accessors.push(Accessor::Member(name));
                }
                Some('[') => {
                    // Bracket access ['quoted'] or [n]
                    self.consume_char()?;
                    self.skip_whitespace();
                    accessors.push(self.parse_bracket_accessor()?);
                    self.skip_whitespace();
                    self.expect_char(']')?;
                }
                Some(ch) => bail!("Unexpected character '{}' at position {}", ch, self.pos),
                None => break,
            }
        }

        Ok(Expression::new(root, accessors))
    }

    fn parse_root(&mut self) -> Result<Root> {
        let start = self.pos;
        let name = self.parse_identifier()?;
        match name.as_str() {
            "rm" => Ok(Root::RootModel),
            "m" => Ok(Root::Model),
            other => bail!("Unknown root symbol '{}' at position {}", other, start),
        }
    }

    fn parse_bracket_accessor(&mut self) -> Result<Accessor> {
        match self.peek_char() {
            Some(quote @ ('\'' | '"')) => {
                self.consume_char()?;
                let name = self.parse_quoted(quote)?;
                Ok(Accessor::Member(name))
            }
            Some(ch) if ch.is_ascii_digit() => {
                // Array index
                let mut digits = String::new();
                while let Some(ch) = self.peek_char() {
                    if ch.is_ascii_digit() {
                        digits.push(self.consume_char()?);
                    } else {
                        break;
                    }
                }
                let idx = digits
                    .parse()
                    .map_err(|e| anyhow::anyhow!("Invalid index '{}': {}", digits, e))?;
                Ok(Accessor::Index(idx))
            }
            Some(ch) => bail!("Unexpected character '{}' in brackets at position {}", ch, self.pos),
            None => bail!("Unexpected end of input in brackets"),
        }
    }

    // Opening quote already consumed
    fn parse_quoted(&mut self, quote: char) -> Result<String> {
        let mut value = String::new();
        loop {
            match self.consume_char() {
                Ok('\\') => value.push(self.consume_char()?), // escaped character
                Ok(ch) if ch == quote => return Ok(value),
                Ok(ch) => value.push(ch),
                Err(_) => bail!("Unterminated string literal"),
            }
        }
    }

    fn parse_identifier(&mut self) -> Result<String> {
        let mut ident = String::new();

        while let Some(ch) = self.peek_char() {
            let allowed = if ident.is_empty() {
                ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
            } else {
                ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
            };
            if !allowed {
                break;
            }
            ident.push(self.consume_char()?);
        }

        if ident.is_empty() {
            bail!("Expected identifier at position {}", self.pos);
        }

        Ok(ident)
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
