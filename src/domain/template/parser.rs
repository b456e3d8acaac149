// Template parser using recursive descent

use crate::error::{PathError, Result};

use super::ast::{Template, TemplatePart};

pub struct TemplateParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TemplateParser<'a> {
    pub fn parse(template: &'a str) -> Result<Template> {
        let mut parser = Self {
            input: template,
            pos: 0,
        };
        parser.parse_template()
    }

    fn parse_template(&mut self) -> Result<Template> {
        let mut parts = Vec::new();
        let mut literal_buf = String::new();

        while let Some(ch) = self.peek_char() {
            if ch == '{' {
                // Check for escaped braces {{
                if self.peek_ahead(1) == Some('{') {
                    self.pos += 2;
                    literal_buf.push('{');
                } else {
                    // Start of field - flush literal buffer first
                    if !literal_buf.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal_buf)));
                    }
                    let name = self.parse_field()?;
                    parts.push(TemplatePart::Field(name));
                }
            } else if ch == '}' {
                if self.peek_ahead(1) == Some('}') {
                    self.pos += 2;
                    literal_buf.push('}');
                } else {
                    return Err(self.error("single '}' encountered in template"));
                }
            } else {
                self.pos += ch.len_utf8();
                literal_buf.push(ch);
            }
        }

        if !literal_buf.is_empty() {
            parts.push(TemplatePart::Literal(literal_buf));
        }

        Ok(Template::new(parts))
    }

    fn parse_field(&mut self) -> Result<String> {
        // Consume opening {
        self.pos += 1;
        let start = self.pos;

        loop {
            match self.peek_char() {
                Some('}') => break,
                Some(ch) if ch.is_alphanumeric() || ch == '_' => self.pos += ch.len_utf8(),
                Some(ch) => {
                    return Err(self.error(&format!("invalid character '{}' in field name", ch)))
                }
                None => return Err(self.error("expected '}' before end of template")),
            }
        }

        let name = &self.input[start..self.pos];
        if name.is_empty() {
            return Err(self.error("empty field name"));
        }

        // Consume closing }
        self.pos += 1;
        Ok(name.to_string())
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn error(&self, reason: &str) -> PathError {
        PathError::TemplateSyntax {
            template: self.input.to_string(),
            position: self.pos,
            reason: reason.to_string(),
        }
    }
}

/// Get field names from a path template, in order and with duplicates preserved
pub fn extract_field_names(template: &str) -> Result<Vec<String>> {
    let parsed = TemplateParser::parse(template)?;
    Ok(parsed.field_names().into_iter().map(str::to_string).collect())
}
