// Abstract Syntax Tree types for path templates

use std::fmt;

/// Represents a parsed template as a list of parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub parts: Vec<TemplatePart>,
}

/// A template consists of literal strings and field placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Field(String),
}

impl Template {
    pub fn new(parts: Vec<TemplatePart>) -> Self {
        Self { parts }
    }

    /// Field names in template order, duplicates preserved
    pub fn field_names(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                TemplatePart::Field(name) => Some(name.as_str()),
                TemplatePart::Literal(_) => None,
            })
            .collect()
    }

    /// Field names in order of first appearance, without duplicates
    pub fn unique_field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.field_names() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.field_names().contains(&name)
    }

    /// Everything before the first placeholder of `name`.
    /// Returns None if the field does not occur in the template.
    pub fn truncate_before(&self, name: &str) -> Option<Template> {
        let idx = self
            .parts
            .iter()
            .position(|part| matches!(part, TemplatePart::Field(n) if n == name))?;
        Some(Template::new(self.parts[..idx].to_vec()))
    }
}

/// Renders the template back to its source form, re-escaping literal braces
impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                TemplatePart::Literal(s) => write!(f, "{}", s.replace('{', "{{").replace('}', "}}"))?,
                TemplatePart::Field(name) => write!(f, "{{{}}}", name)?,
            }
        }
        Ok(())
    }
}
