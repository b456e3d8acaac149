// Template module for flat `{name}` path templates
//
// This module provides parsing of path templates into literal and field parts.

mod ast;
mod parser;

pub use ast::{Template, TemplatePart};
pub use parser::{extract_field_names, TemplateParser};
