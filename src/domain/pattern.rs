// Pattern compiler: one anchored regex for a whole template

use regex::Regex;
use std::collections::HashMap;

use super::registry::FieldRegistry;
use super::template::{Template, TemplatePart};
use crate::error::{PathError, Result};

const DIR_SEP: &str = "/";

/// One placeholder occurrence in the template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSlot {
    pub field: String,
    pub occurrence: usize,
}

/// Anchored pattern for a template, with one capture slot per placeholder.
///
/// Repeated fields get one slot per occurrence. Their captures are fused
/// back into a single value after matching.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    slots: Vec<CaptureSlot>,
}

impl CompiledPattern {
    pub fn compile(template: &Template, registry: &FieldRegistry) -> Result<Self> {
        let mut source = String::from("^");
        let mut slots: Vec<CaptureSlot> = Vec::new();
        let mut occurrences: HashMap<&str, usize> = HashMap::new();

        for (idx, part) in template.parts.iter().enumerate() {
            match part {
                TemplatePart::Literal(text) => {
                    if text == DIR_SEP && Self::separator_is_elidable(template, idx, registry) {
                        source.push_str(DIR_SEP);
                        source.push('?');
                    } else {
                        source.push_str(&regex::escape(text));
                    }
                }
                TemplatePart::Field(name) => {
                    let field = registry.get(name).ok_or_else(|| PathError::FieldConfigMismatch {
                        template: template.to_string(),
                        invalid: vec![],
                        missing: vec![name.clone()],
                    })?;
                    let occurrence = occurrences.entry(name.as_str()).or_insert(0);
                    let group = Self::group_name(slots.len());
                    if field.is_optional() {
                        source.push_str(&format!("(?P<{}>(?:{})|)", group, field.pattern()));
                    } else {
                        source.push_str(&format!("(?P<{}>{})", group, field.pattern()));
                    }
                    slots.push(CaptureSlot {
                        field: name.clone(),
                        occurrence: *occurrence,
                    });
                    *occurrence += 1;
                }
            }
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|source_err| PathError::InvalidPattern {
            field: template.unique_field_names().join(","),
            pattern: source.clone(),
            source: source_err,
        })?;

        tracing::debug!(template = %template, pattern = %source, "compiled path pattern");
        Ok(Self { regex, slots })
    }

    /// A lone separator between an optional field and another field may be omitted,
    /// so that an empty optional segment does not leave a doubled separator.
    fn separator_is_elidable(template: &Template, idx: usize, registry: &FieldRegistry) -> bool {
        let previous_is_optional = idx
            .checked_sub(1)
            .and_then(|prev| template.parts.get(prev))
            .map_or(false, |part| match part {
                TemplatePart::Field(name) => registry.get(name).map_or(false, |f| f.is_optional()),
                TemplatePart::Literal(_) => false,
            });
        let next_is_field = matches!(template.parts.get(idx + 1), Some(TemplatePart::Field(_)));
        previous_is_optional && next_is_field
    }

    fn group_name(slot: usize) -> String {
        format!("__slot{}", slot)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn slots(&self) -> &[CaptureSlot] {
        &self.slots
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    /// Match `input` and return one raw capture per field, in order of first appearance.
    ///
    /// Returns `Ok(None)` if the input does not match. Fails if the occurrences
    /// of a repeated field captured different text.
    pub fn captures(&self, input: &str) -> Result<Option<Vec<(String, String)>>> {
        let Some(caps) = self.regex.captures(input) else {
            return Ok(None);
        };

        let mut fused: Vec<(String, Vec<String>)> = Vec::new();
        for (idx, slot) in self.slots.iter().enumerate() {
            let value = caps
                .name(&Self::group_name(idx))
                .map_or("", |m| m.as_str())
                .to_string();
            match fused.iter_mut().find(|(field, _)| *field == slot.field) {
                Some((_, values)) => values.push(value),
                None => fused.push((slot.field.clone(), vec![value])),
            }
        }

        fused
            .into_iter()
            .map(|(field, values)| {
                if values.iter().any(|v| *v != values[0]) {
                    return Err(PathError::ConflictingValues { field, values });
                }
                let value = values.into_iter().next().unwrap_or_default();
                Ok((field, value))
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}
