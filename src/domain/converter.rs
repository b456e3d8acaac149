// Custom value converters and their registry

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::value::FieldValue;

/// Trait for custom field conversions between a value and its path fragment
pub trait ValueConverter: Send + Sync {
    fn name(&self) -> &str;
    fn to_path(&self, value: &FieldValue) -> Result<String>;
    fn from_path(&self, raw: &str) -> Result<FieldValue>;
}

impl fmt::Debug for dyn ValueConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueConverter({})", self.name())
    }
}

/// Upper-cases on the way into the path and lower-cases on the way out
pub struct UpperOp;

impl ValueConverter for UpperOp {
    fn name(&self) -> &str {
        "upper"
    }

    fn to_path(&self, value: &FieldValue) -> Result<String> {
        Ok(value.to_string().to_uppercase())
    }

    fn from_path(&self, raw: &str) -> Result<FieldValue> {
        Ok(FieldValue::Str(raw.to_lowercase()))
    }
}

/// Lower-cases on the way into the path and upper-cases on the way out
pub struct LowerOp;

impl ValueConverter for LowerOp {
    fn name(&self) -> &str {
        "lower"
    }

    fn to_path(&self, value: &FieldValue) -> Result<String> {
        Ok(value.to_string().to_lowercase())
    }

    fn from_path(&self, raw: &str) -> Result<FieldValue> {
        Ok(FieldValue::Str(raw.to_uppercase()))
    }
}

/// Integer fields, optionally zero padded to a fixed width
pub struct IntegerOp {
    width: usize,
}

impl IntegerOp {
    pub fn new() -> Self {
        Self { width: 0 }
    }

    pub fn zero_padded(width: usize) -> Self {
        Self { width }
    }
}

impl Default for IntegerOp {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueConverter for IntegerOp {
    fn name(&self) -> &str {
        "integer"
    }

    fn to_path(&self, value: &FieldValue) -> Result<String> {
        let number = match value {
            FieldValue::Int(i) => *i,
            FieldValue::Str(s) => s
                .parse::<i64>()
                .with_context(|| format!("'{}' is not an integer", s))?,
            other => bail!("expected an integer, got '{}'", other),
        };
        Ok(format!("{:0width$}", number, width = self.width))
    }

    fn from_path(&self, raw: &str) -> Result<FieldValue> {
        let number = raw
            .parse::<i64>()
            .with_context(|| format!("'{}' is not an integer", raw))?;
        Ok(FieldValue::Int(number))
    }
}

type EncodeFn = dyn Fn(&FieldValue) -> Result<String> + Send + Sync;
type DecodeFn = dyn Fn(&str) -> Result<FieldValue> + Send + Sync;

/// Converter built from a pair of closures
pub struct FnConverter {
    name: String,
    to_path: Box<EncodeFn>,
    from_path: Box<DecodeFn>,
}

impl FnConverter {
    pub fn new<E, D>(name: impl Into<String>, to_path: E, from_path: D) -> Self
    where
        E: Fn(&FieldValue) -> Result<String> + Send + Sync + 'static,
        D: Fn(&str) -> Result<FieldValue> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            to_path: Box::new(to_path),
            from_path: Box::new(from_path),
        }
    }
}

impl ValueConverter for FnConverter {
    fn name(&self) -> &str {
        &self.name
    }

    fn to_path(&self, value: &FieldValue) -> Result<String> {
        (self.to_path)(value)
    }

    fn from_path(&self, raw: &str) -> Result<FieldValue> {
        (self.from_path)(raw)
    }
}

/// Registry of named converters, used when field configuration comes from YAML
#[derive(Clone)]
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn ValueConverter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            converters: HashMap::new(),
        };
        registry.register(Arc::new(UpperOp));
        registry.register(Arc::new(LowerOp));
        registry.register(Arc::new(IntegerOp::new()));
        registry
    }

    pub fn register(&mut self, converter: Arc<dyn ValueConverter>) {
        self.converters.insert(converter.name().to_string(), converter);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ValueConverter>> {
        self.converters.get(name).cloned()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
