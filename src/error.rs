// Error handling for andar

use std::fmt;
use thiserror::Error;

/// Result type alias using PathError.
pub type Result<T> = std::result::Result<T, PathError>;

/// Broad failure category of a [`PathError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Construction-time problem with the template or its field configuration
    Config,
    /// A value could not be encoded into a valid path fragment
    Validation,
    /// A path string could not be parsed back into fields
    Parse,
    /// The caller supplied an inconsistent set of field values
    Usage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Config => write!(f, "configuration error"),
            ErrorKind::Validation => write!(f, "validation error"),
            ErrorKind::Parse => write!(f, "parse error"),
            ErrorKind::Usage => write!(f, "usage error"),
        }
    }
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Invalid template '{template}' at position {position}: {reason}")]
    TemplateSyntax {
        template: String,
        position: usize,
        reason: String,
    },

    #[error("{}", coverage_message(.template, .invalid, .missing))]
    FieldConfigMismatch {
        template: String,
        invalid: Vec<String>,
        missing: Vec<String>,
    },

    #[error(
        "path_template: '{template}' does not match with parent_path_template: '{parent_template}'. \
         parent_path_template must be a prefix of path_template"
    )]
    ParentTemplate {
        template: String,
        parent_template: String,
    },

    #[error("Maximum one field converter is allowed, but {count} were found for field '{field}'")]
    MultipleConverters { field: String, count: usize },

    #[error("Invalid pattern '{pattern}' for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown converter '{name}' for field '{field}'")]
    UnknownConverter { field: String, name: String },

    #[error("Unknown safe pattern '@{name}' for field '{field}'")]
    UnknownSafePattern { field: String, name: String },

    #[error("Invalid field '{field}' value: '{value}'. It does not match pattern: '{pattern}'")]
    Validation {
        field: String,
        value: String,
        pattern: String,
    },

    #[error("Field '{field}' is required and cannot be null")]
    NullValue { field: String },

    #[error("Cannot convert field '{field}' value '{value}' to a path fragment: {reason}")]
    Conversion {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid field '{field}' value: '{value}'. It does not match pattern: '{pattern}'")]
    FieldParse {
        field: String,
        value: String,
        pattern: String,
    },

    #[error("Cannot decode field '{field}' from '{value}': {reason}")]
    Decode {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid string '{input}', expected pattern: '{pattern}'")]
    NoMatch { input: String, pattern: String },

    #[error("More than one value was found for repeated field '{field}': {}", quoted_list(.values))]
    ConflictingValues { field: String, values: Vec<String> },

    #[error("{}", coverage_message(.template, .invalid, .missing))]
    FieldValuesMismatch {
        template: String,
        invalid: Vec<String>,
        missing: Vec<String>,
    },

    #[error(
        "Unexpected extra kwargs: {}, after updating parent template to '{template}' \
         because of missing kwarg: '{missing_field}'",
        quoted_pairs(.extra)
    )]
    ExtraArguments {
        extra: Vec<(String, String)>,
        template: String,
        missing_field: String,
    },

    #[error("Cannot read model file '{path}': {source}")]
    ModelFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model file: {0}")]
    ModelSyntax(#[from] serde_yaml::Error),

    #[error("Invalid model '{model}': {source}")]
    Model {
        model: String,
        #[source]
        source: Box<PathError>,
    },
}

impl PathError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PathError::TemplateSyntax { .. }
            | PathError::FieldConfigMismatch { .. }
            | PathError::ParentTemplate { .. }
            | PathError::MultipleConverters { .. }
            | PathError::InvalidPattern { .. }
            | PathError::UnknownConverter { .. }
            | PathError::UnknownSafePattern { .. }
            | PathError::ModelFile { .. }
            | PathError::ModelSyntax(_) => ErrorKind::Config,
            PathError::Validation { .. }
            | PathError::NullValue { .. }
            | PathError::Conversion { .. } => ErrorKind::Validation,
            PathError::FieldParse { .. }
            | PathError::Decode { .. }
            | PathError::NoMatch { .. }
            | PathError::ConflictingValues { .. } => ErrorKind::Parse,
            PathError::FieldValuesMismatch { .. } | PathError::ExtraArguments { .. } => {
                ErrorKind::Usage
            }
            PathError::Model { source, .. } => source.kind(),
        }
    }
}

/// Render names the way they are listed in error messages: `['a', 'b']`
pub(crate) fn quoted_list(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
    format!("[{}]", quoted.join(", "))
}

fn quoted_pairs(pairs: &[(String, String)]) -> String {
    let quoted: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("'{}': '{}'", k, v))
        .collect();
    format!("{{{}}}", quoted.join(", "))
}

fn coverage_message(template: &str, invalid: &[String], missing: &[String]) -> String {
    let mut parts = Vec::new();
    if !invalid.is_empty() {
        parts.push(format!(
            "Invalid fields: {} they do not exist on path_template: '{}'",
            quoted_list(invalid),
            template
        ));
    }
    if !missing.is_empty() {
        parts.push(format!(
            "Missing fields: {} they are required in path_template: '{}'",
            quoted_list(missing),
            template
        ));
    }
    parts.join("; ")
}
