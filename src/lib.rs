// Library exports for andar
//
// Define a file path by a template of named fields, then create paths from
// field values and parse paths back into typed values.

pub mod config;
pub mod domain;
pub mod error;
pub mod validation;

pub use config::models::{load_models, load_models_from_file, load_models_with_registry};
pub use domain::template::extract_field_names;
pub use domain::{
    CaptureSlot, CompiledPattern, Converter, ConverterRegistry, FieldConf, FieldValue, FieldValues,
    FnConverter, IntegerOp, LowerOp, Overrides, ParentPlan, PathBuilder, PathBuilderConfig,
    SafePatterns, UpperOp, ValueConverter,
};
pub use error::{ErrorKind, PathError, Result};
