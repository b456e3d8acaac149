// Domain model for templated paths

pub mod assembler;
mod bijection;
pub mod builder;
mod codec;
pub mod converter;
pub mod field;
pub mod normalize;
pub mod parent;
pub mod pattern;
pub mod patterns;
pub mod registry;
pub mod template;
pub mod value;

pub use builder::{Overrides, PathBuilder, PathBuilderConfig};
pub use converter::{ConverterRegistry, FnConverter, IntegerOp, LowerOp, UpperOp, ValueConverter};
pub use field::{Converter, FieldConf};
pub use parent::ParentPlan;
pub use pattern::{CaptureSlot, CompiledPattern};
pub use patterns::SafePatterns;
pub use value::{FieldValue, FieldValues};
