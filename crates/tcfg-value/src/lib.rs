//! tcfg Value System
//!
//! Raw values, declared-type descriptors and the standard conversion rules
//! shared by every translation phase.
//!
//! # Core Concepts
//!
//! - [`Value`]: untyped value handed out by data providers (absence is `None`)
//! - [`ValueType`]: declared result/argument type of an accessor
//! - [`ScalarRule`]: per-kind entry of the scalar conversion table
//! - [`translate_scalar`] / [`translate_enum`]: strict or lenient conversions
//! - [`format_indexed`]: `{n}` template formatting for text accessors
//!
//! # Example
//!
//! ```rust
//! use tcfg_value::{translate_scalar, ScalarKind, Value};
//!
//! let parsed = translate_scalar(Some(&Value::text(" 42 ")), ScalarKind::Int.bare(), true).unwrap();
//! assert_eq!(parsed, Some(Value::Int(42)));
//!
//! // Missing optional scalars stay absent, missing bare scalars become zero
//! assert_eq!(translate_scalar(None, ScalarKind::Int.optional(), true).unwrap(), None);
//! assert_eq!(translate_scalar(None, ScalarKind::Int.bare(), true).unwrap(), Some(Value::Int(0)));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod enums;
pub mod error;
pub mod format;
pub mod scalar;
pub mod value;
pub mod value_type;

// Re-exports
pub use enums::translate_enum;
pub use error::{ConstructError, ConversionError, FormatError};
pub use format::format_indexed;
pub use scalar::{parse_scalar, translate_scalar, ScalarRule};
pub use value::{EnumConstant, FromValue, Number, ObjectValue, Value};
pub use value_type::{
    ConfigEnum, Constructor, EnumType, ObjectType, ScalarForm, ScalarKind, ScalarType, ValueType,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
