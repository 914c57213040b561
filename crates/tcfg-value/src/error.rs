//! Error types for value conversion
//!
//! Provides error handling for:
//! - Text that cannot be parsed into a scalar or enum (strict mode only)
//! - Values whose shape is incompatible with the requested type (strict mode only)
//! - Constructor factories and indexed text formatting

/// Conversion failures raised by the scalar and enum rules in strict mode
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Text could not be converted to the requested scalar or enum type
    #[error("cannot parse value '{value}' into type {target}")]
    ParseFailure {
        /// The trimmed source text
        value: String,
        /// Display name of the requested type
        target: String,
    },

    /// The source value's shape is fundamentally incompatible with the requested type
    #[error("cannot transform type {source_type} into {target}")]
    TypeMismatch {
        /// Representation type of the source value
        source_type: String,
        /// Display name of the requested type
        target: String,
    },
}

impl ConversionError {
    /// Create parse failure for text and target type
    pub fn parse_failure(value: impl Into<String>, target: impl Into<String>) -> Self {
        Self::ParseFailure {
            value: value.into(),
            target: target.into(),
        }
    }

    /// Create type mismatch for source and target type names
    pub fn type_mismatch(source_type: impl Into<String>, target: impl Into<String>) -> Self {
        Self::TypeMismatch {
            source_type: source_type.into(),
            target: target.into(),
        }
    }
}

/// Errors raised by registered object constructors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructError {
    /// Constructor invoked with the wrong number of arguments
    #[error("constructor expects {expected} arguments, got {actual}")]
    ArgumentCount {
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        actual: usize,
    },

    /// An argument had an unexpected shape
    #[error("invalid constructor argument: {0}")]
    InvalidArgument(String),

    /// The factory itself rejected the input
    #[error("construction failed: {0}")]
    Failed(String),
}

/// Errors during indexed text formatting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// A `{` without matching `}`
    #[error("unclosed placeholder starting at byte {position}")]
    UnclosedPlaceholder {
        /// Byte offset of the opening brace
        position: usize,
    },

    /// Placeholder content is not a plain argument index
    #[error("invalid placeholder '{{{0}}}'")]
    InvalidPlaceholder(String),
}
