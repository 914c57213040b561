//! Error types for plugin translation
//!
//! Translator errors never reach the caller of an accessor: the registry
//! logs them and moves on to the next candidate.

use tcfg_value::{ConstructError, ConversionError};

/// Errors raised by translators and constructor factories
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// Standard conversion rule failed
    #[error("conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// Constructor factory failed
    #[error("construction failed: {0}")]
    Construct(#[from] ConstructError),

    /// Source is not valid for the target type
    #[error("invalid source for {target}: {reason}")]
    Invalid {
        /// Display name of the requested type
        target: String,
        /// What was wrong with the source
        reason: String,
    },
}

impl TranslateError {
    /// Create invalid-source error
    pub fn invalid(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            target: target.into(),
            reason: reason.into(),
        }
    }
}
