//! Error types for bound contracts
//!
//! Provides error handling for:
//! - Strict-mode conversion failures
//! - Calls to unknown accessors or with the wrong number of arguments
//! - Typed getters whose result has an unexpected shape
//! - Invalid engine configuration documents

use tcfg_contract::{ContractError, ProviderError};
use tcfg_value::ConversionError;

/// Main binding error type
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// Strict-mode conversion failure
    #[error("conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// Contract declaration failure
    #[error("contract error: {0}")]
    Contract(#[from] ContractError),

    /// Data provider construction failure
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// No accessor with this name
    #[error("contract {contract} has no accessor '{name}'")]
    UnknownAccessor {
        /// Bound contract
        contract: String,
        /// Call name
        name: String,
    },

    /// Wrong number of call arguments
    #[error("accessor '{name}' takes {expected} arguments, got {actual}")]
    ArgumentCount {
        /// Call name
        name: String,
        /// Declared argument count
        expected: usize,
        /// Supplied argument count
        actual: usize,
    },

    /// Result does not have the requested Rust type
    #[error("accessor '{name}' returned {found}, expected {expected}")]
    UnexpectedType {
        /// Call name
        name: String,
        /// Requested Rust type
        expected: &'static str,
        /// Representation type of the result
        found: String,
    },

    /// Invalid engine configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl BindError {
    /// Check for a strict-mode conversion failure
    #[inline]
    #[must_use]
    pub fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion(_))
    }
}

/// Result alias for binding operations
pub type BindResult<T> = Result<T, BindError>;
