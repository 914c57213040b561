//! Plugin translator capability

use tcfg_value::{Value, ValueType};

use crate::context::TranslationContext;
use crate::error::TranslateError;

/// Priority at or below which a translator does not support a target
pub const PRIORITY_NOT_SUPPORTED: i32 = 0;

/// Priority of a translator that supports a target without specialization
pub const PRIORITY_NORMAL: i32 = 100;

/// Outcome of one translation attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Translated {
    /// Produced a value
    Value(Value),
    /// Correctly produced no value
    ExplicitNull,
    /// Not applicable here; try the next candidate
    NotApplicable,
}

impl Translated {
    /// Check for a claimed outcome (value or explicit null)
    #[inline]
    #[must_use]
    pub fn is_claimed(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }

    /// Claimed result, `None` when not applicable
    #[inline]
    #[must_use]
    pub fn into_claimed(self) -> Option<Option<Value>> {
        match self {
            Self::Value(v) => Some(Some(v)),
            Self::ExplicitNull => Some(None),
            Self::NotApplicable => None,
        }
    }
}

impl From<Option<Value>> for Translated {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::ExplicitNull, Self::Value)
    }
}

/// Ranked conversion plugin for arbitrary target types
///
/// Implementations must be pure functions of their inputs: the engine may
/// run the same translation concurrently on several threads.
pub trait ValueTranslator: Send + Sync {
    /// Diagnostic identifier
    fn id(&self) -> &str;

    /// Support strength for `target`; [`PRIORITY_NOT_SUPPORTED`] or less opts out
    ///
    /// # Errors
    /// Any error removes this translator from the candidates of the call
    fn support_priority(&self, target: &ValueType, ctx: &TranslationContext<'_>) -> Result<i32, TranslateError>;

    /// Translate `source` into `target`
    ///
    /// # Errors
    /// Any error moves resolution on to the next candidate
    fn translate(
        &self,
        source: Option<&Value>,
        target: &ValueType,
        ctx: &TranslationContext<'_>,
    ) -> Result<Translated, TranslateError>;
}
