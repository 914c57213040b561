//! Per-call translation context

use tcfg_contract::AccessorDescriptor;
use tcfg_value::{Value, ValueType};

/// What translators and the constructor fallback know about the current call
#[derive(Debug, Clone, Copy)]
pub struct TranslationContext<'a> {
    accessor: &'a AccessorDescriptor,
    args: Option<&'a [Option<Value>]>,
    strict: bool,
}

impl<'a> TranslationContext<'a> {
    /// Create context; an empty argument slice counts as no arguments
    #[must_use]
    pub fn new(accessor: &'a AccessorDescriptor, args: Option<&'a [Option<Value>]>, strict: bool) -> Self {
        Self {
            accessor,
            args: args.filter(|a| !a.is_empty()),
            strict,
        }
    }

    /// Accessor being resolved, for its directives
    #[inline]
    #[must_use]
    pub fn accessor(&self) -> &'a AccessorDescriptor {
        self.accessor
    }

    /// Call arguments, absent for argument-less calls
    #[inline]
    #[must_use]
    pub fn args(&self) -> Option<&'a [Option<Value>]> {
        self.args
    }

    /// Strict-mode flag of the binding
    #[inline]
    #[must_use]
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Element type directive of the accessor
    #[inline]
    #[must_use]
    pub fn item_type(&self) -> Option<&'a ValueType> {
        self.accessor.item_type()
    }
}
