//! Scalar conversion table
//!
//! One [`ScalarRule`] per [`ScalarKind`], each defining:
//! - which source representations already have the right shape
//! - how trimmed text is parsed
//! - how any numeric source is narrowed
//! - the kind's zero value (used as the default of the bare form)
//!
//! The optional form shares the rule but defaults to absence.

use crate::error::ConversionError;
use crate::value::{Number, Value};
use crate::value_type::{ScalarForm, ScalarKind, ScalarType};

/// Conversion rule for one scalar kind
#[derive(Debug, Clone)]
pub struct ScalarRule {
    /// Kind covered by this rule
    pub kind: ScalarKind,
    parse: fn(&str) -> Option<Value>,
    narrow: fn(Number) -> Value,
    zero: Value,
}

static SCALAR_TABLE: [ScalarRule; 7] = [
    ScalarRule {
        kind: ScalarKind::Bool,
        parse: |s| Some(Value::Bool(s.eq_ignore_ascii_case("true"))),
        narrow: |n| match n {
            Number::Integer(i) => Value::Bool(i as i32 != 0),
            Number::Float(f) => Value::Bool(f as i32 != 0),
        },
        zero: Value::Bool(false),
    },
    ScalarRule {
        kind: ScalarKind::Byte,
        parse: |s| s.parse::<i8>().ok().map(Value::Byte),
        narrow: |n| match n {
            Number::Integer(i) => Value::Byte(i as i8),
            Number::Float(f) => Value::Byte(f as i32 as i8),
        },
        zero: Value::Byte(0),
    },
    ScalarRule {
        kind: ScalarKind::Short,
        parse: |s| s.parse::<i16>().ok().map(Value::Short),
        narrow: |n| match n {
            Number::Integer(i) => Value::Short(i as i16),
            Number::Float(f) => Value::Short(f as i32 as i16),
        },
        zero: Value::Short(0),
    },
    ScalarRule {
        kind: ScalarKind::Int,
        parse: |s| s.parse::<i32>().ok().map(Value::Int),
        narrow: |n| match n {
            Number::Integer(i) => Value::Int(i as i32),
            Number::Float(f) => Value::Int(f as i32),
        },
        zero: Value::Int(0),
    },
    ScalarRule {
        kind: ScalarKind::Long,
        parse: |s| s.parse::<i64>().ok().map(Value::Long),
        narrow: |n| match n {
            Number::Integer(i) => Value::Long(i),
            Number::Float(f) => Value::Long(f as i64),
        },
        zero: Value::Long(0),
    },
    ScalarRule {
        kind: ScalarKind::Float,
        parse: |s| s.parse::<f32>().ok().map(Value::Float),
        narrow: |n| match n {
            Number::Integer(i) => Value::Float(i as f32),
            Number::Float(f) => Value::Float(f as f32),
        },
        zero: Value::Float(0.0),
    },
    ScalarRule {
        kind: ScalarKind::Double,
        parse: |s| s.parse::<f64>().ok().map(Value::Double),
        narrow: |n| match n {
            Number::Integer(i) => Value::Double(i as f64),
            Number::Float(f) => Value::Double(f),
        },
        zero: Value::Double(0.0),
    },
];

impl ScalarRule {
    /// Rule for `kind`
    #[inline]
    #[must_use]
    pub fn for_kind(kind: ScalarKind) -> &'static ScalarRule {
        // Table order matches declaration order of ScalarKind
        &SCALAR_TABLE[kind as usize]
    }

    /// Whether `value` already has this kind's representation
    #[inline]
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        value.scalar_kind() == Some(self.kind)
    }

    /// Parse already-trimmed text
    #[inline]
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<Value> {
        (self.parse)(text)
    }

    /// Narrow any numeric value; `None` for non-numeric input
    #[inline]
    #[must_use]
    pub fn narrow(&self, value: &Value) -> Option<Value> {
        value.as_number().map(self.narrow)
    }

    /// Kind's zero value
    #[inline]
    #[must_use]
    pub fn zero(&self) -> Value {
        self.zero.clone()
    }

    /// Default for the requested form: zero when bare, absent when optional
    #[inline]
    #[must_use]
    pub fn default_for(&self, form: ScalarForm) -> Option<Value> {
        match form {
            ScalarForm::Bare => Some(self.zero()),
            ScalarForm::Optional => None,
        }
    }
}

/// Parse trimmed text into `kind`, without falling back to a default
#[must_use]
pub fn parse_scalar(text: &str, kind: ScalarKind) -> Option<Value> {
    ScalarRule::for_kind(kind).parse(text.trim())
}

/// Translate `source` into the scalar `target`
///
/// Resolution order:
/// 1. absent source → default of the requested form
/// 2. source already of the kind's representation → unchanged
/// 3. numeric source → narrowed
/// 4. text → trimmed and parsed; a failure raises in strict mode, else default
/// 5. anything else → default
///
/// # Errors
/// `ConversionError::ParseFailure` when text does not parse and `strict` is set
pub fn translate_scalar(
    source: Option<&Value>,
    target: ScalarType,
    strict: bool,
) -> Result<Option<Value>, ConversionError> {
    let rule = ScalarRule::for_kind(target.kind);
    let Some(source) = source else {
        return Ok(rule.default_for(target.form));
    };
    if rule.accepts(source) {
        return Ok(Some(source.clone()));
    }
    if let Some(narrowed) = rule.narrow(source) {
        return Ok(Some(narrowed));
    }
    if let Value::Text(text) = source {
        let trimmed = text.trim();
        if let Some(parsed) = rule.parse(trimmed) {
            return Ok(Some(parsed));
        }
        if strict {
            return Err(ConversionError::parse_failure(trimmed, target.to_string()));
        }
    }
    Ok(rule.default_for(target.form))
}
