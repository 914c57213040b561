//! Enumeration translation

use std::sync::Arc;

use crate::error::ConversionError;
use crate::value::Value;
use crate::value_type::EnumType;

/// Translate `source` into a constant of `target`
///
/// Absent source, blank text and (outside strict mode) unknown names or
/// non-text sources all yield `None`. Names match ignoring case; the first
/// match in declaration order wins.
///
/// # Errors
/// - `ConversionError::TypeMismatch` for a non-text source in strict mode
/// - `ConversionError::ParseFailure` for an unknown name in strict mode
pub fn translate_enum(
    source: Option<&Value>,
    target: &Arc<EnumType>,
    strict: bool,
) -> Result<Option<Value>, ConversionError> {
    let Some(source) = source else {
        return Ok(None);
    };
    if let Value::Enum(constant) = source {
        if constant.belongs_to(target) {
            return Ok(Some(source.clone()));
        }
    }
    let Value::Text(text) = source else {
        if strict {
            return Err(ConversionError::type_mismatch(
                source.type_name(),
                format!("enum {}", target.name()),
            ));
        }
        return Ok(None);
    };
    let name = text.trim();
    if name.is_empty() {
        return Ok(None);
    }
    match target.by_name_ignore_case(name) {
        Some(constant) => Ok(Some(Value::Enum(constant))),
        None if strict => Err(ConversionError::parse_failure(
            name,
            format!("enum {}", target.name()),
        )),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> Arc<EnumType> {
        EnumType::new("Status", ["IDLE", "BUSY", "ERROR"])
    }

    #[test]
    fn resolves_name_ignoring_case() {
        let status = status();
        let result = translate_enum(Some(&Value::text("busy")), &status, true).unwrap();
        assert_eq!(result, Some(Value::Enum(status.by_name("BUSY").unwrap())));
    }

    #[test]
    fn trims_text() {
        let status = status();
        let result = translate_enum(Some(&Value::text("  Error\t")), &status, false).unwrap();
        assert_eq!(result.unwrap().to_string(), "ERROR");
    }

    #[test]
    fn unknown_name_depends_on_strictness() {
        let status = status();
        let source = Value::text("unknown");
        let err = translate_enum(Some(&source), &status, true).unwrap_err();
        assert!(matches!(err, ConversionError::ParseFailure { .. }));
        assert_eq!(translate_enum(Some(&source), &status, false).unwrap(), None);
    }

    #[test]
    fn constant_of_target_passes_through() {
        let status = status();
        let idle = Value::Enum(status.constant(0).unwrap());
        assert_eq!(translate_enum(Some(&idle), &status, true).unwrap(), Some(idle));
    }

    #[test]
    fn foreign_constant_is_type_mismatch() {
        let status = status();
        let other = EnumType::new("Level", ["IDLE"]);
        let foreign = Value::Enum(other.constant(0).unwrap());
        let err = translate_enum(Some(&foreign), &status, true).unwrap_err();
        assert!(matches!(err, ConversionError::TypeMismatch { .. }));
        assert_eq!(translate_enum(Some(&foreign), &status, false).unwrap(), None);
    }

    #[test]
    fn non_text_source() {
        let status = status();
        assert!(translate_enum(Some(&Value::Int(1)), &status, true).is_err());
        assert_eq!(translate_enum(Some(&Value::Int(1)), &status, false).unwrap(), None);
    }

    #[test]
    fn absent_or_blank_source_is_absent() {
        let status = status();
        assert_eq!(translate_enum(None, &status, true).unwrap(), None);
        assert_eq!(translate_enum(Some(&Value::text("   ")), &status, true).unwrap(), None);
    }
}
