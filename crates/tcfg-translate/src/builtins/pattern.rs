use regex::Regex;
use tcfg_value::{ObjectValue, Value, ValueType};

use super::reject;
use crate::context::TranslationContext;
use crate::error::TranslateError;
use crate::translator::{Translated, ValueTranslator, PRIORITY_NORMAL, PRIORITY_NOT_SUPPORTED};

/// Compiled regular expressions from pattern text
///
/// Patterns are not trimmed; whitespace is significant in a pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexTranslator;

impl ValueTranslator for RegexTranslator {
    fn id(&self) -> &str {
        "regex"
    }

    fn support_priority(&self, target: &ValueType, _: &TranslationContext<'_>) -> Result<i32, TranslateError> {
        Ok(if target.is_object::<Regex>() {
            PRIORITY_NORMAL
        } else {
            PRIORITY_NOT_SUPPORTED
        })
    }

    fn translate(
        &self,
        source: Option<&Value>,
        target: &ValueType,
        ctx: &TranslationContext<'_>,
    ) -> Result<Translated, TranslateError> {
        match source {
            None => Ok(Translated::ExplicitNull),
            Some(Value::Text(pattern)) if pattern.is_empty() => reject(target, "empty pattern", ctx),
            Some(Value::Text(pattern)) => match Regex::new(pattern) {
                Ok(regex) => Ok(Translated::Value(Value::Object(ObjectValue::displayed(regex)))),
                Err(err) => reject(target, err.to_string(), ctx),
            },
            Some(_) => Ok(Translated::NotApplicable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcfg_contract::{Accessor, Contract};

    fn translate(source: Value, strict: bool) -> Result<Translated, TranslateError> {
        let target = ValueType::object::<Regex>();
        let accessor = Contract::builder("Filters")
            .accessor(Accessor::new("getPattern", target.clone()))
            .build()
            .unwrap()
            .find("getPattern")
            .unwrap();
        let ctx = TranslationContext::new(&accessor, None, strict);
        RegexTranslator.translate(Some(&source), &target, &ctx)
    }

    #[test]
    fn compiles_patterns() {
        match translate(Value::text(r"^v\d+$"), true).unwrap() {
            Translated::Value(Value::Object(object)) => {
                let regex = object.downcast::<Regex>().unwrap();
                assert!(regex.is_match("v12"));
                assert!(!regex.is_match("x12"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn invalid_patterns() {
        assert_eq!(translate(Value::text("(unclosed"), false).unwrap(), Translated::ExplicitNull);
        assert!(translate(Value::text("(unclosed"), true).is_err());
        assert!(translate(Value::text(""), true).is_err());
    }

    #[test]
    fn non_text_is_not_applicable() {
        assert_eq!(translate(Value::Int(3), true).unwrap(), Translated::NotApplicable);
    }
}
