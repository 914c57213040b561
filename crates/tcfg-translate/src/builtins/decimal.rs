use std::str::FromStr;

use rust_decimal::Decimal;
use tcfg_value::{Number, ObjectValue, Value, ValueType};

use super::reject;
use crate::context::TranslationContext;
use crate::error::TranslateError;
use crate::translator::{Translated, ValueTranslator, PRIORITY_NORMAL, PRIORITY_NOT_SUPPORTED};

/// Exact decimals from text, integers and floats
///
/// Floats go through their shortest decimal rendering, so `0.1f64` becomes
/// `0.1` rather than its binary expansion.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalTranslator;

impl DecimalTranslator {
    fn parse(text: &str) -> Option<Decimal> {
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
    }
}

impl ValueTranslator for DecimalTranslator {
    fn id(&self) -> &str {
        "decimal"
    }

    fn support_priority(&self, target: &ValueType, _: &TranslationContext<'_>) -> Result<i32, TranslateError> {
        Ok(if target.is_object::<Decimal>() {
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
        let Some(source) = source else {
            return Ok(Translated::ExplicitNull);
        };

        let decimal = match (source, source.as_number()) {
            (Value::Object(object), _) => match object.downcast_ref::<Decimal>() {
                Some(decimal) => *decimal,
                None => return Ok(Translated::NotApplicable),
            },
            (Value::Text(text), _) => {
                let text = text.trim();
                if text.is_empty() {
                    return reject(target, "blank decimal", ctx);
                }
                match Self::parse(text) {
                    Some(decimal) => decimal,
                    None => return reject(target, format!("'{text}' is not a decimal"), ctx),
                }
            }
            (_, Some(Number::Integer(n))) => Decimal::from(n),
            (_, Some(Number::Float(f))) => {
                let rendered = match source {
                    Value::Float(single) => single.to_string(),
                    _ => f.to_string(),
                };
                match Self::parse(&rendered) {
                    Some(decimal) => decimal,
                    None => return reject(target, format!("{rendered} has no decimal form"), ctx),
                }
            }
            _ => return Ok(Translated::NotApplicable),
        };

        Ok(Translated::Value(Value::Object(ObjectValue::displayed(decimal))))
    }
}
