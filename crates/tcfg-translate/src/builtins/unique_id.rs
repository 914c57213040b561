use tcfg_value::{ObjectValue, Value, ValueType};
use uuid::Uuid;

use super::reject;
use crate::context::TranslationContext;
use crate::error::TranslateError;
use crate::translator::{Translated, ValueTranslator, PRIORITY_NORMAL, PRIORITY_NOT_SUPPORTED};

/// UUIDs from their text forms or 16 raw bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTranslator;

impl ValueTranslator for UuidTranslator {
    fn id(&self) -> &str {
        "uuid"
    }

    fn support_priority(&self, target: &ValueType, _: &TranslationContext<'_>) -> Result<i32, TranslateError> {
        Ok(if target.is_object::<Uuid>() {
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
        let id = match source {
            None => return Ok(Translated::ExplicitNull),
            Some(Value::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return reject(target, "blank uuid", ctx);
                }
                match Uuid::parse_str(text) {
                    Ok(id) => id,
                    Err(err) => return reject(target, format!("'{text}': {err}"), ctx),
                }
            }
            Some(Value::Bytes(bytes)) => match Uuid::from_slice(bytes) {
                Ok(id) => id,
                Err(err) => return reject(target, err.to_string(), ctx),
            },
            Some(Value::Object(object)) => match object.downcast_ref::<Uuid>() {
                Some(id) => *id,
                None => return Ok(Translated::NotApplicable),
            },
            Some(_) => return Ok(Translated::NotApplicable),
        };
        Ok(Translated::Value(Value::Object(ObjectValue::displayed(id))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcfg_contract::{Accessor, Contract};

    const ID: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    fn translate(source: Value, strict: bool) -> Result<Translated, TranslateError> {
        let target = ValueType::object::<Uuid>();
        let accessor = Contract::builder("Ids")
            .accessor(Accessor::new("getId", target.clone()))
            .build()
            .unwrap()
            .find("getId")
            .unwrap();
        let ctx = TranslationContext::new(&accessor, None, strict);
        UuidTranslator.translate(Some(&source), &target, &ctx)
    }

    #[test]
    fn parses_hyphenated_and_simple_text() {
        let expected = Uuid::parse_str(ID).unwrap();
        for text in [ID.to_string(), ID.replace('-', ""), format!("  {}  ", ID.to_uppercase())] {
            match translate(Value::text(text), true).unwrap() {
                Translated::Value(Value::Object(object)) => assert_eq!(object.downcast_ref::<Uuid>(), Some(&expected)),
                other => panic!("unexpected outcome {other:?}"),
            }
        }
    }

    #[test]
    fn converts_raw_bytes() {
        let expected = Uuid::parse_str(ID).unwrap();
        match translate(Value::Bytes(expected.as_bytes().to_vec()), true).unwrap() {
            Translated::Value(value) => assert_eq!(value.to_string(), ID),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(translate(Value::Bytes(vec![0; 3]), true).is_err());
    }

    #[test]
    fn invalid_text_depends_on_strictness() {
        assert_eq!(translate(Value::text("not-a-uuid"), false).unwrap(), Translated::ExplicitNull);
        assert!(translate(Value::text("not-a-uuid"), true).is_err());
    }
}
