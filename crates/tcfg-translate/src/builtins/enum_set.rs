use std::collections::BTreeSet;
use std::sync::Arc;

use tcfg_value::{EnumConstant, EnumType, Value, ValueType};

use crate::context::TranslationContext;
use crate::error::TranslateError;
use crate::translator::{Translated, ValueTranslator, PRIORITY_NORMAL, PRIORITY_NOT_SUPPORTED};

const SEPARATORS: &[char] = &[',', ';', ':', ' ', '\t', '\r', '\n'];

/// Sets of enum constants for list accessors declaring an enum item type
///
/// Accepts separator-delimited names, a single constant or a list of
/// constants and names. The result holds each constant once, in ordinal order.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumSetTranslator;

impl EnumSetTranslator {
    fn item_enum<'a>(ctx: &TranslationContext<'a>) -> Option<&'a Arc<EnumType>> {
        ctx.item_type()?.as_enum()
    }

    fn lookup(enum_type: &Arc<EnumType>, name: &str) -> Option<EnumConstant> {
        if enum_type.has_case_ambiguous_constants() {
            enum_type.by_name(name)
        } else {
            enum_type.by_name_ignore_case(name)
        }
    }

    fn member(enum_type: &Arc<EnumType>, item: &Value) -> Option<usize> {
        match item {
            Value::Enum(constant) if constant.belongs_to(enum_type) => Some(constant.ordinal()),
            Value::Text(name) => Self::lookup(enum_type, name.trim()).map(|c| c.ordinal()),
            _ => None,
        }
    }

    fn collect(enum_type: &Arc<EnumType>, ordinals: BTreeSet<usize>) -> Translated {
        let constants = ordinals
            .into_iter()
            .filter_map(|ordinal| enum_type.constant(ordinal))
            .map(Value::Enum)
            .collect();
        Translated::Value(Value::List(constants))
    }
}

impl ValueTranslator for EnumSetTranslator {
    fn id(&self) -> &str {
        "enum-set"
    }

    fn support_priority(&self, target: &ValueType, ctx: &TranslationContext<'_>) -> Result<i32, TranslateError> {
        let supported = matches!(target, ValueType::List) && Self::item_enum(ctx).is_some();
        Ok(if supported {
            PRIORITY_NORMAL
        } else {
            PRIORITY_NOT_SUPPORTED
        })
    }

    fn translate(
        &self,
        source: Option<&Value>,
        _target: &ValueType,
        ctx: &TranslationContext<'_>,
    ) -> Result<Translated, TranslateError> {
        let Some(enum_type) = Self::item_enum(ctx) else {
            return Ok(Translated::NotApplicable);
        };
        let target_name = format!("set of {}", enum_type.name());

        let ordinals = match source {
            None => BTreeSet::new(),
            Some(Value::Enum(constant)) if constant.belongs_to(enum_type) => BTreeSet::from([constant.ordinal()]),
            Some(Value::Text(text)) => {
                let mut ordinals = BTreeSet::new();
                for token in text.split(SEPARATORS).filter(|t| !t.is_empty()) {
                    match Self::lookup(enum_type, token) {
                        Some(constant) => {
                            ordinals.insert(constant.ordinal());
                        }
                        None if ctx.strict() => {
                            return Err(TranslateError::invalid(target_name, format!("unknown constant '{token}'")));
                        }
                        None => tracing::debug!(token, enum_type = enum_type.name(), "skipping unknown constant"),
                    }
                }
                ordinals
            }
            Some(Value::List(items)) => {
                let members: Vec<Option<usize>> = items.iter().map(|item| Self::member(enum_type, item)).collect();
                let foreign = members.iter().filter(|m| m.is_none()).count();
                // Two foreign items (or a lone foreign item) mean the list is not a set of constants
                if foreign > 0 && foreign >= items.len().min(2) {
                    return Ok(Translated::NotApplicable);
                }
                if foreign > 0 {
                    return Err(TranslateError::invalid(
                        target_name,
                        format!("{foreign} of {} items are not constants", items.len()),
                    ));
                }
                members.into_iter().flatten().collect()
            }
            Some(_) => return Ok(Translated::NotApplicable),
        };

        Ok(Self::collect(enum_type, ordinals))
    }
}
