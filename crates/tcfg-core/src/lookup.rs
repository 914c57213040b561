//! Typed lookups directly against a data provider
//!
//! For callers that need a single value without declaring a contract.
//! Conversions are lenient: a missing key or an unconvertible value yields
//! the supplied default. Object lookups run the plugin translators of a
//! registry, then the constructor fallback.

use rust_decimal::Decimal;
use tcfg_contract::{Accessor, Contract, DataProvider};
use tcfg_translate::{construct, DecimalTranslator, TranslationContext, TranslatorRegistry};
use tcfg_value::{translate_enum, translate_scalar, ConfigEnum, FromValue, ScalarKind, Value, ValueType};

const LOOKUP_CONTRACT: &str = "ResourceAccessor";

/// Typed getters with defaults, available on every [`DataProvider`]
pub trait ResourceAccessor: DataProvider {
    /// Text value; non-text values are rendered
    fn get_string(&self, key: &str, default: &str) -> String {
        match self.get_raw(key) {
            Some(Value::Text(text)) => text,
            Some(other) => other.to_string(),
            None => default.to_string(),
        }
    }

    /// Boolean value; any text other than `true` (ignoring case) is `false`
    fn get_bool(&self, key: &str, default: bool) -> bool {
        scalar(self, key, ScalarKind::Bool).unwrap_or(default)
    }

    /// 32-bit integer value
    fn get_int(&self, key: &str, default: i32) -> i32 {
        scalar(self, key, ScalarKind::Int).unwrap_or(default)
    }

    /// 64-bit integer value
    fn get_long(&self, key: &str, default: i64) -> i64 {
        scalar(self, key, ScalarKind::Long).unwrap_or(default)
    }

    /// 64-bit float value
    fn get_double(&self, key: &str, default: f64) -> f64 {
        scalar(self, key, ScalarKind::Double).unwrap_or(default)
    }

    /// Enumeration value, matched by name ignoring case
    fn get_enum<E: ConfigEnum>(&self, key: &str, default: E) -> E
    where
        Self: Sized,
    {
        let raw = self.get_raw(key);
        translate_enum(raw.as_ref(), &E::enum_type(), false)
            .ok()
            .flatten()
            .and_then(|value| value.as_enum().and_then(E::from_constant))
            .unwrap_or(default)
    }

    /// Decimal value
    fn get_decimal(&self, key: &str, default: Decimal) -> Decimal {
        let Some(raw) = self.get_raw(key) else {
            return default;
        };
        let decimals = TranslatorRegistry::new().with(DecimalTranslator);
        convert_object(key, Some(&raw), &decimals, &ValueType::object::<Decimal>())
            .and_then(|value| value.as_object().and_then(|o| o.downcast_ref::<Decimal>().copied()))
            .unwrap_or(default)
    }

    /// Value of type `target`, converted by `registry` or a registered constructor
    fn get_object(
        &self,
        key: &str,
        registry: &TranslatorRegistry,
        target: &ValueType,
        default: Option<Value>,
    ) -> Option<Value> {
        let Some(raw) = self.get_raw(key) else {
            return default;
        };
        convert_object(key, Some(&raw), registry, target).or(default)
    }

    /// Like [`ResourceAccessor::get_object`], converting `default_text` when the key is missing
    fn get_object_with_text_default(
        &self,
        key: &str,
        registry: &TranslatorRegistry,
        target: &ValueType,
        default_text: &str,
    ) -> Option<Value> {
        let raw = if self.contains_key(key) {
            self.get_raw(key)
        } else {
            Some(Value::text(default_text))
        };
        convert_object(key, raw.as_ref(), registry, target)
    }
}

impl<P: DataProvider + ?Sized> ResourceAccessor for P {}

fn convert_object(
    key: &str,
    source: Option<&Value>,
    registry: &TranslatorRegistry,
    target: &ValueType,
) -> Option<Value> {
    let contract = Contract::builder(LOOKUP_CONTRACT)
        .accessor(Accessor::new(key, target.clone()).named(key))
        .build()
        .ok()?;
    let accessor = contract.find(key).ok()?;
    let ctx = TranslationContext::new(&accessor, None, false);
    registry
        .translate(source, target, &ctx)
        .into_claimed()
        .unwrap_or_else(|| construct(source, target, &ctx))
}

fn scalar<P, T>(provider: &P, key: &str, kind: ScalarKind) -> Option<T>
where
    P: DataProvider + ?Sized,
    T: FromValue,
{
    let raw = provider.get_raw(key);
    translate_scalar(raw.as_ref(), kind.optional(), false)
        .ok()
        .flatten()
        .and_then(|value| T::from_value(&value))
}
