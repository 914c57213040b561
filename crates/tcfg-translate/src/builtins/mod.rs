//! Built-in plugin translators
//!
//! - [`IpAddrTranslator`]: `IpAddr`, `Ipv4Addr`, `Ipv6Addr`
//! - [`DecimalTranslator`]: `rust_decimal::Decimal`
//! - [`UuidTranslator`]: `uuid::Uuid`
//! - [`RegexTranslator`]: `regex::Regex`
//! - [`EnumSetTranslator`]: lists of enum constants

mod decimal;
mod enum_set;
mod ip;
mod pattern;
mod unique_id;

pub use self::decimal::DecimalTranslator;
pub use self::enum_set::EnumSetTranslator;
pub use self::ip::IpAddrTranslator;
pub use self::pattern::RegexTranslator;
pub use self::unique_id::UuidTranslator;

use tcfg_value::ValueType;

use crate::context::TranslationContext;
use crate::error::TranslateError;
use crate::translator::Translated;

/// Outcome for unusable text: an error in strict mode, otherwise explicit null
fn reject(target: &ValueType, reason: impl Into<String>, ctx: &TranslationContext<'_>) -> Result<Translated, TranslateError> {
    if ctx.strict() {
        Err(TranslateError::invalid(target.to_string(), reason))
    } else {
        Ok(Translated::ExplicitNull)
    }
}
