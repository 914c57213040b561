use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use tcfg_value::{ObjectValue, Value, ValueType};

use super::reject;
use crate::context::TranslationContext;
use crate::error::TranslateError;
use crate::translator::{Translated, ValueTranslator, PRIORITY_NORMAL, PRIORITY_NOT_SUPPORTED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Any,
    V4,
    V6,
}

impl Family {
    fn of(target: &ValueType) -> Option<Self> {
        if target.is_object::<IpAddr>() {
            Some(Self::Any)
        } else if target.is_object::<Ipv4Addr>() {
            Some(Self::V4)
        } else if target.is_object::<Ipv6Addr>() {
            Some(Self::V6)
        } else {
            None
        }
    }

    fn wrap(self, addr: IpAddr) -> Option<Value> {
        let object = match (self, addr) {
            (Self::Any, addr) => ObjectValue::displayed(addr),
            (Self::V4, IpAddr::V4(v4)) => ObjectValue::displayed(v4),
            (Self::V6, IpAddr::V6(v6)) => ObjectValue::displayed(v6),
            _ => return None,
        };
        Some(Value::Object(object))
    }
}

/// IP addresses from numeric text or raw 4/16-byte arrays
///
/// Host names are not resolved. The family-specific types rank above
/// [`IpAddr`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IpAddrTranslator;

impl ValueTranslator for IpAddrTranslator {
    fn id(&self) -> &str {
        "ip-addr"
    }

    fn support_priority(&self, target: &ValueType, _: &TranslationContext<'_>) -> Result<i32, TranslateError> {
        Ok(match Family::of(target) {
            Some(Family::Any) => PRIORITY_NORMAL,
            Some(_) => PRIORITY_NORMAL + 1,
            None => PRIORITY_NOT_SUPPORTED,
        })
    }

    fn translate(
        &self,
        source: Option<&Value>,
        target: &ValueType,
        ctx: &TranslationContext<'_>,
    ) -> Result<Translated, TranslateError> {
        let Some(family) = Family::of(target) else {
            return Ok(Translated::NotApplicable);
        };
        let Some(source) = source else {
            return Ok(Translated::ExplicitNull);
        };

        let addr = match source {
            Value::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return reject(target, "blank address", ctx);
                }
                match text.parse::<IpAddr>() {
                    Ok(addr) => addr,
                    Err(err) => return reject(target, format!("'{text}': {err}"), ctx),
                }
            }
            Value::Bytes(bytes) => match bytes.len() {
                4 => {
                    let octets: [u8; 4] = [bytes[0], bytes[1], bytes[2], bytes[3]];
                    IpAddr::from(octets)
                }
                16 => {
                    let mut octets = [0u8; 16];
                    octets.copy_from_slice(bytes);
                    IpAddr::from(octets)
                }
                n => return reject(target, format!("{n} address bytes"), ctx),
            },
            Value::Object(object) => {
                if let Some(addr) = object.downcast_ref::<IpAddr>() {
                    *addr
                } else if let Some(v4) = object.downcast_ref::<Ipv4Addr>() {
                    IpAddr::V4(*v4)
                } else if let Some(v6) = object.downcast_ref::<Ipv6Addr>() {
                    IpAddr::V6(*v6)
                } else {
                    return Ok(Translated::NotApplicable);
                }
            }
            _ => return Ok(Translated::NotApplicable),
        };

        match family.wrap(addr) {
            Some(value) => Ok(Translated::Value(value)),
            None if ctx.strict() => Err(TranslateError::invalid(
                target.to_string(),
                format!("{addr} is of the other address family"),
            )),
            None => Ok(Translated::NotApplicable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tcfg_contract::{Accessor, AccessorDescriptor, Contract};

    fn accessor(target: ValueType) -> Arc<AccessorDescriptor> {
        Contract::builder("Net")
            .accessor(Accessor::new("getAddress", target))
            .build()
            .unwrap()
            .find("getAddress")
            .unwrap()
    }

    fn translate(source: Value, target: &ValueType, strict: bool) -> Result<Translated, TranslateError> {
        let accessor = accessor(target.clone());
        let ctx = TranslationContext::new(&accessor, None, strict);
        IpAddrTranslator.translate(Some(&source), target, &ctx)
    }

    fn addr_of<T: Copy + 'static>(translated: Translated) -> T {
        match translated {
            Translated::Value(Value::Object(object)) => *object.downcast_ref::<T>().unwrap(),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn family_specific_targets_rank_higher() {
        let any = ValueType::object::<IpAddr>();
        let v4 = ValueType::object::<Ipv4Addr>();
        let accessor = accessor(any.clone());
        let ctx = TranslationContext::new(&accessor, None, false);
        assert_eq!(IpAddrTranslator.support_priority(&any, &ctx).unwrap(), PRIORITY_NORMAL);
        assert_eq!(IpAddrTranslator.support_priority(&v4, &ctx).unwrap(), PRIORITY_NORMAL + 1);
        assert_eq!(
            IpAddrTranslator.support_priority(&ValueType::Text, &ctx).unwrap(),
            PRIORITY_NOT_SUPPORTED
        );
    }

    #[test]
    fn parses_text_addresses() {
        let v4 = translate(Value::text(" 192.168.0.1 "), &ValueType::object::<Ipv4Addr>(), true).unwrap();
        assert_eq!(addr_of::<Ipv4Addr>(v4), Ipv4Addr::new(192, 168, 0, 1));
        let any = translate(Value::text("::1"), &ValueType::object::<IpAddr>(), true).unwrap();
        assert_eq!(addr_of::<IpAddr>(any), IpAddr::V6(Ipv6Addr::LOCALHOST));
    }

    #[test]
    fn converts_raw_octets() {
        let v4 = translate(Value::Bytes(vec![10, 0, 0, 7]), &ValueType::object::<IpAddr>(), true).unwrap();
        assert_eq!(addr_of::<IpAddr>(v4), IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7)));
        let bad = translate(Value::Bytes(vec![1, 2, 3]), &ValueType::object::<IpAddr>(), false).unwrap();
        assert_eq!(bad, Translated::ExplicitNull);
    }

    #[test]
    fn blank_or_invalid_text_depends_on_strictness() {
        let target = ValueType::object::<IpAddr>();
        assert_eq!(translate(Value::text("  "), &target, false).unwrap(), Translated::ExplicitNull);
        assert_eq!(
            translate(Value::text("example.org"), &target, false).unwrap(),
            Translated::ExplicitNull
        );
        assert!(translate(Value::text("example.org"), &target, true).is_err());
    }

    #[test]
    fn family_mismatch() {
        let v6 = ValueType::object::<Ipv6Addr>();
        assert_eq!(
            translate(Value::text("127.0.0.1"), &v6, false).unwrap(),
            Translated::NotApplicable
        );
        assert!(translate(Value::text("127.0.0.1"), &v6, true).is_err());
    }

    #[test]
    fn rendering_uses_address_notation() {
        let any = translate(Value::text("10.1.2.3"), &ValueType::object::<IpAddr>(), false).unwrap();
        match any {
            Translated::Value(value) => assert_eq!(value.to_string(), "10.1.2.3"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
