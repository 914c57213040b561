//! Key naming
//!
//! Resolution order for the lookup key of an accessor:
//! 1. explicit name, if present in the data source
//! 2. first alias present in the data source
//! 3. explicit name, even if absent
//! 4. name derived from the call name (`getPort` -> `port`)
//!
//! The prefix always comes from the contract that declared the accessor.

use tcfg_value::{ScalarKind, ValueType};

use crate::contract::AccessorDescriptor;
use crate::provider::DataProvider;

const GETTER_PREFIX: &str = "get";
const FLAG_PREFIX: &str = "is";

/// Lookup key for `accessor` against `provider`
#[must_use]
pub fn resolve_key(accessor: &AccessorDescriptor, provider: &dyn DataProvider) -> String {
    let prefix = accessor.key_prefix();

    if let Some(entry) = accessor.entry() {
        if !entry.name.is_empty() {
            let key = format!("{prefix}{}", entry.name);
            if provider.contains_key(&key) {
                return key;
            }
        }
        let alias_hit = entry
            .aliases
            .iter()
            .filter(|alias| !alias.is_empty())
            .map(|alias| format!("{prefix}{alias}"))
            .find(|key| provider.contains_key(key));
        if let Some(key) = alias_hit {
            tracing::trace!(accessor = accessor.name(), key = %key, "resolved key through alias");
            return key;
        }
        if !entry.name.is_empty() {
            return format!("{prefix}{}", entry.name);
        }
    }

    format!(
        "{prefix}{}",
        derive_local_name(accessor.name(), accessor.result_type(), accessor.args().len())
    )
}

/// Local key name derived from a call name
///
/// Strips `get`, or `is` for argument-less accessors returning a bare
/// `bool`, and decapitalizes the remainder. Names not shaped like getters
/// are returned verbatim.
#[must_use]
pub fn derive_local_name(call_name: &str, result_type: &ValueType, arity: usize) -> String {
    let is_flag = arity == 0 && *result_type == ValueType::scalar(ScalarKind::Bool);
    let remainder = call_name
        .strip_prefix(GETTER_PREFIX)
        .or_else(|| is_flag.then(|| call_name.strip_prefix(FLAG_PREFIX)).flatten());

    let Some(remainder) = remainder else {
        return call_name.to_string();
    };
    let mut chars = remainder.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => first.to_lowercase().chain(chars).collect(),
        _ => call_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{Accessor, Contract};
    use crate::provider::MapDataProvider;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn bare_bool() -> ValueType {
        ValueType::scalar(ScalarKind::Bool)
    }

    fn single(prefix: &str, accessor: Accessor) -> Arc<AccessorDescriptor> {
        let contract = Contract::builder("Settings")
            .prefix(prefix)
            .accessor(accessor)
            .build()
            .unwrap();
        let descriptor = contract.own_accessors().next().cloned().unwrap();
        descriptor
    }

    #[test]
    fn getter_names_are_stripped() {
        assert_eq!(derive_local_name("getPort", &ValueType::Text, 0), "port");
        assert_eq!(derive_local_name("getURL", &ValueType::Text, 0), "uRL");
        assert_eq!(derive_local_name("getPort", &ValueType::Text, 2), "port");
    }

    #[test]
    fn non_getter_names_are_verbatim() {
        assert_eq!(derive_local_name("getterName", &ValueType::Text, 0), "getterName");
        assert_eq!(derive_local_name("port", &ValueType::Text, 0), "port");
        assert_eq!(derive_local_name("get", &ValueType::Text, 0), "get");
        assert_eq!(derive_local_name("get_port", &ValueType::Text, 0), "get_port");
    }

    #[test]
    fn flag_prefix_requires_bare_bool_without_arguments() {
        assert_eq!(derive_local_name("isArmed", &bare_bool(), 0), "armed");
        let optional_bool = ValueType::optional(ScalarKind::Bool);
        assert_eq!(derive_local_name("isArmed", &optional_bool, 0), "isArmed");
        assert_eq!(derive_local_name("isDelta", &ValueType::scalar(ScalarKind::Int), 0), "isDelta");
        assert_eq!(derive_local_name("isArmed", &bare_bool(), 1), "isArmed");
        assert_eq!(derive_local_name("is", &bare_bool(), 0), "is");
    }

    #[test]
    fn derived_name_uses_declaring_prefix() {
        let accessor = single("server", Accessor::new("getPort", ValueType::Text));
        let provider = MapDataProvider::new();
        assert_eq!(resolve_key(&accessor, &provider), "server.port");
    }

    #[test]
    fn explicit_name_present_wins_over_alias() {
        let accessor = single("db", Accessor::new("getUrl", ValueType::Text).entry("url", ["uri", "dsn"]));
        let provider = MapDataProvider::new().with("db.url", "a").with("db.uri", "b");
        assert_eq!(resolve_key(&accessor, &provider), "db.url");
    }

    #[test]
    fn first_present_alias_wins() {
        let accessor = single("db", Accessor::new("getUrl", ValueType::Text).entry("url", ["uri", "dsn"]));
        let provider = MapDataProvider::new().with("db.dsn", "b").with("db.uri", "c");
        assert_eq!(resolve_key(&accessor, &provider), "db.uri");
    }

    #[test]
    fn explicit_name_is_fallback_when_nothing_matches() {
        let accessor = single("db", Accessor::new("getUrl", ValueType::Text).entry("url", ["uri"]));
        assert_eq!(resolve_key(&accessor, &MapDataProvider::new()), "db.url");
    }

    #[test]
    fn empty_explicit_name_uses_aliases_then_derivation() {
        let accessor = single("", Accessor::new("getUrl", ValueType::Text).entry("", ["", "link"]));
        let with_alias = MapDataProvider::new().with("link", "x");
        assert_eq!(resolve_key(&accessor, &with_alias), "link");
        assert_eq!(resolve_key(&accessor, &MapDataProvider::new()), "url");
    }

    #[test]
    fn type_name_placeholder_prefix() {
        let accessor = single("*", Accessor::new("isEnabled", bare_bool()));
        assert_eq!(resolve_key(&accessor, &MapDataProvider::new()), "Settings.enabled");
    }

    proptest! {
        #[test]
        fn prop_getter_derivation(first in "[A-Z]", rest in "[a-zA-Z0-9]{0,12}") {
            let call = format!("get{first}{rest}");
            let expected = format!("{}{rest}", first.to_lowercase());
            prop_assert_eq!(derive_local_name(&call, &ValueType::Text, 0), expected);
        }

        #[test]
        fn prop_lowercase_remainder_is_verbatim(rest in "[a-z0-9_][a-zA-Z0-9]{0,12}") {
            let call = format!("get{rest}");
            prop_assert_eq!(derive_local_name(&call, &ValueType::Text, 0), call.clone());
        }

        #[test]
        fn prop_explicit_name_precedes_aliases(
            name in "[a-z]{1,8}",
            aliases in proptest::collection::vec("[A-Z]{1,8}", 0..4),
        ) {
            let accessor = single("p", Accessor::new("getX", ValueType::Text).entry(name.clone(), aliases.clone()));
            let provider = MapDataProvider::new().with(format!("p.{name}"), "v");
            for alias in &aliases {
                provider.insert(format!("p.{alias}"), "w");
            }
            prop_assert_eq!(resolve_key(&accessor, &provider), format!("p.{name}"));
        }
    }
}
