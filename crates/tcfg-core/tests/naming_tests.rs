//! Key resolution through bound contracts

use pretty_assertions::assert_eq;
use tcfg_contract::{Accessor, Contract, MapDataProvider};
use tcfg_core::{BindError, ConfigBinder};
use tcfg_test_utils::{hierarchy, hierarchy_data, init_tracing};
use tcfg_value::{ScalarKind, Value, ValueType};

#[test]
fn test_prefix_comes_from_declaring_contract() {
    init_tracing();
    let child = ConfigBinder::new(hierarchy_data()).bind(&hierarchy());

    let resolved: Vec<(String, Option<String>)> = ["getA", "getB", "getC", "getD", "getE", "getF", "getG"]
        .into_iter()
        .map(|name| (name.to_string(), child.get_as::<String>(name).unwrap()))
        .collect();

    let expected: Vec<(String, Option<String>)> = [
        ("getA", "K"),
        ("getB", "L"),
        ("getC", "M"),
        ("getD", "N"),
        ("getE", "L"),
        ("getF", "M"),
        ("getG", "N"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), Some(value.to_string())))
    .collect();

    assert_eq!(resolved, expected);
}

#[test]
fn test_effective_accessors_exclude_overridden() {
    let contract = hierarchy();
    let names: Vec<String> = contract.accessors().iter().map(|a| a.name().to_string()).collect();
    assert_eq!(names, vec!["getD", "getG", "getC", "getF", "getB", "getE", "getA"]);
    assert_eq!(contract.find("getB").unwrap().contract(), "Middle");
}

#[test]
fn test_explicit_name_and_aliases() {
    let contract = Contract::builder("Db")
        .prefix("db")
        .accessor(Accessor::new("getUrl", ValueType::Text).entry("url", ["jdbcUrl", "connection"]))
        .accessor(Accessor::new("getUser", ValueType::Text).entry("user", ["login"]))
        .accessor(Accessor::new("getPool", ValueType::scalar(ScalarKind::Int)).named("pool.size"))
        .build()
        .unwrap();

    let provider = MapDataProvider::new()
        .with("db.connection", "postgres://b")
        .with("db.jdbcUrl", "postgres://a")
        .with("db.pool.size", "8");
    let db = ConfigBinder::new(provider).bind(&contract);

    // First alias present wins, in declaration order
    assert_eq!(db.get("getUrl").unwrap(), Some(Value::text("postgres://a")));
    // Nothing present: the explicit name is looked up and found missing
    assert_eq!(db.get("getUser").unwrap(), Some(Value::text("")));
    assert_eq!(db.get("getPool").unwrap(), Some(Value::Int(8)));
}

#[test]
fn test_flag_names() {
    let contract = Contract::builder("Alarm")
        .accessor(Accessor::new("isArmed", ValueType::scalar(ScalarKind::Bool)))
        .accessor(Accessor::new("isSilent", ValueType::optional(ScalarKind::Bool)))
        .accessor(Accessor::new("getterName", ValueType::Text))
        .build()
        .unwrap();
    let provider = MapDataProvider::new()
        .with("armed", "true")
        .with("isSilent", "TRUE")
        .with("getterName", "verbatim");
    let alarm = ConfigBinder::new(provider).bind(&contract);

    assert_eq!(alarm.get_as::<bool>("isArmed").unwrap(), Some(true));
    assert_eq!(alarm.get_as::<bool>("isSilent").unwrap(), Some(true));
    assert_eq!(alarm.get_as::<String>("getterName").unwrap(), Some("verbatim".to_string()));
}

#[test]
fn test_unknown_accessor_and_bad_arity() {
    let child = ConfigBinder::new(hierarchy_data()).bind(&hierarchy());

    assert!(matches!(child.get("getZ"), Err(BindError::UnknownAccessor { .. })));
    assert!(matches!(
        child.call("getA", &[Some(Value::text("x"))]),
        Err(BindError::ArgumentCount {
            expected: 0,
            actual: 1,
            ..
        })
    ));
}
