//! Plugin translator ordering through bound contracts

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tcfg_contract::{Accessor, Contract, MapDataProvider};
use tcfg_core::{ConfigBinder, TranslationPhase};
use tcfg_test_utils::{init_tracing, FailingTranslator, ScriptedTranslator, Tagged};
use tcfg_translate::TranslatorRegistry;
use tcfg_value::ValueType;

fn results() -> Arc<Contract> {
    Contract::builder("Results")
        .accessor(Accessor::new("getResultA", ValueType::object::<Tagged>()))
        .accessor(Accessor::new("getResultB", ValueType::object::<Tagged>()))
        .accessor(Accessor::new("getResultC", ValueType::object::<Tagged>()))
        .build()
        .unwrap()
}

fn tag(value: Option<Arc<Tagged>>) -> Option<String> {
    value.map(|t| t.0.clone())
}

#[test]
fn test_priority_order_and_fall_through() {
    init_tracing();
    let registry = TranslatorRegistry::new()
        .with(ScriptedTranslator::new("low", 5).answer("getResultA", "a").answer("getResultB", "b"))
        .with(ScriptedTranslator::new("high", 20).answer("getResultA", "a"))
        .with(ScriptedTranslator::new("medium", 10).answer_null("getResultC"));
    let bound = ConfigBinder::new(MapDataProvider::new().with("resultA", "x").with("resultB", "y"))
        .with_registry(registry)
        .bind(&results());

    assert_eq!(tag(bound.get_object::<Tagged>("getResultA").unwrap()), Some("high:a".into()));
    // high and medium decline B, low answers it
    assert_eq!(tag(bound.get_object::<Tagged>("getResultB").unwrap()), Some("low:b".into()));
    // medium claims C with an explicit null; low is never asked
    assert_eq!(bound.get_object::<Tagged>("getResultC").unwrap(), None);

    let phases = bound.engine().phases();
    for name in ["getResultA", "getResultB", "getResultC"] {
        let id = bound.accessor(name).unwrap().id();
        assert_eq!(phases.get(id), Some(TranslationPhase::ApplyPlugin), "{name}");
    }
}

#[test]
fn test_failing_translators_are_skipped() {
    let registry = TranslatorRegistry::new()
        .with(FailingTranslator)
        .with(ScriptedTranslator::new("fallback", 1).answer("getResultA", "a"));
    let bound = ConfigBinder::new(MapDataProvider::new())
        .with_registry(registry)
        .with_strict_mode(true)
        .bind(&results());

    assert_eq!(tag(bound.get_object::<Tagged>("getResultA").unwrap()), Some("fallback:a".into()));
}

#[test]
fn test_unclaimed_plugin_target_falls_to_none() {
    let bound = ConfigBinder::new(MapDataProvider::new().with("resultA", "x"))
        .with_registry(TranslatorRegistry::new().with(ScriptedTranslator::new("only-b", 10).answer("getResultB", "b")))
        .bind(&results());

    assert_eq!(bound.get_object::<Tagged>("getResultA").unwrap(), None);
    let id = bound.accessor("getResultA").unwrap().id();
    assert!(bound.engine().phases().is_none(id));
}

#[test]
fn test_shared_registry_serves_several_bindings() {
    let scripted = Arc::new(ScriptedTranslator::new("shared", 10).answer("getResultA", "a"));
    let registry = Arc::new(TranslatorRegistry::new());
    registry.register(Arc::clone(&scripted) as _);

    let binder = ConfigBinder::new(MapDataProvider::new()).with_shared_registry(Arc::clone(&registry));
    let first = binder.bind(&results());
    let second = binder.bind(&results());

    assert!(first.get_object::<Tagged>("getResultA").unwrap().is_some());
    assert!(second.get_object::<Tagged>("getResultA").unwrap().is_some());
    // Each binding caches independently
    assert_eq!(scripted.calls(), 2);
    first.get("getResultA").unwrap();
    assert_eq!(scripted.calls(), 2);
}
