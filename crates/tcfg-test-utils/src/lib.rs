//! Testing utilities for tcfg workspace
//!
//! Shared providers, contracts, enums and translators for tests.

#![allow(missing_docs)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;
use tcfg_contract::{Accessor, Contract, DataProvider, MapDataProvider};
use tcfg_translate::{Translated, TranslateError, TranslationContext, ValueTranslator};
use tcfg_value::{ConfigEnum, EnumConstant, EnumType, Value, ValueType};
use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber once; `RUST_LOG` selects the level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Provider wrapper counting key checks
#[derive(Debug, Default)]
pub struct CountingProvider {
    inner: MapDataProvider,
    lookups: AtomicUsize,
}

impl CountingProvider {
    pub fn new(inner: MapDataProvider) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    /// Number of key checks (`contains_key` calls) so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn insert(&self, key: &str, value: impl Into<Value>) {
        self.inner.insert(key, value);
    }
}

impl DataProvider for CountingProvider {
    fn contains_key(&self, key: &str) -> bool {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.contains_key(key)
    }

    fn get_raw(&self, key: &str) -> Option<Value> {
        self.inner.get_raw(key)
    }
}

static STATUS: Lazy<Arc<EnumType>> = Lazy::new(|| EnumType::new("Status", ["IDLE", "BUSY", "ERROR"]));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Busy,
    Error,
}

impl ConfigEnum for Status {
    fn enum_type() -> Arc<EnumType> {
        Arc::clone(&STATUS)
    }

    fn from_constant(constant: &EnumConstant) -> Option<Self> {
        if !constant.belongs_to(&STATUS) {
            return None;
        }
        match constant.ordinal() {
            0 => Some(Self::Idle),
            1 => Some(Self::Busy),
            2 => Some(Self::Error),
            _ => None,
        }
    }
}

/// Marker result type answered only by [`ScriptedTranslator`]s
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagged(pub String);

/// Translator for [`Tagged`] answering per accessor name
///
/// Accessors without a scripted answer get `NotApplicable`.
pub struct ScriptedTranslator {
    id: String,
    priority: i32,
    answers: HashMap<String, Option<String>>,
    calls: AtomicUsize,
}

impl ScriptedTranslator {
    pub fn new(id: &str, priority: i32) -> Self {
        Self {
            id: id.to_string(),
            priority,
            answers: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer `accessor` with a tagged value
    pub fn answer(mut self, accessor: &str, tag: &str) -> Self {
        self.answers.insert(accessor.to_string(), Some(tag.to_string()));
        self
    }

    /// Answer `accessor` with an explicit null
    pub fn answer_null(mut self, accessor: &str) -> Self {
        self.answers.insert(accessor.to_string(), None);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ValueTranslator for ScriptedTranslator {
    fn id(&self) -> &str {
        &self.id
    }

    fn support_priority(&self, target: &ValueType, _: &TranslationContext<'_>) -> Result<i32, TranslateError> {
        Ok(if target.is_object::<Tagged>() { self.priority } else { 0 })
    }

    fn translate(
        &self,
        _source: Option<&Value>,
        _target: &ValueType,
        ctx: &TranslationContext<'_>,
    ) -> Result<Translated, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match self.answers.get(ctx.accessor().name()) {
            Some(Some(tag)) => Translated::Value(Value::object(Tagged(format!("{}:{tag}", self.id)))),
            Some(None) => Translated::ExplicitNull,
            None => Translated::NotApplicable,
        })
    }
}

/// Translator whose scoring always fails
pub struct FailingTranslator;

impl ValueTranslator for FailingTranslator {
    fn id(&self) -> &str {
        "failing"
    }

    fn support_priority(&self, target: &ValueType, _: &TranslationContext<'_>) -> Result<i32, TranslateError> {
        Err(TranslateError::invalid(target.to_string(), "scoring is broken"))
    }

    fn translate(
        &self,
        _: Option<&Value>,
        target: &ValueType,
        _: &TranslationContext<'_>,
    ) -> Result<Translated, TranslateError> {
        Err(TranslateError::invalid(target.to_string(), "translation is broken"))
    }
}

fn text(name: &str) -> Accessor {
    Accessor::new(name, ValueType::Text)
}

/// Four-level hierarchy exercising prefix inheritance
///
/// - `Parent` (prefix `test1`): getA, getB, getC, getD
/// - `Middle` (no prefix): overrides getB, adds getE
/// - `Middle2` (prefix from type name): overrides getC, adds getF
/// - `Child` (prefix `test2`): overrides getD, adds getG
pub fn hierarchy() -> Arc<Contract> {
    let parent = Contract::builder("Parent")
        .prefix("test1")
        .accessor(text("getA"))
        .accessor(text("getB"))
        .accessor(text("getC"))
        .accessor(text("getD"))
        .build()
        .unwrap();
    let middle = Contract::builder("Middle")
        .extends(&parent)
        .accessor(text("getB"))
        .accessor(text("getE"))
        .build()
        .unwrap();
    let middle2 = Contract::builder("Middle2")
        .prefix("*")
        .extends(&middle)
        .accessor(text("getC"))
        .accessor(text("getF"))
        .build()
        .unwrap();
    Contract::builder("Child")
        .prefix("test2")
        .extends(&middle2)
        .accessor(text("getD"))
        .accessor(text("getG"))
        .build()
        .unwrap()
}

/// Data for [`hierarchy`]; keys of overridden declarations hold decoys
pub fn hierarchy_data() -> MapDataProvider {
    MapDataProvider::new()
        .with("test1.a", "K")
        .with("test1.b", "decoy")
        .with("test1.c", "decoy")
        .with("test1.d", "decoy")
        .with("b", "L")
        .with("e", "L")
        .with("Middle2.c", "M")
        .with("Middle2.d", "decoy")
        .with("Middle2.f", "M")
        .with("test2.d", "N")
        .with("test2.g", "N")
}
