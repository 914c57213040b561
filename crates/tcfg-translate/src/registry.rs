//! Translator registry
//!
//! Provides [`TranslatorRegistry`], the injected set of plugin translators.
//! For each call the registry ranks the translators supporting the target
//! type and applies them in descending priority until one claims the call.

use std::cmp::Reverse;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use smallvec::SmallVec;
use tcfg_value::{Value, ValueType};

use crate::builtins::{DecimalTranslator, EnumSetTranslator, IpAddrTranslator, RegexTranslator, UuidTranslator};
use crate::context::TranslationContext;
use crate::translator::{Translated, ValueTranslator, PRIORITY_NOT_SUPPORTED};

static BUILTINS: Lazy<Vec<Arc<dyn ValueTranslator>>> = Lazy::new(|| {
    let translators: Vec<Arc<dyn ValueTranslator>> = vec![
        Arc::new(IpAddrTranslator),
        Arc::new(DecimalTranslator),
        Arc::new(UuidTranslator),
        Arc::new(RegexTranslator),
        Arc::new(EnumSetTranslator),
    ];
    translators
});

/// Shared instances of the built-in translators
#[must_use]
pub fn builtin_translators() -> &'static [Arc<dyn ValueTranslator>] {
    &BUILTINS
}

/// A translator ranked for one call
#[derive(Clone)]
pub struct Candidate {
    /// The translator
    pub translator: Arc<dyn ValueTranslator>,
    /// Its support priority for the call's target
    pub priority: i32,
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate")
            .field("translator", &self.translator.id())
            .field("priority", &self.priority)
            .finish()
    }
}

/// Candidate list; most targets have only a handful of supporting translators
pub type Candidates = SmallVec<[Candidate; 4]>;

/// Registry of plugin translators
#[derive(Default)]
pub struct TranslatorRegistry {
    translators: RwLock<Vec<Arc<dyn ValueTranslator>>>,
}

impl TranslatorRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create registry holding the built-in translators
    #[must_use]
    pub fn with_builtins() -> Self {
        Self {
            translators: RwLock::new(builtin_translators().to_vec()),
        }
    }

    /// With an additional translator
    #[must_use]
    pub fn with(self, translator: impl ValueTranslator + 'static) -> Self {
        self.register(Arc::new(translator));
        self
    }

    /// Register a translator; registration order breaks priority ties
    pub fn register(&self, translator: Arc<dyn ValueTranslator>) {
        self.translators.write().push(translator);
    }

    /// Remove all translators with the given id, returning how many were removed
    pub fn unregister(&self, id: &str) -> usize {
        let mut translators = self.translators.write();
        let before = translators.len();
        translators.retain(|t| t.id() != id);
        before - translators.len()
    }

    /// Number of registered translators
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.translators.read().len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.translators.read().is_empty()
    }

    /// Ids of registered translators, in registration order
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.translators.read().iter().map(|t| t.id().to_string()).collect()
    }

    /// Translators supporting `target`, highest priority first
    ///
    /// Scoring errors drop the translator from the list.
    #[must_use]
    pub fn candidates(&self, target: &ValueType, ctx: &TranslationContext<'_>) -> Candidates {
        // Snapshot so no lock is held while translators run
        let translators: SmallVec<[Arc<dyn ValueTranslator>; 8]> =
            self.translators.read().iter().cloned().collect();

        let mut candidates: Candidates = translators
            .into_iter()
            .filter_map(|translator| match translator.support_priority(target, ctx) {
                Ok(priority) if priority > PRIORITY_NOT_SUPPORTED => Some(Candidate { translator, priority }),
                Ok(_) => None,
                Err(err) => {
                    tracing::debug!(translator = translator.id(), %target, error = %err, "translator scoring failed");
                    None
                }
            })
            .collect();
        candidates.sort_by_key(|c| Reverse(c.priority));
        candidates
    }

    /// Apply supporting translators until one claims the call
    ///
    /// Returns [`Translated::NotApplicable`] when no candidate claimed it.
    #[must_use]
    pub fn translate(&self, source: Option<&Value>, target: &ValueType, ctx: &TranslationContext<'_>) -> Translated {
        for candidate in self.candidates(target, ctx) {
            match candidate.translator.translate(source, target, ctx) {
                Ok(Translated::NotApplicable) => {}
                Ok(claimed) => {
                    tracing::trace!(
                        translator = candidate.translator.id(),
                        priority = candidate.priority,
                        "translator claimed call"
                    );
                    return claimed;
                }
                Err(err) => {
                    tracing::debug!(
                        translator = candidate.translator.id(),
                        %target,
                        error = %err,
                        "translator failed, trying next candidate"
                    );
                }
            }
        }
        Translated::NotApplicable
    }
}

impl std::fmt::Debug for TranslatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorRegistry")
            .field("translators", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslateError;
    use proptest::prelude::*;
    use tcfg_contract::{Accessor, AccessorDescriptor, Contract};

    struct Fixed {
        id: &'static str,
        priority: Result<i32, TranslateError>,
        result: Result<Translated, TranslateError>,
    }

    impl Fixed {
        fn new(id: &'static str, priority: i32, result: Translated) -> Self {
            Self {
                id,
                priority: Ok(priority),
                result: Ok(result),
            }
        }
    }

    impl ValueTranslator for Fixed {
        fn id(&self) -> &str {
            self.id
        }

        fn support_priority(&self, _: &ValueType, _: &TranslationContext<'_>) -> Result<i32, TranslateError> {
            self.priority.clone()
        }

        fn translate(
            &self,
            _: Option<&Value>,
            _: &ValueType,
            _: &TranslationContext<'_>,
        ) -> Result<Translated, TranslateError> {
            self.result.clone()
        }
    }

    fn accessor() -> Arc<AccessorDescriptor> {
        let contract = Contract::builder("Plugins")
            .accessor(Accessor::new("getThing", ValueType::object::<String>()))
            .build()
            .unwrap();
        contract.find("getThing").unwrap()
    }

    fn run(registry: &TranslatorRegistry) -> Translated {
        let accessor = accessor();
        let ctx = TranslationContext::new(&accessor, None, false);
        registry.translate(Some(&Value::text("x")), accessor.result_type(), &ctx)
    }

    #[test]
    fn highest_priority_wins() {
        let registry = TranslatorRegistry::new()
            .with(Fixed::new("low", 5, Translated::Value(Value::text("low"))))
            .with(Fixed::new("high", 20, Translated::Value(Value::text("high"))));
        assert_eq!(run(&registry), Translated::Value(Value::text("high")));
    }

    #[test]
    fn not_applicable_falls_through() {
        let registry = TranslatorRegistry::new()
            .with(Fixed::new("high", 20, Translated::NotApplicable))
            .with(Fixed::new("low", 5, Translated::Value(Value::text("low"))));
        assert_eq!(run(&registry), Translated::Value(Value::text("low")));
    }

    #[test]
    fn explicit_null_claims_the_call() {
        let registry = TranslatorRegistry::new()
            .with(Fixed::new("high", 20, Translated::ExplicitNull))
            .with(Fixed::new("low", 5, Translated::Value(Value::text("low"))));
        assert_eq!(run(&registry), Translated::ExplicitNull);
    }

    #[test]
    fn unsupported_and_failing_translators_are_skipped() {
        let registry = TranslatorRegistry::new()
            .with(Fixed::new("unsupported", PRIORITY_NOT_SUPPORTED, Translated::Value(Value::text("no"))))
            .with(Fixed {
                id: "bad-score",
                priority: Err(TranslateError::invalid("String", "boom")),
                result: Ok(Translated::Value(Value::text("no"))),
            })
            .with(Fixed {
                id: "bad-run",
                priority: Ok(50),
                result: Err(TranslateError::invalid("String", "boom")),
            })
            .with(Fixed::new("good", 1, Translated::Value(Value::text("yes"))));

        let accessor = accessor();
        let ctx = TranslationContext::new(&accessor, None, true);
        let ids: Vec<_> = registry
            .candidates(accessor.result_type(), &ctx)
            .iter()
            .map(|c| c.translator.id().to_string())
            .collect();
        assert_eq!(ids, vec!["bad-run", "good"]);
        assert_eq!(run(&registry), Translated::Value(Value::text("yes")));
    }

    #[test]
    fn ties_keep_registration_order() {
        let registry = TranslatorRegistry::new()
            .with(Fixed::new("first", 10, Translated::Value(Value::text("first"))))
            .with(Fixed::new("second", 10, Translated::Value(Value::text("second"))));
        assert_eq!(run(&registry), Translated::Value(Value::text("first")));
    }

    #[test]
    fn empty_registry_is_not_applicable() {
        assert_eq!(run(&TranslatorRegistry::new()), Translated::NotApplicable);
    }

    #[test]
    fn unregister_by_id() {
        let registry = TranslatorRegistry::with_builtins();
        let before = registry.len();
        assert_eq!(registry.unregister("uuid"), 1);
        assert_eq!(registry.len(), before - 1);
        assert!(!registry.ids().contains(&"uuid".to_string()));
    }

    proptest! {
        #[test]
        fn candidates_are_ranked_by_descending_priority(priorities in proptest::collection::vec(-5i32..50, 0..8)) {
            let registry = priorities.iter().fold(TranslatorRegistry::new(), |registry, &priority| {
                registry.with(Fixed::new("ranked", priority, Translated::ExplicitNull))
            });
            let accessor = accessor();
            let ctx = TranslationContext::new(&accessor, None, false);

            let ranked: Vec<i32> = registry
                .candidates(accessor.result_type(), &ctx)
                .iter()
                .map(|c| c.priority)
                .collect();
            let mut expected: Vec<i32> = priorities.into_iter().filter(|&p| p > PRIORITY_NOT_SUPPORTED).collect();
            expected.sort_by_key(|&p| Reverse(p));
            prop_assert_eq!(ranked, expected);
        }
    }
}
