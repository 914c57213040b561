//! Translation engine
//!
//! Resolves one accessor call end to end:
//! 1. argument-less calls consult the sticky `None` marker and the result cache
//! 2. the lookup key is resolved and the raw value fetched (the default
//!    literal stands in only for a missing key)
//! 3. phases run in order from the remembered phase until one claims the call
//! 4. the claiming phase is remembered; argument-less results are cached
//!
//! No lock is held while providers, translators or constructors run.
//! Concurrent first calls may both run the full pipeline; they produce the
//! same result, so the duplicated writes are harmless.

use std::sync::Arc;

use tcfg_contract::{resolve_key, AccessorDescriptor, DataProvider};
use tcfg_translate::{construct, Translated, TranslationContext, TranslatorRegistry};
use tcfg_value::{format_indexed, translate_enum, translate_scalar, ConversionError, Value, ValueType};

use crate::cache::{CacheStats, CachedResult, ResultCache};
use crate::config::EngineConfig;
use crate::phase::{PhaseMemory, TranslationPhase};

/// Phase-indexed translation pipeline with per-accessor memory and caching
pub struct TranslationEngine {
    provider: Arc<dyn DataProvider>,
    registry: Arc<TranslatorRegistry>,
    config: EngineConfig,
    phases: PhaseMemory,
    cache: ResultCache,
}

impl TranslationEngine {
    /// Create engine over a provider and translator registry
    #[must_use]
    pub fn new(provider: Arc<dyn DataProvider>, registry: Arc<TranslatorRegistry>, config: EngineConfig) -> Self {
        let cache = ResultCache::from_config(&config);
        Self {
            provider,
            registry,
            config,
            phases: PhaseMemory::new(),
            cache,
        }
    }

    /// Engine configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Phase memory, for inspection
    #[inline]
    #[must_use]
    pub fn phases(&self) -> &PhaseMemory {
        &self.phases
    }

    /// Result cache, for inspection and forced eviction
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Result cache statistics
    #[inline]
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Resolve a call of `accessor`
    ///
    /// An empty argument slice is the same as no arguments.
    ///
    /// # Errors
    /// `ConversionError` from the text, enum and scalar rules in strict mode
    pub fn invoke(
        &self,
        accessor: &AccessorDescriptor,
        args: Option<&[Option<Value>]>,
    ) -> Result<Option<Value>, ConversionError> {
        let args = args.filter(|a| !a.is_empty());
        let id = accessor.id();

        if args.is_none() {
            if self.phases.is_none(id) {
                tracing::trace!("{}: no phase ever succeeded, skipping lookup", accessor.name());
                return Ok(None);
            }
            if let Some(cached) = self.cache.get(id) {
                tracing::trace!("{}: cache hit", accessor.name());
                return Ok(cached.into_option());
            }
        }

        let key = resolve_key(accessor, &*self.provider);
        // A present key with a null value is a null source, not a missing one
        let raw = if self.provider.contains_key(&key) {
            self.provider.get_raw(&key)
        } else {
            accessor.default_value().map(Value::text)
        };

        let result = self.translate(accessor, raw.as_ref(), args)?;

        if args.is_none() {
            self.cache.insert(id, CachedResult::from(result.clone()));
        }
        Ok(result)
    }

    /// Convert `source` to the accessor's result type
    ///
    /// # Errors
    /// `ConversionError` from the text, enum and scalar rules in strict mode
    pub fn translate(
        &self,
        accessor: &AccessorDescriptor,
        source: Option<&Value>,
        args: Option<&[Option<Value>]>,
    ) -> Result<Option<Value>, ConversionError> {
        let args = args.filter(|a| !a.is_empty());
        let id = accessor.id();
        let target = accessor.result_type();
        let ctx = TranslationContext::new(accessor, args, self.config.strict_mode);
        let start = self.phases.get(id).unwrap_or(TranslationPhase::ParseText);

        for &phase in start.remaining() {
            let outcome = match phase {
                TranslationPhase::ParseText => Self::parse_text(target, source, args),
                TranslationPhase::ParseEnum => self.parse_enum(target, source)?,
                TranslationPhase::ParseScalar => self.parse_scalar(target, source)?,
                TranslationPhase::ApplyPlugin => self.registry.translate(source, target, &ctx),
                TranslationPhase::ConstructInstance => {
                    construct(source, target, &ctx).map_or(Translated::NotApplicable, Translated::Value)
                }
                TranslationPhase::None => Translated::NotApplicable,
            };
            if let Some(result) = outcome.into_claimed() {
                self.phases.record(id, phase);
                tracing::debug!("{}: resolved by {:?}", accessor.name(), phase);
                return Ok(result);
            }
        }

        if args.is_none() && self.phases.mark_none_if_absent(id) {
            tracing::debug!("{}: no phase produced a value, remembering failure", accessor.name());
        }
        Ok(None)
    }

    fn parse_text(target: &ValueType, source: Option<&Value>, args: Option<&[Option<Value>]>) -> Translated {
        if !target.is_text() {
            return Translated::NotApplicable;
        }
        let text = match (source, args) {
            (None, _) => String::new(),
            (Some(Value::Text(template)), Some(args)) => format_indexed(template, args).unwrap_or_else(|err| {
                tracing::trace!("formatting '{}' failed: {}", template, err);
                template.clone()
            }),
            (Some(Value::Text(text)), None) => text.clone(),
            (Some(other), _) => other.to_string(),
        };
        Translated::Value(Value::Text(text))
    }

    fn parse_enum(&self, target: &ValueType, source: Option<&Value>) -> Result<Translated, ConversionError> {
        let Some(enum_type) = target.as_enum() else {
            return Ok(Translated::NotApplicable);
        };
        translate_enum(source, enum_type, self.config.strict_mode).map(Translated::from)
    }

    fn parse_scalar(&self, target: &ValueType, source: Option<&Value>) -> Result<Translated, ConversionError> {
        let Some(scalar) = target.as_scalar() else {
            return Ok(Translated::NotApplicable);
        };
        translate_scalar(source, scalar, self.config.strict_mode).map(Translated::from)
    }
}

impl std::fmt::Debug for TranslationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationEngine")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("phases", &self.phases.len())
            .finish_non_exhaustive()
    }
}
