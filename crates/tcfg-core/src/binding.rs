//! Bound contract objects
//!
//! [`ConfigBinder`] assembles a provider, a translator registry and an
//! [`EngineConfig`]; [`ConfigBinder::bind`] turns a contract into a
//! [`ConfigObject`] whose calls are dispatched by accessor name.

use std::any::{type_name, Any};
use std::sync::Arc;

use tcfg_contract::{AccessorDescriptor, Contract, DataProvider};
use tcfg_translate::TranslatorRegistry;
use tcfg_value::{ConfigEnum, FromValue, Value};

use crate::config::EngineConfig;
use crate::engine::TranslationEngine;
use crate::error::{BindError, BindResult};

/// Builder for bound contract objects
#[derive(Clone)]
pub struct ConfigBinder {
    provider: Arc<dyn DataProvider>,
    registry: Arc<TranslatorRegistry>,
    config: EngineConfig,
}

impl ConfigBinder {
    /// Binder over `provider` with the built-in translators
    #[must_use]
    pub fn new(provider: impl DataProvider + 'static) -> Self {
        Self::from_shared(Arc::new(provider))
    }

    /// Binder over a shared provider with the built-in translators
    #[must_use]
    pub fn from_shared(provider: Arc<dyn DataProvider>) -> Self {
        Self {
            provider,
            registry: Arc::new(TranslatorRegistry::with_builtins()),
            config: EngineConfig::default(),
        }
    }

    /// With translator registry
    #[inline]
    #[must_use]
    pub fn with_registry(self, registry: TranslatorRegistry) -> Self {
        self.with_shared_registry(Arc::new(registry))
    }

    /// With shared translator registry
    #[inline]
    #[must_use]
    pub fn with_shared_registry(mut self, registry: Arc<TranslatorRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// With engine configuration
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// With strict mode
    #[inline]
    #[must_use]
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.config.strict_mode = strict;
        self
    }

    /// Bind `contract`; each bound object has its own phase memory and cache
    #[must_use]
    pub fn bind(&self, contract: &Arc<Contract>) -> ConfigObject {
        tracing::debug!("Binding contract {}", contract.name());
        let engine = TranslationEngine::new(
            Arc::clone(&self.provider),
            Arc::clone(&self.registry),
            self.config.clone(),
        );
        ConfigObject {
            contract: Arc::clone(contract),
            engine: Arc::new(engine),
        }
    }
}

impl std::fmt::Debug for ConfigBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigBinder")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A contract bound to a data provider
#[derive(Debug, Clone)]
pub struct ConfigObject {
    contract: Arc<Contract>,
    engine: Arc<TranslationEngine>,
}

impl ConfigObject {
    /// Bound contract
    #[inline]
    #[must_use]
    pub fn contract(&self) -> &Arc<Contract> {
        &self.contract
    }

    /// Underlying engine
    #[inline]
    #[must_use]
    pub fn engine(&self) -> &TranslationEngine {
        &self.engine
    }

    /// Effective declaration of `name`
    ///
    /// # Errors
    /// `BindError::UnknownAccessor` if the contract has no such accessor
    pub fn accessor(&self, name: &str) -> BindResult<&Arc<AccessorDescriptor>> {
        self.contract
            .accessor(name)
            .ok_or_else(|| BindError::UnknownAccessor {
                contract: self.contract.name().to_string(),
                name: name.to_string(),
            })
    }

    /// Call accessor `name` with positional arguments
    ///
    /// # Errors
    /// - `BindError::UnknownAccessor` / `BindError::ArgumentCount` for bad calls
    /// - `BindError::Conversion` for conversion failures in strict mode
    pub fn call(&self, name: &str, args: &[Option<Value>]) -> BindResult<Option<Value>> {
        let accessor = self.accessor(name)?;
        if args.len() != accessor.args().len() {
            return Err(BindError::ArgumentCount {
                name: name.to_string(),
                expected: accessor.args().len(),
                actual: args.len(),
            });
        }
        Ok(self.engine.invoke(accessor, Some(args))?)
    }

    /// Call argument-less accessor `name`
    ///
    /// # Errors
    /// See [`ConfigObject::call`]
    #[inline]
    pub fn get(&self, name: &str) -> BindResult<Option<Value>> {
        self.call(name, &[])
    }

    /// Call argument-less accessor `name` and extract a Rust value
    ///
    /// # Errors
    /// `BindError::UnexpectedType` if the result has another representation;
    /// see also [`ConfigObject::call`]
    pub fn get_as<T: FromValue>(&self, name: &str) -> BindResult<Option<T>> {
        self.get(name)?
            .map(|value| T::from_value(&value).ok_or_else(|| unexpected::<T>(name, &value)))
            .transpose()
    }

    /// Call argument-less enum accessor `name`
    ///
    /// # Errors
    /// `BindError::UnexpectedType` if the result is not a constant of `E`;
    /// see also [`ConfigObject::call`]
    pub fn get_enum<E: ConfigEnum>(&self, name: &str) -> BindResult<Option<E>> {
        self.get(name)?
            .map(|value| {
                value
                    .as_enum()
                    .and_then(E::from_constant)
                    .ok_or_else(|| unexpected::<E>(name, &value))
            })
            .transpose()
    }

    /// Call argument-less object accessor `name`
    ///
    /// # Errors
    /// `BindError::UnexpectedType` if the result is not a `T`;
    /// see also [`ConfigObject::call`]
    pub fn get_object<T: Any + Send + Sync>(&self, name: &str) -> BindResult<Option<Arc<T>>> {
        self.get(name)?
            .map(|value| {
                value
                    .as_object()
                    .and_then(|object| object.downcast::<T>())
                    .ok_or_else(|| unexpected::<T>(name, &value))
            })
            .transpose()
    }
}

fn unexpected<T>(name: &str, value: &Value) -> BindError {
    BindError::UnexpectedType {
        name: name.to_string(),
        expected: type_name::<T>(),
        found: value.type_name(),
    }
}
