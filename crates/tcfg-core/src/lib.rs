//! tcfg Core
//!
//! Binds typed accessor contracts to untyped, string-keyed configuration
//! data through a phase-indexed translation pipeline.
//!
//! # Architecture
//!
//! ```text
//! ConfigObject::call(name, args)
//!     ├─> PhaseMemory / ResultCache    (argument-less calls)
//!     ├─> resolve_key + DataProvider   (raw value or declared default)
//!     └─> TranslationEngine phases
//!           ParseText → ParseEnum → ParseScalar → ApplyPlugin → ConstructInstance
//! ```
//!
//! # Example
//!
//! ```rust
//! use tcfg_contract::{Accessor, Contract, MapDataProvider};
//! use tcfg_core::ConfigBinder;
//! use tcfg_value::{ScalarKind, Value, ValueType};
//!
//! let contract = Contract::builder("Server")
//!     .prefix("server")
//!     .accessor(Accessor::new("getPort", ValueType::scalar(ScalarKind::Int)))
//!     .accessor(Accessor::new("getBanner", ValueType::Text).arg(ValueType::Text))
//!     .build()
//!     .unwrap();
//!
//! let provider = MapDataProvider::new()
//!     .with("server.port", "8080")
//!     .with("server.banner", "Welcome, {0}");
//!
//! let server = ConfigBinder::new(provider).bind(&contract);
//! assert_eq!(server.get_as::<i32>("getPort").unwrap(), Some(8080));
//! assert_eq!(
//!     server.call("getBanner", &[Some(Value::text("ops"))]).unwrap(),
//!     Some(Value::text("Welcome, ops"))
//! );
//! ```

#![warn(missing_docs)]

pub mod binding;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod phase;

// Re-exports
pub use binding::{ConfigBinder, ConfigObject};
pub use cache::{CacheStats, CachedResult, ResultCache};
pub use config::EngineConfig;
pub use engine::TranslationEngine;
pub use error::{BindError, BindResult};
pub use lookup::ResourceAccessor;
pub use phase::{PhaseMemory, TranslationPhase};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for binding contracts
    pub use crate::{BindError, BindResult, ConfigBinder, ConfigObject, EngineConfig, ResourceAccessor};
    pub use tcfg_contract::{Accessor, Contract, DataProvider, JsonDataProvider, LayeredDataProvider, MapDataProvider};
    pub use tcfg_translate::{Translated, TranslationContext, TranslatorRegistry, ValueTranslator};
    pub use tcfg_value::{ConfigEnum, EnumType, ScalarKind, Value, ValueType};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
