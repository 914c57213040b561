//! tcfg Translation Plugins
//!
//! Ranked plugin conversion and the constructor fallback used by the
//! translation pipeline for targets the standard rules do not cover.
//!
//! # Overview
//!
//! - **ValueTranslator**: plugin capability (`support_priority` + `translate`)
//! - **TranslatorRegistry**: injected translator set, ranked per call
//! - **construct**: last-resort conversion through registered constructors
//! - **builtins**: IP addresses, decimals, UUIDs, regexes, enum sets
//!
//! # Example
//!
//! ```rust
//! use std::net::Ipv4Addr;
//! use tcfg_contract::{Accessor, Contract};
//! use tcfg_translate::{Translated, TranslationContext, TranslatorRegistry};
//! use tcfg_value::{Value, ValueType};
//!
//! let contract = Contract::builder("Net")
//!     .accessor(Accessor::new("getGateway", ValueType::object::<Ipv4Addr>()))
//!     .build()
//!     .unwrap();
//! let gateway = contract.find("getGateway").unwrap();
//!
//! let registry = TranslatorRegistry::with_builtins();
//! let ctx = TranslationContext::new(&gateway, None, false);
//! let result = registry.translate(Some(&Value::text("10.0.0.1")), gateway.result_type(), &ctx);
//! assert!(matches!(result, Translated::Value(_)));
//! ```

#![warn(missing_docs)]

pub mod builtins;
pub mod construct;
pub mod context;
pub mod error;
pub mod registry;
pub mod translator;

// Re-exports
pub use builtins::{DecimalTranslator, EnumSetTranslator, IpAddrTranslator, RegexTranslator, UuidTranslator};
pub use construct::construct;
pub use context::TranslationContext;
pub use error::TranslateError;
pub use registry::{builtin_translators, Candidate, Candidates, TranslatorRegistry};
pub use translator::{Translated, ValueTranslator, PRIORITY_NORMAL, PRIORITY_NOT_SUPPORTED};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
