//! tcfg Contracts
//!
//! Declarative accessor contracts and the data sources they are bound to.
//!
//! # Overview
//!
//! - **Contract**: named accessor set with a key prefix directive and parents
//! - **AccessorDescriptor**: immutable declaration with a stable [`AccessorId`]
//! - **resolve_key**: explicit name, aliases and getter-style derivation
//! - **DataProvider**: string-keyed raw value source (map, layered, JSON/YAML)
//!
//! # Example
//!
//! ```rust
//! use tcfg_contract::{resolve_key, Accessor, Contract, MapDataProvider};
//! use tcfg_value::{ScalarKind, ValueType};
//!
//! let server = Contract::builder("Server")
//!     .prefix("server")
//!     .accessor(Accessor::new("getPort", ValueType::scalar(ScalarKind::Int)))
//!     .build()
//!     .unwrap();
//!
//! let provider = MapDataProvider::new().with("server.port", "8080");
//! let port = server.find("getPort").unwrap();
//! assert_eq!(resolve_key(&port, &provider), "server.port");
//! ```

#![warn(missing_docs)]

pub mod contract;
pub mod error;
pub mod naming;
pub mod provider;

// Re-exports
pub use contract::{
    Accessor, AccessorDescriptor, AccessorId, Contract, ContractBuilder, EntryDirective,
    PrefixDirective, KEY_SEPARATOR, TYPE_NAME_PLACEHOLDER,
};
pub use error::{ContractError, ProviderError};
pub use naming::{derive_local_name, resolve_key};
pub use provider::{DataProvider, JsonDataProvider, LayeredDataProvider, MapDataProvider};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
