//! Error types for contracts and data providers

/// Contract declaration and lookup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    /// Same call name declared twice in one contract
    #[error("accessor '{name}' declared twice in contract {contract}")]
    DuplicateAccessor {
        /// Declaring contract
        contract: String,
        /// Call name
        name: String,
    },

    /// No accessor with this call name in the contract or its parents
    #[error("contract {contract} has no accessor '{name}'")]
    UnknownAccessor {
        /// Contract searched
        contract: String,
        /// Call name
        name: String,
    },
}

/// Errors building a data provider from a document
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Malformed JSON document
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML document
    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Document root is not a mapping
    #[error("document root must be a mapping, found {0}")]
    NotAMapping(&'static str),
}
