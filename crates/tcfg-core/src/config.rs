//! Engine configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BindError, BindResult};

/// Configuration of a bound contract's translation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Raise conversion failures instead of degrading to defaults
    pub strict_mode: bool,
    /// Maximum number of cached argument-less results
    pub cache_capacity: u64,
    /// Time after which a cached result is recomputed
    pub cache_ttl_secs: Option<u64>,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With strict mode
    #[inline]
    #[must_use]
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    /// With result cache capacity
    #[inline]
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// With result cache time-to-live
    #[inline]
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl_secs = Some(ttl.as_secs());
        self
    }

    /// Result cache time-to-live, if any
    #[inline]
    #[must_use]
    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }

    /// Parse from JSON; missing fields take their defaults
    ///
    /// # Errors
    /// `BindError::Config` if the document is not a valid configuration
    pub fn from_json_str(json: &str) -> BindResult<Self> {
        serde_json::from_str(json).map_err(|e| BindError::Config(e.to_string()))
    }

    /// Parse from YAML; missing fields take their defaults
    ///
    /// # Errors
    /// `BindError::Config` if the document is not a valid configuration
    pub fn from_yaml_str(yaml: &str) -> BindResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| BindError::Config(e.to_string()))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            cache_capacity: 10_000,
            cache_ttl_secs: None,
        }
    }
}
