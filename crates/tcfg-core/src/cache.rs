//! Result cache for argument-less accessor calls
//!
//! Bounded, optionally expiring cache using moka. Eviction is invisible to
//! correctness: a missing entry is recomputed by the engine.

use std::time::Duration;

use moka::sync::Cache;
use tcfg_contract::AccessorId;
use tcfg_value::Value;

use crate::config::EngineConfig;

/// Cached outcome of an accessor
#[derive(Debug, Clone, PartialEq)]
pub enum CachedResult {
    /// Resolved value
    Present(Value),
    /// Resolved to no value
    Null,
}

impl CachedResult {
    /// Stored result as an option
    #[inline]
    #[must_use]
    pub fn into_option(self) -> Option<Value> {
        match self {
            Self::Present(value) => Some(value),
            Self::Null => None,
        }
    }
}

impl From<Option<Value>> for CachedResult {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::Null, Self::Present)
    }
}

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
}

/// Per-accessor result cache
#[derive(Debug, Clone)]
pub struct ResultCache {
    inner: Cache<AccessorId, CachedResult>,
}

impl ResultCache {
    /// Create cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Create cache with time-based expiration
    #[inline]
    #[must_use]
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Create cache sized by engine configuration
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        match config.cache_ttl() {
            Some(ttl) => Self::with_ttl(config.cache_capacity, ttl),
            None => Self::new(config.cache_capacity),
        }
    }

    /// Cached result, `None` when never cached or evicted
    #[inline]
    #[must_use]
    pub fn get(&self, id: AccessorId) -> Option<CachedResult> {
        self.inner.get(&id)
    }

    /// Store a result
    #[inline]
    pub fn insert(&self, id: AccessorId, result: CachedResult) {
        self.inner.insert(id, result);
    }

    /// Evict one entry
    #[inline]
    pub fn invalidate(&self, id: AccessorId) {
        self.inner.invalidate(&id);
    }

    /// Evict all entries
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get cache statistics
    ///
    /// Counts are approximate until pending maintenance has run.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks();
        CacheStats {
            entry_count: self.inner.entry_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_values_and_nulls() {
        let cache = ResultCache::new(16);
        let present = AccessorId::new();
        let null = AccessorId::new();
        cache.insert(present, CachedResult::from(Some(Value::Int(3))));
        cache.insert(null, CachedResult::from(None));

        assert_eq!(cache.get(present), Some(CachedResult::Present(Value::Int(3))));
        assert_eq!(cache.get(null), Some(CachedResult::Null));
        assert_eq!(cache.get(AccessorId::new()), None);
        assert_eq!(cache.stats().entry_count, 2);
    }

    #[test]
    fn invalidation_is_a_miss() {
        let cache = ResultCache::from_config(&EngineConfig::default());
        let id = AccessorId::new();
        cache.insert(id, CachedResult::Null);
        cache.invalidate(id);
        assert_eq!(cache.get(id), None);

        cache.insert(id, CachedResult::Null);
        cache.invalidate_all();
        assert_eq!(cache.get(id), None);
    }

    #[test]
    fn into_option() {
        assert_eq!(CachedResult::Present(Value::Bool(true)).into_option(), Some(Value::Bool(true)));
        assert_eq!(CachedResult::Null.into_option(), None);
    }
}
