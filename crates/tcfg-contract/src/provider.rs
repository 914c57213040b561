//! Data providers
//!
//! The engine reads raw values through [`DataProvider`]. Implementations here:
//! - [`MapDataProvider`]: in-memory, mutable through a shared reference
//! - [`LayeredDataProvider`]: ordered overlay of other providers
//! - [`JsonDataProvider`]: JSON or YAML documents flattened to dotted keys

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tcfg_value::Value;

use crate::contract::KEY_SEPARATOR;
use crate::error::ProviderError;

/// Read-only source of raw values keyed by string
///
/// A key may be present with an absent value; `contains_key` reports
/// presence independently of `get_raw`.
pub trait DataProvider: Send + Sync {
    /// Whether `key` is present
    fn contains_key(&self, key: &str) -> bool;

    /// Raw value for `key`, if present and non-null
    fn get_raw(&self, key: &str) -> Option<Value>;
}

impl<P: DataProvider + ?Sized> DataProvider for Arc<P> {
    fn contains_key(&self, key: &str) -> bool {
        (**self).contains_key(key)
    }

    fn get_raw(&self, key: &str) -> Option<Value> {
        (**self).get_raw(key)
    }
}

impl<P: DataProvider + ?Sized> DataProvider for Box<P> {
    fn contains_key(&self, key: &str) -> bool {
        (**self).contains_key(key)
    }

    fn get_raw(&self, key: &str) -> Option<Value> {
        (**self).get_raw(key)
    }
}

impl<P: DataProvider + ?Sized> DataProvider for &P {
    fn contains_key(&self, key: &str) -> bool {
        (**self).contains_key(key)
    }

    fn get_raw(&self, key: &str) -> Option<Value> {
        (**self).get_raw(key)
    }
}

/// In-memory provider preserving insertion order
#[derive(Debug, Default)]
pub struct MapDataProvider {
    entries: RwLock<IndexMap<String, Option<Value>>>,
}

impl MapDataProvider {
    /// Create empty provider
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With an entry
    #[must_use]
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// With a present key holding no value
    #[must_use]
    pub fn with_null(self, key: impl Into<String>) -> Self {
        self.entries.write().insert(key.into(), None);
        self
    }

    /// Insert or replace an entry
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.write().insert(key.into(), Some(value.into()));
    }

    /// Remove an entry, returning whether it was present
    pub fn remove(&self, key: &str) -> bool {
        self.entries.write().shift_remove(key).is_some()
    }

    /// Number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check for no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Keys in insertion order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MapDataProvider {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into(), Some(v.into())))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl DataProvider for MapDataProvider {
    fn contains_key(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    fn get_raw(&self, key: &str) -> Option<Value> {
        self.entries.read().get(key).cloned().flatten()
    }
}

/// Ordered overlay: the first layer containing a key answers for it
#[derive(Default)]
pub struct LayeredDataProvider {
    layers: Vec<Arc<dyn DataProvider>>,
}

impl LayeredDataProvider {
    /// Create provider without layers
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer with lower precedence than the existing ones
    #[must_use]
    pub fn layer(mut self, provider: impl DataProvider + 'static) -> Self {
        self.layers.push(Arc::new(provider));
        self
    }

    /// Add a shared layer with lower precedence than the existing ones
    #[must_use]
    pub fn shared_layer(mut self, provider: Arc<dyn DataProvider>) -> Self {
        self.layers.push(provider);
        self
    }

    /// Number of layers
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers.len()
    }
}

impl std::fmt::Debug for LayeredDataProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredDataProvider")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl DataProvider for LayeredDataProvider {
    fn contains_key(&self, key: &str) -> bool {
        self.layers.iter().any(|layer| layer.contains_key(key))
    }

    fn get_raw(&self, key: &str) -> Option<Value> {
        self.layers
            .iter()
            .find(|layer| layer.contains_key(key))
            .and_then(|layer| layer.get_raw(key))
    }
}

/// Provider over a JSON/YAML document flattened into dotted keys
///
/// `{"server": {"port": 80}}` exposes `server.port`. Arrays become
/// [`Value::List`] leaves; a `null` leaf is a present key without value.
#[derive(Debug, Default)]
pub struct JsonDataProvider {
    entries: MapDataProvider,
}

impl JsonDataProvider {
    /// Build from a parsed JSON document
    ///
    /// # Errors
    /// `ProviderError::NotAMapping` when the root is not an object
    pub fn from_json(document: &serde_json::Value) -> Result<Self, ProviderError> {
        let serde_json::Value::Object(root) = document else {
            return Err(ProviderError::NotAMapping(json_kind(document)));
        };
        let entries = MapDataProvider::new();
        flatten_into(&entries, "", root);
        tracing::debug!(keys = entries.len(), "flattened configuration document");
        Ok(Self { entries })
    }

    /// Parse and flatten a JSON document
    ///
    /// # Errors
    /// Returns error if the text is not JSON or its root is not an object
    pub fn from_json_str(json: &str) -> Result<Self, ProviderError> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json(&document)
    }

    /// Parse and flatten a YAML document
    ///
    /// # Errors
    /// Returns error if the text is not YAML or its root is not a mapping
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ProviderError> {
        let document: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_json(&document)
    }

    /// Flattened keys
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys()
    }
}

impl DataProvider for JsonDataProvider {
    fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn get_raw(&self, key: &str) -> Option<Value> {
        self.entries.get_raw(key)
    }
}

fn flatten_into(entries: &MapDataProvider, prefix: &str, object: &serde_json::Map<String, serde_json::Value>) {
    for (name, node) in object {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}{KEY_SEPARATOR}{name}")
        };
        match node {
            serde_json::Value::Object(nested) => flatten_into(entries, &key, nested),
            serde_json::Value::Null => {
                entries.entries.write().insert(key, None);
            }
            leaf => {
                if let Some(value) = convert_leaf(leaf) {
                    entries.insert(key, value);
                }
            }
        }
    }
}

fn convert_leaf(node: &serde_json::Value) -> Option<Value> {
    match node {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
        serde_json::Value::Number(n) => n
            .as_i64()
            .map(Value::Long)
            .or_else(|| n.as_f64().map(Value::Double)),
        serde_json::Value::String(s) => Some(Value::text(s.as_str())),
        serde_json::Value::Array(items) => Some(Value::List(
            items.iter().filter_map(convert_leaf).collect(),
        )),
        serde_json::Value::Object(_) => Some(Value::text(node.to_string())),
    }
}

fn json_kind(node: &serde_json::Value) -> &'static str {
    match node {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
