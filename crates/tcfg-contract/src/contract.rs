//! Accessor contracts
//!
//! A [`Contract`] is a named set of accessor declarations, optionally
//! carrying a key prefix directive and inheriting accessors from parent
//! contracts. Every declaration becomes an immutable [`AccessorDescriptor`]
//! that remembers the prefix of the contract that declared it.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tcfg_value::ValueType;
use uuid::Uuid;

use crate::error::ContractError;

/// Separator appended to non-empty key prefixes
pub const KEY_SEPARATOR: char = '.';

/// Prefix literal standing for the contract's simple name
pub const TYPE_NAME_PLACEHOLDER: &str = "*";

/// Stable identity of an accessor declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccessorId(Uuid);

impl AccessorId {
    /// Mint a new identity
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccessorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccessorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contract-level key prefix directive
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PrefixDirective {
    /// Keys are not prefixed
    #[default]
    None,
    /// Literal prefix
    Literal(String),
    /// The contract's simple name
    TypeName,
}

impl PrefixDirective {
    /// Normalized prefix for a contract named `simple_name`
    ///
    /// Blank prefixes mean no prefix; any other prefix ends with exactly one
    /// [`KEY_SEPARATOR`].
    #[must_use]
    pub fn key_prefix(&self, simple_name: &str) -> String {
        let raw = match self {
            Self::None => return String::new(),
            Self::Literal(prefix) => prefix.as_str(),
            Self::TypeName => simple_name,
        };
        if raw.trim().is_empty() {
            return String::new();
        }
        let mut prefix = raw.to_string();
        if !prefix.ends_with(KEY_SEPARATOR) {
            prefix.push(KEY_SEPARATOR);
        }
        prefix
    }
}

impl From<&str> for PrefixDirective {
    fn from(value: &str) -> Self {
        if value == TYPE_NAME_PLACEHOLDER {
            Self::TypeName
        } else {
            Self::Literal(value.to_string())
        }
    }
}

impl From<String> for PrefixDirective {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

/// Explicit key name with fallback aliases
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryDirective {
    /// Explicit local key name; empty means "derive from the call name"
    pub name: String,
    /// Alternative local names, tried in order
    pub aliases: Vec<String>,
}

impl EntryDirective {
    /// Create directive
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }
}

/// Accessor declaration, turned into an [`AccessorDescriptor`] by the contract builder
#[derive(Debug, Clone)]
pub struct Accessor {
    name: String,
    result_type: ValueType,
    args: Vec<ValueType>,
    entry: Option<EntryDirective>,
    default_value: Option<String>,
    item_type: Option<ValueType>,
}

impl Accessor {
    /// Declare accessor `name` returning `result_type`
    #[must_use]
    pub fn new(name: impl Into<String>, result_type: ValueType) -> Self {
        Self {
            name: name.into(),
            result_type,
            args: Vec::new(),
            entry: None,
            default_value: None,
            item_type: None,
        }
    }

    /// With declared argument types
    #[must_use]
    pub fn args(mut self, args: impl IntoIterator<Item = ValueType>) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    /// With one more declared argument type
    #[must_use]
    pub fn arg(mut self, arg: ValueType) -> Self {
        self.args.push(arg);
        self
    }

    /// With explicit key name and aliases
    #[must_use]
    pub fn entry<I, S>(mut self, name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entry = Some(EntryDirective::new(name, aliases));
        self
    }

    /// With explicit key name only
    #[must_use]
    pub fn named(self, name: impl Into<String>) -> Self {
        self.entry(name, std::iter::empty::<String>())
    }

    /// With default literal used when the key is missing
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// With element type for collection results
    #[must_use]
    pub fn item_type(mut self, item_type: ValueType) -> Self {
        self.item_type = Some(item_type);
        self
    }
}

/// Immutable description of one declared accessor
#[derive(Debug, Clone)]
pub struct AccessorDescriptor {
    id: AccessorId,
    contract: String,
    key_prefix: String,
    name: String,
    result_type: ValueType,
    args: Vec<ValueType>,
    entry: Option<EntryDirective>,
    default_value: Option<String>,
    item_type: Option<ValueType>,
}

impl AccessorDescriptor {
    fn declare(contract: &str, key_prefix: &str, accessor: Accessor) -> Self {
        Self {
            id: AccessorId::new(),
            contract: contract.to_string(),
            key_prefix: key_prefix.to_string(),
            name: accessor.name,
            result_type: accessor.result_type,
            args: accessor.args,
            entry: accessor.entry,
            default_value: accessor.default_value.filter(|v| !v.is_empty()),
            item_type: accessor.item_type,
        }
    }

    /// Identity used by per-accessor state
    #[inline]
    #[must_use]
    pub fn id(&self) -> AccessorId {
        self.id
    }

    /// Simple name of the declaring contract
    #[inline]
    #[must_use]
    pub fn contract(&self) -> &str {
        &self.contract
    }

    /// Normalized key prefix of the declaring contract
    #[inline]
    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Call name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared result type
    #[inline]
    #[must_use]
    pub fn result_type(&self) -> &ValueType {
        &self.result_type
    }

    /// Declared argument types
    #[inline]
    #[must_use]
    pub fn args(&self) -> &[ValueType] {
        &self.args
    }

    /// Explicit name directive, if declared
    #[inline]
    #[must_use]
    pub fn entry(&self) -> Option<&EntryDirective> {
        self.entry.as_ref()
    }

    /// Default literal, if declared and non-empty
    #[inline]
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Element type directive, if declared
    #[inline]
    #[must_use]
    pub fn item_type(&self) -> Option<&ValueType> {
        self.item_type.as_ref()
    }
}

impl PartialEq for AccessorDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AccessorDescriptor {}

/// Named set of accessor declarations
#[derive(Debug)]
pub struct Contract {
    name: String,
    prefix: PrefixDirective,
    key_prefix: String,
    parents: Vec<Arc<Contract>>,
    accessors: IndexMap<String, Arc<AccessorDescriptor>>,
}

impl Contract {
    /// Start declaring a contract with the given simple name
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ContractBuilder {
        ContractBuilder {
            name: name.into(),
            prefix: PrefixDirective::None,
            parents: Vec::new(),
            accessors: Vec::new(),
        }
    }

    /// Simple name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prefix directive as declared
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &PrefixDirective {
        &self.prefix
    }

    /// Normalized key prefix of this contract's own declarations
    #[inline]
    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Direct parents, in declaration order
    #[inline]
    #[must_use]
    pub fn parents(&self) -> &[Arc<Contract>] {
        &self.parents
    }

    /// Accessors declared by this contract itself
    pub fn own_accessors(&self) -> impl Iterator<Item = &Arc<AccessorDescriptor>> {
        self.accessors.values()
    }

    /// Find the effective declaration of `name`
    ///
    /// Own declarations win over inherited ones; parents are searched
    /// depth-first in declaration order.
    #[must_use]
    pub fn accessor(&self, name: &str) -> Option<&Arc<AccessorDescriptor>> {
        self.accessors
            .get(name)
            .or_else(|| self.parents.iter().find_map(|p| p.accessor(name)))
    }

    /// Like [`Contract::accessor`], failing for unknown names
    ///
    /// # Errors
    /// `ContractError::UnknownAccessor` when neither the contract nor any parent declares `name`
    pub fn find(&self, name: &str) -> Result<Arc<AccessorDescriptor>, ContractError> {
        self.accessor(name)
            .cloned()
            .ok_or_else(|| ContractError::UnknownAccessor {
                contract: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// All effective accessors, overridden declarations excluded
    #[must_use]
    pub fn accessors(&self) -> Vec<Arc<AccessorDescriptor>> {
        let mut effective: IndexMap<&str, Arc<AccessorDescriptor>> = IndexMap::new();
        self.collect_into(&mut effective);
        effective.into_values().collect()
    }

    fn collect_into<'a>(&'a self, effective: &mut IndexMap<&'a str, Arc<AccessorDescriptor>>) {
        for (name, descriptor) in &self.accessors {
            effective
                .entry(name.as_str())
                .or_insert_with(|| Arc::clone(descriptor));
        }
        for parent in &self.parents {
            parent.collect_into(effective);
        }
    }
}

/// Builder for [`Contract`]
#[derive(Debug)]
pub struct ContractBuilder {
    name: String,
    prefix: PrefixDirective,
    parents: Vec<Arc<Contract>>,
    accessors: Vec<Accessor>,
}

impl ContractBuilder {
    /// With key prefix directive (`"*"` means the contract's simple name)
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<PrefixDirective>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Inherit accessors from `parent`
    #[must_use]
    pub fn extends(mut self, parent: &Arc<Contract>) -> Self {
        self.parents.push(Arc::clone(parent));
        self
    }

    /// Declare an accessor
    #[must_use]
    pub fn accessor(mut self, accessor: Accessor) -> Self {
        self.accessors.push(accessor);
        self
    }

    /// Finish the contract
    ///
    /// # Errors
    /// `ContractError::DuplicateAccessor` if a call name is declared twice
    pub fn build(self) -> Result<Arc<Contract>, ContractError> {
        let key_prefix = self.prefix.key_prefix(&self.name);
        let mut accessors = IndexMap::with_capacity(self.accessors.len());
        for accessor in self.accessors {
            if accessors.contains_key(&accessor.name) {
                return Err(ContractError::DuplicateAccessor {
                    contract: self.name,
                    name: accessor.name,
                });
            }
            let name = accessor.name.clone();
            let descriptor = AccessorDescriptor::declare(&self.name, &key_prefix, accessor);
            accessors.insert(name, Arc::new(descriptor));
        }
        Ok(Arc::new(Contract {
            name: self.name,
            prefix: self.prefix,
            key_prefix,
            parents: self.parents,
            accessors,
        }))
    }
}
