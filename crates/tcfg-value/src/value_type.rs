//! Declared-type descriptors
//!
//! Provides [`ValueType`] and its building blocks. Accessors declare their
//! result and argument types with these descriptors, and the translation
//! phases dispatch on them.

use std::any::{type_name, Any, TypeId};
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use crate::error::ConstructError;
use crate::value::{EnumConstant, ObjectValue, Value};

/// Scalar kinds covered by the scalar conversion table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
    /// `bool`
    Bool,
    /// `i8`
    Byte,
    /// `i16`
    Short,
    /// `i32`
    Int,
    /// `i64`
    Long,
    /// `f32` (IEEE 754 single precision)
    Float,
    /// `f64` (IEEE 754 double precision)
    Double,
}

impl ScalarKind {
    /// All kinds in table order
    pub const ALL: [ScalarKind; 7] = [
        ScalarKind::Bool,
        ScalarKind::Byte,
        ScalarKind::Short,
        ScalarKind::Int,
        ScalarKind::Long,
        ScalarKind::Float,
        ScalarKind::Double,
    ];

    /// Rust name of the kind
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Byte => "i8",
            Self::Short => "i16",
            Self::Int => "i32",
            Self::Long => "i64",
            Self::Float => "f32",
            Self::Double => "f64",
        }
    }

    /// Whether the kind is an integer kind
    #[inline]
    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Byte | Self::Short | Self::Int | Self::Long)
    }

    /// Whether the kind is a floating-point kind
    #[inline]
    #[must_use]
    pub fn is_float(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Always-present form of this kind
    #[inline]
    #[must_use]
    pub const fn bare(self) -> ScalarType {
        ScalarType::new(self, ScalarForm::Bare)
    }

    /// Possibly-absent form of this kind
    #[inline]
    #[must_use]
    pub const fn optional(self) -> ScalarType {
        ScalarType::new(self, ScalarForm::Optional)
    }
}

/// Whether a scalar is declared as a bare primitive or its absent-capable equivalent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScalarForm {
    /// Plain value, defaults to the kind's zero
    #[default]
    Bare,
    /// `Option`-like value, defaults to absence
    Optional,
}

/// A scalar kind together with its form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScalarType {
    /// Scalar kind
    pub kind: ScalarKind,
    /// Bare or optional
    pub form: ScalarForm,
}

impl ScalarType {
    /// Create scalar type
    #[inline]
    #[must_use]
    pub const fn new(kind: ScalarKind, form: ScalarForm) -> Self {
        Self { kind, form }
    }

    /// The same kind in the other form
    #[inline]
    #[must_use]
    pub const fn counterpart(self) -> Self {
        let form = match self.form {
            ScalarForm::Bare => ScalarForm::Optional,
            ScalarForm::Optional => ScalarForm::Bare,
        };
        Self::new(self.kind, form)
    }

    /// Check for the bare form
    #[inline]
    #[must_use]
    pub const fn is_bare(self) -> bool {
        matches!(self.form, ScalarForm::Bare)
    }
}

impl Display for ScalarType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.form {
            ScalarForm::Bare => f.write_str(self.kind.name()),
            ScalarForm::Optional => write!(f, "Option<{}>", self.kind.name()),
        }
    }
}

/// Enumeration descriptor: a name and its ordered constant names
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumType {
    name: String,
    constants: Vec<String>,
}

impl EnumType {
    /// Create enumeration descriptor
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, constants: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            name: name.into(),
            constants: constants.into_iter().map(Into::into).collect(),
        })
    }

    /// Enumeration name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared constant names, in ordinal order
    #[inline]
    #[must_use]
    pub fn constants(&self) -> &[String] {
        &self.constants
    }

    /// Number of constants
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.constants.len()
    }

    /// Check for an enumeration without constants
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    /// Constant at ordinal
    #[must_use]
    pub fn constant(self: &Arc<Self>, ordinal: usize) -> Option<EnumConstant> {
        (ordinal < self.constants.len()).then(|| EnumConstant::new(Arc::clone(self), ordinal))
    }

    /// Constant with exactly this name
    #[must_use]
    pub fn by_name(self: &Arc<Self>, name: &str) -> Option<EnumConstant> {
        let ordinal = self.constants.iter().position(|c| c == name)?;
        self.constant(ordinal)
    }

    /// First constant whose name equals `name` ignoring case
    #[must_use]
    pub fn by_name_ignore_case(self: &Arc<Self>, name: &str) -> Option<EnumConstant> {
        let wanted = name.to_lowercase();
        let ordinal = self
            .constants
            .iter()
            .position(|c| c.to_lowercase() == wanted)?;
        self.constant(ordinal)
    }

    /// Whether two constants differ only by case
    #[must_use]
    pub fn has_case_ambiguous_constants(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.constants.len());
        self.constants.iter().any(|c| !seen.insert(c.to_lowercase()))
    }
}

/// Rust enumerations usable as accessor results
///
/// Implementors usually keep their [`EnumType`] in a lazily initialized static.
pub trait ConfigEnum: Sized + 'static {
    /// Descriptor shared by all constants
    fn enum_type() -> Arc<EnumType>;

    /// Map a resolved constant back to the Rust value
    fn from_constant(constant: &EnumConstant) -> Option<Self>;

    /// Declared type for accessors returning this enumeration
    #[inline]
    fn value_type() -> ValueType {
        ValueType::Enum(Self::enum_type())
    }
}

type Factory = dyn Fn(&[Option<Value>]) -> Result<Value, ConstructError> + Send + Sync;

/// Explicitly registered constructor of an object type
///
/// Rust has no runtime reflection, so the constructor fallback only sees
/// constructors registered on the [`ObjectType`].
#[derive(Clone)]
pub struct Constructor {
    params: Vec<ValueType>,
    factory: Arc<Factory>,
}

impl Constructor {
    /// Create constructor from parameter types and a factory
    pub fn new<T, F>(params: Vec<ValueType>, factory: F) -> Self
    where
        T: Any + Send + Sync + Debug,
        F: Fn(&[Option<Value>]) -> Result<T, ConstructError> + Send + Sync + 'static,
    {
        Self {
            params,
            factory: Arc::new(move |args| factory(args).map(|v| Value::Object(ObjectValue::new(v)))),
        }
    }

    /// Parameter types
    #[inline]
    #[must_use]
    pub fn params(&self) -> &[ValueType] {
        &self.params
    }

    /// Number of parameters
    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Invoke the factory
    ///
    /// # Errors
    /// Returns error on arity mismatch or when the factory rejects its input
    pub fn invoke(&self, args: &[Option<Value>]) -> Result<Value, ConstructError> {
        if args.len() != self.params.len() {
            return Err(ConstructError::ArgumentCount {
                expected: self.params.len(),
                actual: args.len(),
            });
        }
        (self.factory)(args)
    }
}

impl Debug for Constructor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Descriptor of an arbitrary Rust type used as accessor result
#[derive(Clone)]
pub struct ObjectType {
    type_id: TypeId,
    name: &'static str,
    constructors: Vec<Constructor>,
}

impl ObjectType {
    /// Descriptor for `T` without constructors
    #[inline]
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: type_name::<T>(),
            constructors: Vec::new(),
        }
    }

    /// Descriptor from raw identity (used for value representation types)
    #[inline]
    #[must_use]
    pub(crate) fn from_identity(type_id: TypeId, name: &'static str) -> Self {
        Self {
            type_id,
            name,
            constructors: Vec::new(),
        }
    }

    /// Register a constructor
    #[inline]
    #[must_use]
    pub fn with_constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Check if descriptor denotes `T`
    #[inline]
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Type identity
    #[inline]
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified type name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Registered constructors, in registration order
    #[inline]
    #[must_use]
    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ObjectType {}

impl Debug for ObjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectType")
            .field("name", &self.name)
            .field("constructors", &self.constructors.len())
            .finish()
    }
}

/// Declared result or argument type of an accessor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    /// Text
    Text,
    /// Scalar in bare or optional form
    Scalar(ScalarType),
    /// Enumeration
    Enum(Arc<EnumType>),
    /// Raw bytes
    Bytes,
    /// Heterogeneous list
    List,
    /// Arbitrary Rust type
    Object(Arc<ObjectType>),
}

impl ValueType {
    /// Bare scalar type
    #[inline]
    #[must_use]
    pub const fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar(kind.bare())
    }

    /// Optional scalar type
    #[inline]
    #[must_use]
    pub const fn optional(kind: ScalarKind) -> Self {
        Self::Scalar(kind.optional())
    }

    /// Object type for `T` without constructors
    #[inline]
    #[must_use]
    pub fn object<T: Any>() -> Self {
        Self::Object(Arc::new(ObjectType::of::<T>()))
    }

    /// Object type from a prepared descriptor
    #[inline]
    #[must_use]
    pub fn from_object_type(object_type: ObjectType) -> Self {
        Self::Object(Arc::new(object_type))
    }

    /// Check for text
    #[inline]
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }

    /// Scalar descriptor, if any
    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<ScalarType> {
        match self {
            Self::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    /// Enumeration descriptor, if any
    #[inline]
    #[must_use]
    pub fn as_enum(&self) -> Option<&Arc<EnumType>> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Object descriptor, if any
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Check if this is the object type of `T`
    #[inline]
    #[must_use]
    pub fn is_object<T: Any>(&self) -> bool {
        self.as_object().is_some_and(ObjectType::is::<T>)
    }

    /// Check for a bare scalar (never satisfied by an absent value)
    #[inline]
    #[must_use]
    pub fn is_bare_scalar(&self) -> bool {
        self.as_scalar().is_some_and(ScalarType::is_bare)
    }

    /// Whether a parameter of this type accepts an argument of type `arg`
    ///
    /// `None` is the wildcard of an absent argument.
    #[must_use]
    pub fn accepts(&self, arg: Option<&ValueType>) -> bool {
        match (self, arg) {
            (_, None) => !self.is_bare_scalar(),
            (Self::Scalar(param), Some(Self::Scalar(arg))) => {
                param == arg || (!param.is_bare() && param.counterpart() == *arg)
            }
            (param, Some(arg)) => param == arg,
        }
    }

    /// Representation-type descriptor of an object value
    pub(crate) fn of_object_value(object: &ObjectValue) -> Self {
        Self::Object(Arc::new(ObjectType::from_identity(
            object.type_id(),
            object.type_name(),
        )))
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("String"),
            Self::Scalar(s) => Display::fmt(s, f),
            Self::Enum(e) => write!(f, "enum {}", e.name()),
            Self::Bytes => f.write_str("Vec<u8>"),
            Self::List => f.write_str("Vec<Value>"),
            Self::Object(o) => f.write_str(o.name()),
        }
    }
}
