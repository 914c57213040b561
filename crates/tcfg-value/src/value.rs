//! Raw and converted values
//!
//! [`Value`] is what data providers hand out and what accessors return.
//! Absence is expressed as `Option<Value>::None`; there is no null variant.

use std::any::{type_name, Any, TypeId};
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use crate::value_type::{EnumType, ScalarKind, ValueType};

/// A single configuration value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text
    Text(String),
    /// Boolean
    Bool(bool),
    /// 8-bit integer
    Byte(i8),
    /// 16-bit integer
    Short(i16),
    /// 32-bit integer
    Int(i32),
    /// 64-bit integer
    Long(i64),
    /// 32-bit float
    Float(f32),
    /// 64-bit float
    Double(f64),
    /// Enumeration constant
    Enum(EnumConstant),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// List of values
    List(Vec<Value>),
    /// Arbitrary Rust object
    Object(ObjectValue),
}

/// Numeric view used by scalar narrowing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integer source
    Integer(i64),
    /// Floating-point source
    Float(f64),
}

impl Value {
    /// Text value
    #[inline]
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Object value wrapping `value`
    #[inline]
    #[must_use]
    pub fn object<T: Any + Send + Sync + Debug>(value: T) -> Self {
        Self::Object(ObjectValue::new(value))
    }

    /// Text content, if this is text
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Enumeration constant, if any
    #[inline]
    #[must_use]
    pub fn as_enum(&self) -> Option<&EnumConstant> {
        match self {
            Self::Enum(c) => Some(c),
            _ => None,
        }
    }

    /// Object payload, if any
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Numeric view; `Bool` is not numeric
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match *self {
            Self::Byte(v) => Some(Number::Integer(v.into())),
            Self::Short(v) => Some(Number::Integer(v.into())),
            Self::Int(v) => Some(Number::Integer(v.into())),
            Self::Long(v) => Some(Number::Integer(v)),
            Self::Float(v) => Some(Number::Float(v.into())),
            Self::Double(v) => Some(Number::Float(v)),
            _ => None,
        }
    }

    /// Scalar kind of the representation, if scalar
    #[must_use]
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Self::Bool(_) => Some(ScalarKind::Bool),
            Self::Byte(_) => Some(ScalarKind::Byte),
            Self::Short(_) => Some(ScalarKind::Short),
            Self::Int(_) => Some(ScalarKind::Int),
            Self::Long(_) => Some(ScalarKind::Long),
            Self::Float(_) => Some(ScalarKind::Float),
            Self::Double(_) => Some(ScalarKind::Double),
            _ => None,
        }
    }

    /// Representation type of this value
    ///
    /// Scalars are reported in their bare form.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Text(_) => ValueType::Text,
            Self::Enum(c) => ValueType::Enum(Arc::clone(c.enum_type())),
            Self::Bytes(_) => ValueType::Bytes,
            Self::List(_) => ValueType::List,
            Self::Object(o) => ValueType::of_object_value(o),
            Self::Bool(_) => ValueType::scalar(ScalarKind::Bool),
            Self::Byte(_) => ValueType::scalar(ScalarKind::Byte),
            Self::Short(_) => ValueType::scalar(ScalarKind::Short),
            Self::Int(_) => ValueType::scalar(ScalarKind::Int),
            Self::Long(_) => ValueType::scalar(ScalarKind::Long),
            Self::Float(_) => ValueType::scalar(ScalarKind::Float),
            Self::Double(_) => ValueType::scalar(ScalarKind::Double),
        }
    }

    /// Short type name for diagnostics
    #[must_use]
    pub fn type_name(&self) -> String {
        self.value_type().to_string()
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(t) => f.write_str(t),
            Self::Bool(v) => Display::fmt(v, f),
            Self::Byte(v) => Display::fmt(v, f),
            Self::Short(v) => Display::fmt(v, f),
            Self::Int(v) => Display::fmt(v, f),
            Self::Long(v) => Display::fmt(v, f),
            Self::Float(v) => Display::fmt(v, f),
            Self::Double(v) => Display::fmt(v, f),
            Self::Enum(c) => f.write_str(c.name()),
            Self::Bytes(b) => write!(f, "{b:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    Display::fmt(item, f)?;
                }
                f.write_str("]")
            }
            Self::Object(o) => Display::fmt(o, f),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_value_from! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<u8> => Bytes,
    Vec<Value> => List,
    EnumConstant => Enum,
}

/// A constant of an [`EnumType`]
#[derive(Clone)]
pub struct EnumConstant {
    enum_type: Arc<EnumType>,
    ordinal: usize,
}

impl EnumConstant {
    /// Create constant; caller guarantees `ordinal` is in range
    #[inline]
    #[must_use]
    pub(crate) fn new(enum_type: Arc<EnumType>, ordinal: usize) -> Self {
        Self { enum_type, ordinal }
    }

    /// Owning enumeration
    #[inline]
    #[must_use]
    pub fn enum_type(&self) -> &Arc<EnumType> {
        &self.enum_type
    }

    /// Declared name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.enum_type.constants()[self.ordinal]
    }

    /// Position in declaration order
    #[inline]
    #[must_use]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Check membership in `enum_type`
    #[inline]
    #[must_use]
    pub fn belongs_to(&self, enum_type: &EnumType) -> bool {
        *self.enum_type == *enum_type
    }
}

impl PartialEq for EnumConstant {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal == other.ordinal && self.enum_type == other.enum_type
    }
}

impl Eq for EnumConstant {}

impl Debug for EnumConstant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.enum_type.name(), self.name())
    }
}

type Render = fn(&(dyn Any + Send + Sync), &mut Formatter<'_>) -> fmt::Result;

fn render_debug<T: Any + Debug>(value: &(dyn Any + Send + Sync), f: &mut Formatter<'_>) -> fmt::Result {
    match value.downcast_ref::<T>() {
        Some(v) => Debug::fmt(v, f),
        None => f.write_str(type_name::<T>()),
    }
}

fn render_display<T: Any + Display>(value: &(dyn Any + Send + Sync), f: &mut Formatter<'_>) -> fmt::Result {
    match value.downcast_ref::<T>() {
        Some(v) => Display::fmt(v, f),
        None => f.write_str(type_name::<T>()),
    }
}

/// Shared, type-erased Rust object
#[derive(Clone)]
pub struct ObjectValue {
    type_id: TypeId,
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
    render: Render,
}

impl ObjectValue {
    /// Wrap `value`; rendered with its `Debug` form
    #[must_use]
    pub fn new<T: Any + Send + Sync + Debug>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            inner: Arc::new(value),
            render: render_debug::<T>,
        }
    }

    /// Wrap `value`; rendered with its `Display` form
    #[must_use]
    pub fn displayed<T: Any + Send + Sync + Display>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            inner: Arc::new(value),
            render: render_display::<T>,
        }
    }

    /// Type identity of the payload
    #[inline]
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Type name of the payload
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check payload type
    #[inline]
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Borrow payload as `T`
    #[inline]
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Share payload as `Arc<T>`
    #[must_use]
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.inner).downcast::<T>().ok()
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Debug for ObjectValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Object<{}>(", self.type_name)?;
        (self.render)(&*self.inner, f)?;
        f.write_str(")")
    }
}

impl Display for ObjectValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        (self.render)(&*self.inner, f)
    }
}

/// Extraction of Rust values from exactly matching [`Value`] variants
pub trait FromValue: Sized {
    /// Extract, or `None` if the variant does not match
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_value! {
    String => Text,
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<u8> => Bytes,
    Vec<Value> => List,
    EnumConstant => Enum,
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}
