//! Values flowing through number graph slots.
//!
//! Every slot holds a [`Value`]. Ports and action outputs declare a
//! [`ValueType`], and values are coerced to that type when written.
//!
//! # Coercion
//!
//! Coercion is a best-effort, lossy conversion:
//!
//! - An absent value ([`Value::None`]) becomes the zero value of the target type.
//! - A value that already has the target type is returned unchanged.
//! - Scalar targets accept any numeric value (bool, integer, scalar).
//! - Everything else falls back to the zero value of the target type.
//!
//! The fallback is silent by default. [`try_coerce`] reports it as `None`, and
//! [`CoercionStats`] counts fallbacks observed at runtime.

use serde::{Deserialize, Serialize};

/// Two-component vector.
pub type Vector2 = [f32; 2];
/// Three-component vector.
pub type Vector3 = [f32; 3];
/// Four-component vector.
pub type Vector4 = [f32; 4];

/// The declared type of a port, parameter, or action output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ValueType {
    /// Boolean value
    Bool,
    /// 32-bit signed integer
    Integer,
    /// 32-bit float
    #[default]
    Scalar,
    /// Two-component vector
    Vector2,
    /// Three-component vector
    Vector3,
    /// Four-component vector
    Vector4,
}

impl ValueType {
    /// The zero value of this type.
    pub fn zero(self) -> Value {
        match self {
            ValueType::Bool => Value::Bool(false),
            ValueType::Integer => Value::Integer(0),
            ValueType::Scalar => Value::Scalar(0.0),
            ValueType::Vector2 => Value::Vector2([0.0; 2]),
            ValueType::Vector3 => Value::Vector3([0.0; 3]),
            ValueType::Vector4 => Value::Vector4([0.0; 4]),
        }
    }

    /// Returns a human-readable name for this type
    pub fn display_name(&self) -> &'static str {
        match self {
            ValueType::Bool => "Bool",
            ValueType::Integer => "Integer",
            ValueType::Scalar => "Float",
            ValueType::Vector2 => "Vector2",
            ValueType::Vector3 => "Vector3",
            ValueType::Vector4 => "Vector4",
        }
    }

    /// Whether values of this type convert to a scalar without loss of meaning.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueType::Bool | ValueType::Integer | ValueType::Scalar
        )
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A single slot value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Value {
    /// No value (unwritten slot or missing literal).
    #[default]
    None,
    Bool(bool),
    Integer(i32),
    Scalar(f32),
    Vector2(Vector2),
    Vector3(Vector3),
    Vector4(Vector4),
}

impl Value {
    /// The type of this value, or `None` when absent.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::None => None,
            Value::Bool(_) => Some(ValueType::Bool),
            Value::Integer(_) => Some(ValueType::Integer),
            Value::Scalar(_) => Some(ValueType::Scalar),
            Value::Vector2(_) => Some(ValueType::Vector2),
            Value::Vector3(_) => Some(ValueType::Vector3),
            Value::Vector4(_) => Some(ValueType::Vector4),
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Numeric view of bool, integer and scalar values.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Integer(i) => Some(*i as f32),
            Value::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    /// Coerce to `ty`. Returns `None` when the conversion had to fall back to
    /// the zero value; an absent value coerces to zero without a fallback.
    pub fn coerce_to(&self, ty: ValueType) -> Option<Value> {
        if self.is_none() {
            return Some(ty.zero());
        }
        if self.value_type() == Some(ty) {
            return Some(*self);
        }
        if ty == ValueType::Scalar {
            return self.as_number().map(Value::Scalar);
        }
        None
    }

    /// Like [`Value::coerce_to`], substituting the zero value on fallback.
    pub fn coerce_to_or_zero(&self, ty: ValueType) -> Value {
        self.coerce_to(ty).unwrap_or_else(|| ty.zero())
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Scalar(v) => write!(f, "{}", v),
            Value::Vector2([x, y]) => write!(f, "({}, {})", x, y),
            Value::Vector3([x, y, z]) => write!(f, "({}, {}, {})", x, y, z),
            Value::Vector4([x, y, z, w]) => write!(f, "({}, {}, {}, {})", x, y, z, w),
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Scalar(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Vector2> for Value {
    fn from(v: Vector2) -> Self {
        Value::Vector2(v)
    }
}

impl From<Vector3> for Value {
    fn from(v: Vector3) -> Self {
        Value::Vector3(v)
    }
}

impl From<Vector4> for Value {
    fn from(v: Vector4) -> Self {
        Value::Vector4(v)
    }
}

/// Rust types that a [`Value`] can be coerced into.
pub trait Coerce: Sized {
    /// The slot type corresponding to `Self`.
    const VALUE_TYPE: ValueType;

    /// Extract from a value of exactly `VALUE_TYPE`.
    fn from_exact(value: &Value) -> Option<Self>;

    fn zero() -> Self;
}

macro_rules! impl_coerce {
    ($ty:ty, $value_type:ident, $zero:expr) => {
        impl Coerce for $ty {
            const VALUE_TYPE: ValueType = ValueType::$value_type;

            fn from_exact(value: &Value) -> Option<Self> {
                match value {
                    Value::$value_type(v) => Some(*v),
                    _ => None,
                }
            }

            fn zero() -> Self {
                $zero
            }
        }
    };
}

impl_coerce!(bool, Bool, false);
impl_coerce!(i32, Integer, 0);
impl_coerce!(f32, Scalar, 0.0);
impl_coerce!(Vector2, Vector2, [0.0; 2]);
impl_coerce!(Vector3, Vector3, [0.0; 3]);
impl_coerce!(Vector4, Vector4, [0.0; 4]);

/// Coerce `value` into `T`, returning `None` on a lossy fallback.
pub fn try_coerce<T: Coerce>(value: &Value) -> Option<T> {
    value
        .coerce_to(T::VALUE_TYPE)
        .and_then(|v| T::from_exact(&v))
}

/// Coerce `value` into `T`, silently falling back to zero.
pub fn coerce<T: Coerce>(value: &Value) -> T {
    try_coerce(value).unwrap_or_else(T::zero)
}

/// Counters for coercion fallbacks observed while running a program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoercionStats {
    /// Total fallbacks since the counters were last reset.
    pub fallbacks: u64,
    /// Fallbacks during the most recent interpreter pass.
    pub last_pass_fallbacks: u64,
}

impl CoercionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fallback from `from` to `to`.
    pub fn record_fallback(&mut self, from: Option<ValueType>, to: ValueType) {
        self.fallbacks += 1;
        self.last_pass_fallbacks += 1;
        tracing::trace!("Coercion fallback: {:?} -> {} (zero substituted)", from, to);
    }

    /// Mark the start of a new interpreter pass.
    pub fn begin_pass(&mut self) {
        self.last_pass_fallbacks = 0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_absent_is_zero() {
        assert_eq!(coerce::<f32>(&Value::None), 0.0);
        assert_eq!(coerce::<Vector3>(&Value::None), [0.0; 3]);
        assert_eq!(try_coerce::<Vector2>(&Value::None), Some([0.0; 2]));
    }

    #[test]
    fn test_coerce_same_type_unchanged() {
        assert_eq!(coerce::<Vector2>(&Value::Vector2([1.0, 2.0])), [1.0, 2.0]);
        assert_eq!(coerce::<f32>(&Value::Scalar(7.5)), 7.5);
        assert!(coerce::<bool>(&Value::Bool(true)));
    }

    #[test]
    fn test_coerce_scalar_from_numeric() {
        assert_eq!(coerce::<f32>(&Value::Integer(4)), 4.0);
        assert_eq!(coerce::<f32>(&Value::Bool(true)), 1.0);
        assert_eq!(try_coerce::<f32>(&Value::Integer(-3)), Some(-3.0));
    }

    #[test]
    fn test_coerce_scalar_from_vector_falls_back() {
        let v = Value::Vector3([1.0, 2.0, 3.0]);
        assert_eq!(coerce::<f32>(&v), 0.0);
        assert_eq!(try_coerce::<f32>(&v), None);
    }

    #[test]
    fn test_coerce_vector_from_scalar_falls_back() {
        // No scalar splatting
        assert_eq!(coerce::<Vector2>(&Value::Scalar(2.0)), [0.0, 0.0]);
        assert_eq!(coerce::<i32>(&Value::Scalar(2.0)), 0);
    }

    #[test]
    fn test_coerce_to_dynamic() {
        assert_eq!(
            Value::Integer(2).coerce_to(ValueType::Scalar),
            Some(Value::Scalar(2.0))
        );
        assert_eq!(Value::Scalar(2.0).coerce_to(ValueType::Vector4), None);
        assert_eq!(
            Value::Scalar(2.0).coerce_to_or_zero(ValueType::Vector4),
            Value::Vector4([0.0; 4])
        );
    }

    #[test]
    fn test_coercion_stats() {
        let mut stats = CoercionStats::new();
        stats.record_fallback(Some(ValueType::Vector3), ValueType::Scalar);
        stats.record_fallback(None, ValueType::Scalar);
        assert_eq!(stats.fallbacks, 2);
        assert_eq!(stats.last_pass_fallbacks, 2);

        stats.begin_pass();
        assert_eq!(stats.fallbacks, 2);
        assert_eq!(stats.last_pass_fallbacks, 0);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Vector2([1.0, 2.5]).to_string(), "(1, 2.5)");
        assert_eq!(Value::None.to_string(), "none");
        assert_eq!(ValueType::Scalar.to_string(), "Float");
    }
}
