//! The [`Value`] tree the codec encodes and decodes.

/// 2^63 as a double; the first integral double outside `i64`.
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
/// 2^64 as a double; the first integral double outside `u64`.
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// A self-describing value.
///
/// Integers are kept as true 64-bit numbers. The constructors below and the
/// decoder only use `UInteger` for values above `i64::MAX`, but a hand-built
/// `UInteger(5)` is still the number 5: equality compares integers by value
/// across both variants, so `decode(encode(v)) == v` holds either way.
///
/// Maps keep their pairs in insertion order and allow any key type. A
/// structure with a fixed set of named fields is a `Map` with `Str` keys
/// (see [`Value::object`]).
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Unsigned integer above `i64::MAX`.
    UInteger(u64),
    /// Number with a fractional part, or outside the 64-bit integer range.
    Float(f64),
    Str(String),
    /// Raw byte blob.
    Bin(Vec<u8>),
    Arr(Vec<Value>),
    /// Ordered key-value pairs.
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Builds a numeric value, classifying it as an integer when it has no
    /// fractional part and fits the 64-bit integer range.
    ///
    /// `-0.0` becomes `Integer(0)`. NaN and the infinities stay floats.
    ///
    /// ```
    /// use minipack::Value;
    ///
    /// assert_eq!(Value::number(3.0), Value::Integer(3));
    /// assert_eq!(Value::number(3.5), Value::Float(3.5));
    /// ```
    pub fn number(n: f64) -> Value {
        if n.fract() == 0.0 {
            if (-TWO_POW_63..TWO_POW_63).contains(&n) {
                return Value::Integer(n as i64);
            }
            if (0.0..TWO_POW_64).contains(&n) {
                return Value::UInteger(n as u64);
            }
        }
        Value::Float(n)
    }

    /// Builds a map with string keys, the shape of a keyed structure.
    pub fn object<K, I>(fields: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(
            fields
                .into_iter()
                .map(|(k, v)| (Value::Str(k.into()), v))
                .collect(),
        )
    }

    pub fn bin(bytes: impl Into<Vec<u8>>) -> Value {
        Value::Bin(bytes.into())
    }

    /// Looks up the first pair whose key is the string `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(pairs) => pairs
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Integer(i) => u64::try_from(*i).ok(),
            Value::UInteger(u) => Some(*u),
            _ => None,
        }
    }

    /// Numeric view of any number variant.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::UInteger(u) => Some(*u as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bin(&self) -> Option<&[u8]> {
        match self {
            Value::Bin(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_arr(&self) -> Option<&[Value]> {
        match self {
            Value::Arr(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(pairs) => Some(pairs),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::UInteger(a), Value::UInteger(b)) => a == b,
            (Value::Integer(i), Value::UInteger(u)) | (Value::UInteger(u), Value::Integer(i)) => {
                u64::try_from(*i).is_ok_and(|i| i == *u)
            }
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bin(a), Value::Bin(b)) => a == b,
            (Value::Arr(a), Value::Arr(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Integer(n as i64)
            }
        })*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Value::UInteger(n), Value::Integer)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Arr(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Nil, Into::into)
    }
}
