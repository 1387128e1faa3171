//! Values that can be attached to a log entry
//!
//! [`Value`] is the closed set of shapes the serializer understands. Each Rust
//! type is assigned its shape by a `From` conversion, so the choice of
//! formatting is made once, when the value is attached.

use super::cause::Cause;
use super::error::{LoggerError, Result};
use chrono::{DateTime, TimeZone};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::num::{
    NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI8, NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU8,
};
use std::str::FromStr;
use std::sync::atomic::{
    AtomicI16, AtomicI32, AtomicI64, AtomicI8, AtomicIsize, AtomicU16, AtomicU32, AtomicU64,
    AtomicU8, AtomicUsize, Ordering,
};
use std::sync::Arc;

/// A value attached to a log entry
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Text(String),
    Decimal(Decimal),
    Float(Float),
    Integer(Integer),
    /// Any other numeric type, read when the entry is formatted
    Number(Arc<dyn Numeric>),
    Bool(bool),
    Seq(Vec<Value>),
    /// Key/value pairs in iteration order of the source map
    Map(Vec<(Value, Value)>),
    Primitives(PrimitiveArray),
    Array(Box<[Value]>),
    Error(Cause),
    /// Descriptive text of a value with no dedicated shape
    Display(String),
}

impl Value {
    /// Capture the descriptive text of an arbitrary value
    pub fn display(value: impl fmt::Display) -> Self {
        Value::Display(value.to_string())
    }

    /// Wrap a numeric type with no dedicated shape
    pub fn number(value: impl Numeric + 'static) -> Self {
        Value::Number(Arc::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Look up a key in a map value
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries
                .iter()
                .find(|(k, _)| matches!(k, Value::Text(text) if text == key))
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => {
                a.to_i128() == b.to_i128() && a.to_f64().to_bits() == b.to_f64().to_bits()
            }
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Primitives(a), Value::Primitives(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Display(a), Value::Display(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Text(text) | Value::Display(text) => f.write_str(text),
            Value::Decimal(decimal) => fmt::Display::fmt(decimal, f),
            Value::Float(float) => fmt::Display::fmt(float, f),
            Value::Integer(integer) => fmt::Display::fmt(integer, f),
            Value::Number(number) => f.write_str(&numeric_text(number.as_ref())),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Seq(items) => fmt_list(f, items),
            Value::Array(items) => fmt_list(f, items),
            Value::Map(entries) => fmt::Display::fmt(&MapDisplay(entries), f),
            Value::Primitives(array) => fmt::Display::fmt(array, f),
            Value::Error(cause) => fmt::Display::fmt(cause, f),
        }
    }
}

fn fmt_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}

/// Text representation of a map's entries: `{a=1, b=2}`
pub(crate) struct MapDisplay<'a>(pub(crate) &'a [(Value, Value)]);

impl fmt::Display for MapDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (key, value)) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        f.write_str("}")
    }
}

/// Fixed-width floating point value, kept at its own precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Float {
    F32(f32),
    F64(f64),
}

impl fmt::Display for Float {
    /// Shortest round-trip text, always with a fraction or exponent
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Float::F32(v) => write!(f, "{:?}", v),
            Float::F64(v) => write!(f, "{:?}", v),
        }
    }
}

/// Fixed-width integral value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integer {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer::I8(v) => write!(f, "{}", v),
            Integer::I16(v) => write!(f, "{}", v),
            Integer::I32(v) => write!(f, "{}", v),
            Integer::I64(v) => write!(f, "{}", v),
            Integer::I128(v) => write!(f, "{}", v),
            Integer::U8(v) => write!(f, "{}", v),
            Integer::U16(v) => write!(f, "{}", v),
            Integer::U32(v) => write!(f, "{}", v),
            Integer::U64(v) => write!(f, "{}", v),
            Integer::U128(v) => write!(f, "{}", v),
        }
    }
}

/// A numeric type without a dedicated [`Value`] shape
///
/// Implemented for the std atomics, so live counters can be attached and
/// are read when the entry is formatted.
pub trait Numeric: fmt::Debug + Send + Sync {
    /// The value truncated to an integer, saturating at the `i64` bounds
    fn to_i64(&self) -> i64;

    /// The value at double precision
    fn to_f64(&self) -> f64;

    /// The value truncated to an integer
    ///
    /// Override when the type holds integers beyond the `i64` range.
    fn to_i128(&self) -> i128 {
        i128::from(self.to_i64())
    }
}

/// Integral text when truncation loses nothing, fractional text otherwise
pub(crate) fn numeric_text(number: &dyn Numeric) -> String {
    let integral = number.to_i128();
    let fractional = number.to_f64();
    if integral as f64 == fractional {
        integral.to_string()
    } else {
        format!("{:?}", fractional)
    }
}

macro_rules! impl_numeric_for_atomic {
    ($($atomic:ty),+) => {
        $(
            impl Numeric for $atomic {
                fn to_i64(&self) -> i64 {
                    i64::try_from(self.load(Ordering::Relaxed)).unwrap_or(i64::MAX)
                }

                fn to_f64(&self) -> f64 {
                    self.load(Ordering::Relaxed) as f64
                }

                fn to_i128(&self) -> i128 {
                    self.load(Ordering::Relaxed) as i128
                }
            }
        )+
    };
}

impl_numeric_for_atomic!(
    AtomicI8, AtomicI16, AtomicI32, AtomicI64, AtomicIsize, AtomicU8, AtomicU16, AtomicU32,
    AtomicU64, AtomicUsize
);

impl<N: Numeric + 'static> From<Arc<N>> for Value {
    fn from(number: Arc<N>) -> Self {
        Value::Number(number)
    }
}

/// Arbitrary-precision decimal, kept as canonical decimal text
///
/// The canonical form is plain notation when the scale is not negative and
/// the adjusted exponent is at least -6, scientific notation with a signed
/// exponent otherwise. Trailing zeros are significant and kept.
///
/// # Example
///
/// ```
/// use rust_structured_logger::core::Decimal;
///
/// let d: Decimal = "1.35e-40".parse().unwrap();
/// assert_eq!(d.to_string(), "1.35E-40");
///
/// let d: Decimal = "100e-2".parse().unwrap();
/// assert_eq!(d.to_string(), "1.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal(String);

impl Decimal {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Decimal {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || LoggerError::invalid_argument("decimal", format!("'{}'", s));

        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(index) => (&body[..index], Some(&body[index + 1..])),
            None => (body, None),
        };
        let (whole, fraction) = match mantissa.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (mantissa, None),
        };

        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(whole) || fraction.is_some_and(|frac| !digits(frac)) {
            return Err(invalid());
        }

        let exponent: i64 = match exponent {
            Some(exp) => {
                let exp_digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
                if !digits(exp_digits) {
                    return Err(invalid());
                }
                exp.parse::<i32>().map_err(|_| invalid())?.into()
            }
            None => 0,
        };

        let fraction = fraction.unwrap_or("");
        let all_digits = format!("{}{}", whole, fraction);
        let unscaled = match all_digits.trim_start_matches('0') {
            "" => "0",
            significant => significant,
        };
        let scale = fraction.len() as i64 - exponent;

        let mut canonical = String::new();
        if negative && unscaled != "0" {
            canonical.push('-');
        }
        canonical.push_str(&canonical_digits(unscaled, scale));
        Ok(Decimal(canonical))
    }
}

/// Text of `unscaled * 10^-scale`, using the plain-versus-scientific rule of
/// arbitrary-precision decimals
fn canonical_digits(unscaled: &str, scale: i64) -> String {
    let precision = unscaled.len() as i64;
    let adjusted = precision - 1 - scale;

    if scale == 0 {
        return unscaled.to_string();
    }

    if scale > 0 && adjusted >= -6 {
        let point = precision - scale;
        return if point > 0 {
            let (int_part, frac_part) = unscaled.split_at(point as usize);
            format!("{}.{}", int_part, frac_part)
        } else {
            format!("0.{}{}", "0".repeat((-point) as usize), unscaled)
        };
    }

    let (first, rest) = unscaled.split_at(1);
    let mut text = first.to_string();
    if !rest.is_empty() {
        text.push('.');
        text.push_str(rest);
    }
    text.push('E');
    if adjusted >= 0 {
        text.push('+');
    }
    text.push_str(&adjusted.to_string());
    text
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed array of one primitive kind
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveArray {
    Char(Box<[char]>),
    Bool(Box<[bool]>),
    I8(Box<[i8]>),
    I16(Box<[i16]>),
    I32(Box<[i32]>),
    I64(Box<[i64]>),
    U8(Box<[u8]>),
    U16(Box<[u16]>),
    U32(Box<[u32]>),
    U64(Box<[u64]>),
    F32(Box<[f32]>),
    F64(Box<[f64]>),
}

impl fmt::Display for PrimitiveArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveArray::Char(items) => fmt_list(f, items),
            PrimitiveArray::Bool(items) => fmt_list(f, items),
            PrimitiveArray::I8(items) => fmt_list(f, items),
            PrimitiveArray::I16(items) => fmt_list(f, items),
            PrimitiveArray::I32(items) => fmt_list(f, items),
            PrimitiveArray::I64(items) => fmt_list(f, items),
            PrimitiveArray::U8(items) => fmt_list(f, items),
            PrimitiveArray::U16(items) => fmt_list(f, items),
            PrimitiveArray::U32(items) => fmt_list(f, items),
            PrimitiveArray::U64(items) => fmt_list(f, items),
            PrimitiveArray::F32(items) => {
                let items: Vec<Float> = items.iter().map(|v| Float::F32(*v)).collect();
                fmt_list(f, &items)
            }
            PrimitiveArray::F64(items) => {
                let items: Vec<Float> = items.iter().map(|v| Float::F64(*v)).collect();
                fmt_list(f, &items)
            }
        }
    }
}

macro_rules! impl_from_primitive_array {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl<const N: usize> From<[$ty; N]> for Value {
                fn from(items: [$ty; N]) -> Self {
                    Value::Primitives(PrimitiveArray::$variant(Box::new(items)))
                }
            }

            impl From<&[$ty]> for Value {
                fn from(items: &[$ty]) -> Self {
                    Value::Primitives(PrimitiveArray::$variant(items.into()))
                }
            }
        )+
    };
}

impl_from_primitive_array!(
    char => Char,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);

macro_rules! impl_from_integer {
    ($($ty:ty => $variant:ident($as:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Integer(Integer::$variant(value as $as))
                }
            }
        )+
    };
}

impl_from_integer!(
    i8 => I8(i8),
    i16 => I16(i16),
    i32 => I32(i32),
    i64 => I64(i64),
    i128 => I128(i128),
    isize => I64(i64),
    u8 => U8(u8),
    u16 => U16(u16),
    u32 => U32(u32),
    u64 => U64(u64),
    u128 => U128(u128),
    usize => U64(u64),
);

macro_rules! impl_from_non_zero {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::from(value.get())
                }
            }
        )+
    };
}

impl_from_non_zero!(
    NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroU8, NonZeroU16, NonZeroU32, NonZeroU64
);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(Float::F32(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(Float::F64(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(value: Cow<'_, str>) -> Self {
        Value::Text(value.into_owned())
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<Cause> for Value {
    fn from(value: Cause) -> Self {
        Value::Error(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value
where
    Tz::Offset: fmt::Display,
{
    fn from(value: DateTime<Tz>) -> Self {
        Value::Display(value.to_rfc3339())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<VecDeque<T>> for Value {
    fn from(items: VecDeque<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeSet<T>> for Value {
    fn from(items: BTreeSet<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, S> From<HashSet<T, S>> for Value {
    fn from(items: HashSet<T, S>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Box<[T]>> for Value {
    fn from(items: Box<[T]>) -> Self {
        Value::Array(items.into_vec().into_iter().map(Into::into).collect())
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(map: BTreeMap<K, V>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<Value>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(map: HashMap<K, V, S>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
