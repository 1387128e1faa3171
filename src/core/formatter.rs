//! Formatting of built log entries
//!
//! [`JsonEntryFormatter`] renders a [`Value`] tree as compact, escaped,
//! JSON-like text. Shapes are dispatched in a fixed order: null, text,
//! decimal, floats, integers, other numbers, booleans, collections, maps,
//! primitive arrays, object arrays, and finally anything else as quoted text.
//!
//! Every descent into a collection, map or array element adds one level of
//! depth. Formatting deeper than the configured maximum fails the whole call;
//! no partial text is returned.

use super::config::DEFAULT_MAX_DEPTH;
use super::error::{LoggerError, Result};
use super::value::{numeric_text, Float, MapDisplay, PrimitiveArray, Value};
use std::fmt::Write;

const NULL: &str = "null";
const COMMA: char = ',';
const COLON: char = ':';
const OBJECT_START: char = '{';
const OBJECT_END: char = '}';
const ARRAY_START: char = '[';
const ARRAY_END: char = ']';

/// Formatter of built log entries
pub trait EntryFormatter: Send + Sync {
    /// Whether the cause is folded into the formatted entry under the `cause`
    /// key, rather than handed to the sink as a separate value
    fn cause_in_message(&self) -> bool {
        false
    }

    /// Format a built entry
    fn format(&self, entry: &Value) -> Result<String>;
}

/// Depth-bounded JSON-like entry formatter
///
/// # Example
///
/// ```
/// use rust_structured_logger::core::{EntryFormatter, JsonEntryFormatter, Value};
///
/// let formatter = JsonEntryFormatter::new();
/// let text = formatter.format(&Value::from(vec![true, false])).unwrap();
/// assert_eq!(text, "[true,false]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonEntryFormatter {
    max_depth: usize,
    cause_in_message: bool,
}

impl JsonEntryFormatter {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            cause_in_message: false,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_cause_in_message(mut self, cause_in_message: bool) -> Self {
        self.cause_in_message = cause_in_message;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn write_value(&self, out: &mut String, value: &Value, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(LoggerError::depth_exceeded(self.max_depth));
        }

        match value {
            Value::Null => out.push_str(NULL),
            Value::Text(text) => write_escaped(out, text)?,
            Value::Decimal(decimal) => out.push_str(decimal.as_str()),
            Value::Float(float) => write!(out, "{}", float)?,
            Value::Integer(integer) => write!(out, "{}", integer)?,
            Value::Number(number) => out.push_str(&numeric_text(number.as_ref())),
            Value::Bool(b) => write!(out, "{}", b)?,
            Value::Seq(items) => self.write_items(out, items, depth)?,
            Value::Map(entries) => self.write_map(out, entries, depth)?,
            Value::Primitives(array) => write_primitives(out, array)?,
            Value::Array(items) => self.write_items(out, items, depth)?,
            Value::Error(cause) => write_escaped(out, &cause.trace())?,
            Value::Display(text) => write_escaped(out, text)?,
        }
        Ok(())
    }

    fn write_items(&self, out: &mut String, items: &[Value], depth: usize) -> Result<()> {
        out.push(ARRAY_START);
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                out.push(COMMA);
            }
            self.write_value(out, item, depth + 1)?;
        }
        out.push(ARRAY_END);
        Ok(())
    }

    fn write_map(&self, out: &mut String, entries: &[(Value, Value)], depth: usize) -> Result<()> {
        out.push(OBJECT_START);
        for (index, (key, value)) in entries.iter().enumerate() {
            if key.is_null() {
                return Err(LoggerError::invalid_key(MapDisplay(entries).to_string(), depth));
            }
            if index > 0 {
                out.push(COMMA);
            }

            match key {
                Value::Text(text) => write_escaped(out, text)?,
                other => write_escaped(out, &other.to_string())?,
            }
            out.push(COLON);

            self.write_value(out, value, depth + 1)?;
        }
        out.push(OBJECT_END);
        Ok(())
    }
}

impl Default for JsonEntryFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryFormatter for JsonEntryFormatter {
    fn cause_in_message(&self) -> bool {
        self.cause_in_message
    }

    fn format(&self, entry: &Value) -> Result<String> {
        let mut out = String::new();
        self.write_value(&mut out, entry, 0)?;
        Ok(out)
    }
}

/// Quote and escape text per JSON string rules
fn write_escaped(out: &mut String, text: &str) -> Result<()> {
    out.push_str(&serde_json::to_string(text)?);
    Ok(())
}

fn write_joined<T>(
    out: &mut String,
    items: &[T],
    mut write_item: impl FnMut(&mut String, &T) -> Result<()>,
) -> Result<()> {
    out.push(ARRAY_START);
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            out.push(COMMA);
        }
        write_item(out, item)?;
    }
    out.push(ARRAY_END);
    Ok(())
}

fn write_primitives(out: &mut String, array: &PrimitiveArray) -> Result<()> {
    fn plain<T: std::fmt::Display>(out: &mut String, item: &T) -> Result<()> {
        write!(out, "{}", item)?;
        Ok(())
    }

    match array {
        PrimitiveArray::Char(items) => write_joined(out, items, |out, c| {
            out.push_str(&serde_json::to_string(c)?);
            Ok(())
        }),
        PrimitiveArray::Bool(items) => write_joined(out, items, plain),
        PrimitiveArray::I8(items) => write_joined(out, items, plain),
        PrimitiveArray::I16(items) => write_joined(out, items, plain),
        PrimitiveArray::I32(items) => write_joined(out, items, plain),
        PrimitiveArray::I64(items) => write_joined(out, items, plain),
        PrimitiveArray::U8(items) => write_joined(out, items, plain),
        PrimitiveArray::U16(items) => write_joined(out, items, plain),
        PrimitiveArray::U32(items) => write_joined(out, items, plain),
        PrimitiveArray::U64(items) => write_joined(out, items, plain),
        PrimitiveArray::F32(items) => {
            write_joined(out, items, |out, v| plain(out, &Float::F32(*v)))
        }
        PrimitiveArray::F64(items) => {
            write_joined(out, items, |out, v| plain(out, &Float::F64(*v)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cause::Cause;
    use crate::core::value::{Decimal, Numeric};
    use std::collections::{BTreeMap, HashMap};
    use std::sync::atomic::{AtomicI32, AtomicU8};
    use std::sync::Arc;

    fn format(value: impl Into<Value>) -> String {
        JsonEntryFormatter::new().format(&value.into()).unwrap()
    }

    fn nested(levels: usize) -> Value {
        let mut value = Value::from(1);
        for level in (1..=levels).rev() {
            let mut map = BTreeMap::new();
            map.insert(level.to_string(), value);
            value = Value::from(map);
        }
        value
    }

    #[test]
    fn test_null() {
        assert_eq!(format(Value::Null), "null");
        assert_eq!(format(None::<i32>), "null");
    }

    #[test]
    fn test_string_is_escaped() {
        assert_eq!(format("a\"b"), r#""a\"b""#);
        assert_eq!(format("some\u{8}\"\n\ttext"), r#""some\b\"\n\ttext""#);
        assert_eq!(format("back\\slash"), r#""back\\slash""#);
        assert_eq!(format("\u{1}"), r#""\u0001""#);
    }

    #[test]
    fn test_decimal() {
        let decimal: Decimal = "1.35e-40".parse().unwrap();
        assert_eq!(format(decimal), "1.35E-40");
    }

    #[test]
    fn test_floats_use_own_precision() {
        assert_eq!(format(10.0f64), "10.0");
        assert_eq!(format(f64::MAX), "1.7976931348623157e308");
        assert_eq!(format(0.1f32), "0.1");
        assert_eq!(format(f32::MAX), "3.4028235e38");
    }

    #[test]
    fn test_integers() {
        assert_eq!(format(i8::MAX), "127");
        assert_eq!(format(i16::MAX), "32767");
        assert_eq!(format(i32::MIN), "-2147483648");
        assert_eq!(format(i64::MAX), "9223372036854775807");
        assert_eq!(format(u128::MAX), "340282366920938463463374607431768211455");
    }

    #[test]
    fn test_generic_numbers() {
        assert_eq!(format(Arc::new(AtomicI32::new(i32::MIN))), "-2147483648");

        #[derive(Debug)]
        struct Average(f64);

        impl Numeric for Average {
            fn to_i64(&self) -> i64 {
                self.0 as i64
            }

            fn to_f64(&self) -> f64 {
                self.0
            }
        }

        assert_eq!(format(Value::number(Average(f64::MAX))), "1.7976931348623157e308");
        assert_eq!(format(Value::number(Average(2.5))), "2.5");
        assert_eq!(format(Value::number(Average(-4.0))), "-4");
    }

    #[test]
    fn test_boolean() {
        assert_eq!(format(true), "true");
    }

    #[test]
    fn test_collections() {
        assert_eq!(format(vec![Value::from(true), Value::from(127i8)]), "[true,127]");

        let mut inner = BTreeMap::new();
        inner.insert("a", true);
        assert_eq!(format(vec![inner]), r#"[{"a":true}]"#);
    }

    #[test]
    fn test_map() {
        let mut map = BTreeMap::new();
        map.insert("a", Value::from(true));
        map.insert("b", Value::from(127i8));
        assert_eq!(format(map), r#"{"a":true,"b":127}"#);
    }

    #[test]
    fn test_map_keys_are_escaped() {
        let mut map = HashMap::new();
        map.insert("a\nb", true);
        assert_eq!(format(map), r#"{"a\nb":true}"#);
    }

    #[test]
    fn test_map_keys_are_converted_to_text() {
        let mut map = HashMap::new();
        map.insert(10, true);
        assert_eq!(format(map), r#"{"10":true}"#);
    }

    #[test]
    fn test_nested_within_map() {
        let mut map = HashMap::new();
        map.insert("a", vec![127i8]);
        assert_eq!(format(map), r#"{"a":[127]}"#);
    }

    #[test]
    fn test_null_map_key_fails() {
        let mut map = HashMap::new();
        map.insert(None::<String>, 10);

        let err = JsonEntryFormatter::new()
            .format(&Value::from(map))
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidKey { depth: 0, .. }));
        assert_eq!(err.to_string(), "null key in {null=10} at depth 0");
    }

    #[test]
    fn test_null_map_key_reports_depth() {
        let mut inner = HashMap::new();
        inner.insert(None::<&str>, 1);
        let mut outer = BTreeMap::new();
        outer.insert("x", inner);

        let err = JsonEntryFormatter::new()
            .format(&Value::from(outer))
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidKey { depth: 1, .. }));
    }

    #[test]
    fn test_char_array() {
        assert_eq!(format(Value::from(&[] as &[char])), "[]");
        assert_eq!(format(['a']), r#"["a"]"#);
        assert_eq!(format(['a', 'b']), r#"["a","b"]"#);
        assert_eq!(format(['a', '\u{8}']), r#"["a","\b"]"#);
    }

    #[test]
    fn test_primitive_arrays() {
        assert_eq!(format([true, false]), "[true,false]");
        assert_eq!(format([i8::MIN, i8::MAX]), "[-128,127]");
        assert_eq!(format([i16::MIN, i16::MAX]), "[-32768,32767]");
        assert_eq!(format([i32::MIN, i32::MAX]), "[-2147483648,2147483647]");
        assert_eq!(
            format([i64::MIN, i64::MAX]),
            "[-9223372036854775808,9223372036854775807]"
        );
        assert_eq!(format([10.0f32]), "[10.0]");
        assert_eq!(format([10.0f64, 0.5]), "[10.0,0.5]");
        assert_eq!(format(Value::from(&[] as &[u16])), "[]");
    }

    #[test]
    fn test_object_array() {
        let empty: Box<[Value]> = Box::new([]);
        assert_eq!(format(empty), "[]");

        let items: Box<[Value]> = Box::new([
            Value::from(Arc::new(AtomicU8::new(10))),
            Value::from("hello\n"),
        ]);
        assert_eq!(format(items), r#"[10,"hello\n"]"#);
    }

    #[test]
    fn test_error_is_quoted_trace() {
        #[derive(Debug, thiserror::Error)]
        #[error("query \"users\" failed")]
        struct QueryError {
            #[source]
            source: std::io::Error,
        }

        let cause = Cause::new(QueryError {
            source: std::io::Error::new(std::io::ErrorKind::Other, "connection reset"),
        });

        assert_eq!(
            format(cause),
            r#""query \"users\" failed\nCaused by: connection reset""#
        );
    }

    #[test]
    fn test_display_fallback_is_quoted() {
        assert_eq!(format(Value::display("127.0.0.1:80")), r#""127.0.0.1:80""#);
    }

    #[test]
    fn test_max_depth_matched() {
        let formatter = JsonEntryFormatter::new();
        let text = formatter.format(&nested(8)).unwrap();
        assert_eq!(
            text,
            r#"{"1":{"2":{"3":{"4":{"5":{"6":{"7":{"8":1}}}}}}}}"#
        );
    }

    #[test]
    fn test_max_depth_exceeded() {
        let err = JsonEntryFormatter::new().format(&nested(9)).unwrap_err();
        assert!(matches!(err, LoggerError::DepthExceeded { max_depth: 8 }));
        assert_eq!(err.to_string(), "Max depth of 8 exceeded");
    }

    #[test]
    fn test_custom_max_depth() {
        let formatter = JsonEntryFormatter::new().with_max_depth(1);
        assert!(formatter.format(&Value::from(vec![vec![1]])).is_err());
        assert_eq!(formatter.format(&Value::from(vec![1])).unwrap(), "[1]");
        assert_eq!(formatter.max_depth(), 1);
    }

    #[test]
    fn test_formatting_is_stable() {
        let mut map = BTreeMap::new();
        map.insert("z", 1);
        map.insert("a", 2);
        map.insert("m", 3);
        let value = Value::from(map);

        let formatter = JsonEntryFormatter::new();
        let first = formatter.format(&value).unwrap();
        assert_eq!(first, formatter.format(&value).unwrap());
        assert_eq!(first, r#"{"a":2,"m":3,"z":1}"#);
    }

    #[test]
    fn test_cause_in_message_flag() {
        assert!(!JsonEntryFormatter::new().cause_in_message());
        assert!(JsonEntryFormatter::new()
            .with_cause_in_message(true)
            .cause_in_message());
    }
}
