//! Dynamic SQL values.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// How a value is rendered into a fragment buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quote {
    /// SQL literal text: strings quoted and escaped, NULL spelled out.
    #[default]
    Sql,
    /// Raw identity text for in-memory keys. Never sent to the database.
    Raw,
}

/// A dynamically-typed SQL value.
///
/// Scalar slots of a record expose their content as a `Value`; field
/// descriptors render it into SQL text or composite-key text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// NULL value
    Null,

    /// Boolean value
    Bool(bool),

    /// 8-bit signed integer
    TinyInt(i8),

    /// 16-bit signed integer
    SmallInt(i16),

    /// 32-bit signed integer
    Int(i32),

    /// 64-bit signed integer
    BigInt(i64),

    /// 32-bit floating point
    Float(f32),

    /// 64-bit floating point
    Double(f64),

    /// Arbitrary precision decimal (stored as string)
    Decimal(String),

    /// Text string
    Text(String),

    /// Binary data
    Bytes(Vec<u8>),

    /// UUID (as 16 bytes)
    Uuid([u8; 16]),

    /// JSON value
    Json(serde_json::Value),

    /// SQL DEFAULT keyword
    Default,
}

impl Value {
    /// Check if this value is NULL.
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Decimal(s) => Some(s),
            _ => None,
        }
    }

    /// Convert a `u64` to `Value` without loss.
    ///
    /// Values above `i64::MAX` become a [`Value::Decimal`] holding the exact
    /// digits, so distinct inputs always render distinctly.
    ///
    /// ```
    /// use relwalk_core::Value;
    ///
    /// assert_eq!(Value::from_u64(42), Value::BigInt(42));
    /// assert_eq!(
    ///     Value::from_u64(u64::MAX),
    ///     Value::Decimal("18446744073709551615".to_string())
    /// );
    /// ```
    #[must_use]
    pub fn from_u64(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(signed) => Value::BigInt(signed),
            Err(_) => Value::Decimal(v.to_string()),
        }
    }

    /// Append this value to `buf`.
    ///
    /// With [`Quote::Sql`] the output is a SQL literal; with [`Quote::Raw`]
    /// it is the bare textual form used for composite keys (NULL and DEFAULT
    /// render as nothing).
    ///
    /// ```
    /// use relwalk_core::{Quote, Value};
    ///
    /// let mut buf = Vec::new();
    /// Value::Text("it's".into()).append_sql(&mut buf, Quote::Sql);
    /// assert_eq!(buf, b"'it''s'");
    ///
    /// buf.clear();
    /// Value::Text("it's".into()).append_sql(&mut buf, Quote::Raw);
    /// assert_eq!(buf, b"it's");
    /// ```
    pub fn append_sql(&self, buf: &mut Vec<u8>, quote: Quote) {
        match self {
            Value::Null => {
                if quote == Quote::Sql {
                    buf.extend_from_slice(b"NULL");
                }
            }
            Value::Default => {
                if quote == Quote::Sql {
                    buf.extend_from_slice(b"DEFAULT");
                }
            }
            Value::Bool(true) => buf.extend_from_slice(b"TRUE"),
            Value::Bool(false) => buf.extend_from_slice(b"FALSE"),
            Value::TinyInt(v) => append_display(buf, v),
            Value::SmallInt(v) => append_display(buf, v),
            Value::Int(v) => append_display(buf, v),
            Value::BigInt(v) => append_display(buf, v),
            Value::Float(v) => {
                let (text, finite) = float_text(f64::from(*v), || v.to_string());
                append_float(buf, &text, finite, quote);
            }
            Value::Double(v) => {
                let (text, finite) = float_text(*v, || v.to_string());
                append_float(buf, &text, finite, quote);
            }
            Value::Decimal(s) => buf.extend_from_slice(s.as_bytes()),
            Value::Text(s) => append_string(buf, s, quote),
            Value::Bytes(bytes) => {
                if quote == Quote::Sql {
                    buf.extend_from_slice(b"'\\x");
                }
                append_hex(buf, bytes);
                if quote == Quote::Sql {
                    buf.push(b'\'');
                }
            }
            Value::Uuid(bytes) => {
                if quote == Quote::Sql {
                    buf.push(b'\'');
                }
                let groups = [0..4, 4..6, 6..8, 8..10, 10..16];
                for (i, range) in groups.into_iter().enumerate() {
                    if i > 0 {
                        buf.push(b'-');
                    }
                    append_hex(buf, &bytes[range]);
                }
                if quote == Quote::Sql {
                    buf.push(b'\'');
                }
            }
            Value::Json(json) => append_string(buf, &json.to_string(), quote),
        }
    }
}

fn append_display(buf: &mut Vec<u8>, v: impl std::fmt::Display) {
    let mut s = String::new();
    let _ = write!(s, "{v}");
    buf.extend_from_slice(s.as_bytes());
}

fn append_float(buf: &mut Vec<u8>, text: &str, finite: bool, quote: Quote) {
    if finite {
        buf.extend_from_slice(text.as_bytes());
    } else {
        append_string(buf, text, quote);
    }
}

fn float_text(v: f64, finite_text: impl FnOnce() -> String) -> (String, bool) {
    if v.is_nan() {
        ("NaN".to_string(), false)
    } else if v.is_infinite() {
        let text = if v > 0.0 { "Infinity" } else { "-Infinity" };
        (text.to_string(), false)
    } else {
        (finite_text(), true)
    }
}

fn append_string(buf: &mut Vec<u8>, s: &str, quote: Quote) {
    match quote {
        Quote::Raw => buf.extend_from_slice(s.as_bytes()),
        Quote::Sql => {
            buf.push(b'\'');
            for &b in s.as_bytes() {
                if b == b'\'' {
                    buf.push(b'\'');
                }
                buf.push(b);
            }
            buf.push(b'\'');
        }
    }
}

fn append_hex(buf: &mut Vec<u8>, bytes: &[u8]) {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    for &b in bytes {
        buf.push(HEX[usize::from(b >> 4)]);
        buf.push(HEX[usize::from(b & 0x0f)]);
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::TinyInt(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::SmallInt(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::BigInt(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::SmallInt(i16::from(v))
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::Int(i32::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::from_u64(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::BigInt(i64::from(v))
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl From<[u8; 16]> for Value {
    fn from(v: [u8; 16]) -> Self {
        Value::Uuid(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
