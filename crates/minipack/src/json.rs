//! Conversions between [`Value`] and `serde_json::Value`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::Value;

/// Prefix used when a binary blob is rendered as a JSON string.
pub const BINARY_DATA_URI_PREFIX: &str = "data:application/octet-stream;base64,";

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInteger(u)
                } else {
                    Value::number(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(arr) => Value::Arr(arr.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(obj) => Value::Map(
                obj.into_iter()
                    .map(|(k, v)| (Value::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// JSON has no binary type or non-string keys, so this direction is lossy:
/// blobs become base64 data URIs, other keys their compact JSON text, and
/// non-finite floats `null`.
impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Nil => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Integer(i) => serde_json::json!(i),
            Value::UInteger(u) => serde_json::json!(u),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Str(s) => serde_json::Value::String(s),
            Value::Bin(b) => {
                serde_json::Value::String(format!("{BINARY_DATA_URI_PREFIX}{}", STANDARD.encode(b)))
            }
            Value::Arr(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Map(pairs) => serde_json::Value::Object(
                pairs
                    .into_iter()
                    .map(|(k, v)| (json_key(k), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

fn json_key(key: Value) -> String {
    match key {
        Value::Str(s) => s,
        other => serde_json::Value::from(other).to_string(),
    }
}
