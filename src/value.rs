//! Decoding of typed update payloads into generic values.

use crate::error::{MapperError, Result};
use crate::types::{Path, TypedValue, ValueType};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// A decoded update value.
///
/// Numbers keep their source text, so large integers and long decimals
/// survive decoding without rounding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
    /// Raw payload of a BYTES update.
    Bytes(Vec<u8>),
}

impl Value {
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Rewrite every object key, at every depth, through `escape`.
    pub fn escape_keys(self, escape: &dyn Fn(&str) -> String) -> Value {
        match self {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (escape(&k), v.escape_keys(escape)))
                    .collect(),
            ),
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|v| v.escape_keys(escape)).collect())
            }
            other => other,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => serializer.collect_seq(items),
            Value::Object(map) => serializer.collect_map(map),
            // Byte slices marshal to JSON as standard base64 text.
            Value::Bytes(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
        }
    }
}

/// Decode an update payload according to its type tag.
///
/// `path` is only used to give errors context.
pub fn decode_value(value: &TypedValue, path: &Path) -> Result<Value> {
    match value.value_type {
        ValueType::Json => {
            let decoded: serde_json::Value =
                serde_json::from_slice(&value.payload).map_err(|e| {
                    tracing::debug!(%path, error = %e, "malformed JSON update");
                    MapperError::MalformedJsonValue {
                        path: path.clone(),
                        reason: e.to_string(),
                    }
                })?;
            Ok(Value::from(decoded))
        }
        ValueType::Bytes => Ok(Value::Bytes(value.payload.clone())),
        other => Err(MapperError::UnsupportedValueType {
            value_type: other,
            path: path.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> Path {
        Path::from(["a"])
    }

    #[test]
    fn test_decode_json_object() {
        let value = decode_value(&TypedValue::json(r#"{"x": [1, true, null]}"#), &path()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(
            obj["x"],
            Value::Array(vec![
                Value::Number(1.into()),
                Value::Bool(true),
                Value::Null
            ])
        );
    }

    #[test]
    fn test_decode_keeps_number_precision() {
        let text = "123456789012345678901234567890.000000000000000001";
        let value = decode_value(&TypedValue::json(text), &path()).unwrap();
        match value {
            Value::Number(n) => assert_eq!(n.to_string(), text),
            other => panic!("expected number, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_bytes_passthrough() {
        // Not valid UTF-8 and not JSON.
        let payload = vec![0xff, 0x00, b'{', 0xfe];
        let value = decode_value(&TypedValue::bytes(payload.clone()), &path()).unwrap();
        assert_eq!(value.as_bytes(), Some(payload.as_slice()));
    }

    #[test]
    fn test_decode_malformed_json() {
        let result = decode_value(&TypedValue::json("{not json"), &path());
        assert!(matches!(
            result,
            Err(MapperError::MalformedJsonValue { ref path, .. }) if *path == Path::from(["a"])
        ));
    }

    #[test]
    fn test_decode_unsupported_type() {
        let value = TypedValue {
            value_type: ValueType::Proto,
            payload: vec![1, 2, 3],
        };
        assert!(matches!(
            decode_value(&value, &path()),
            Err(MapperError::UnsupportedValueType {
                value_type: ValueType::Proto,
                ..
            })
        ));
    }

    #[test]
    fn test_escape_keys_nested() {
        let value = decode_value(
            &TypedValue::json(r#"{"a.b": {"c.d": 1}, "list": [{"e.f": 2}]}"#),
            &path(),
        )
        .unwrap();
        let escaped = value.escape_keys(&|k: &str| k.replace('.', "_"));

        let json = serde_json::to_value(&escaped).unwrap();
        assert_eq!(json["a_b"]["c_d"], 1);
        assert_eq!(json["list"][0]["e_f"], 2);
    }

    #[test]
    fn test_bytes_serialize_as_base64() {
        let json = serde_json::to_string(&Value::Bytes(b"hi".to_vec())).unwrap();
        assert_eq!(json, "\"aGk=\"");
    }
}
