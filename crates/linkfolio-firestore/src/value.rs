//! Decoding of Firestore's typed value encoding
//!
//! The REST API wraps every value in a single-key object naming its type,
//! e.g. `{"stringValue": "Alice"}` or `{"mapValue": {"fields": {...}}}`.
//! These helpers unwrap that into plain JSON.

use linkfolio_core::{Document, StoreError};
use serde::Deserialize;
use serde_json::{Map, Number, Value};

/// A document as returned by the REST API
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    /// Full resource name, `projects/.../documents/users/alice`
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// One page of a list response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    #[serde(default)]
    pub documents: Vec<RawDocument>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Decode one typed value
pub fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let Some(object) = value.as_object() else {
        return Err(StoreError::decode(format!("expected typed value, got {value}")));
    };
    let Some((kind, inner)) = object.iter().next() else {
        return Err(StoreError::decode("empty typed value"));
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| StoreError::decode("booleanValue is not a boolean")),
        "integerValue" => decode_integer(inner),
        "doubleValue" => decode_double(inner),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| StoreError::decode(format!("{kind} is not a string"))),
        "geoPointValue" => Ok(inner.clone()),
        "mapValue" => {
            let fields = inner.get("fields").and_then(Value::as_object);
            Ok(Value::Object(match fields {
                Some(fields) => decode_fields(fields)?,
                None => Map::new(),
            }))
        }
        "arrayValue" => {
            let values = inner.get("values").and_then(Value::as_array);
            let decoded = values
                .map(|values| values.iter().map(decode_value).collect::<Result<Vec<_>, _>>())
                .transpose()?
                .unwrap_or_default();
            Ok(Value::Array(decoded))
        }
        other => Err(StoreError::decode(format!("unsupported value type {other}"))),
    }
}

// Integers are transported as decimal strings.
fn decode_integer(inner: &Value) -> Result<Value, StoreError> {
    match inner {
        Value::String(s) => s
            .parse::<i64>()
            .map(|n| Value::Number(n.into()))
            .map_err(|e| StoreError::decode(format!("integerValue {s:?}: {e}"))),
        Value::Number(n) => Ok(Value::Number(n.clone())),
        _ => Err(StoreError::decode("integerValue is not a number")),
    }
}

// NaN and infinities have no JSON form and become null.
fn decode_double(inner: &Value) -> Result<Value, StoreError> {
    match inner {
        Value::Number(n) => Ok(Value::Number(n.clone())),
        Value::String(_) => Ok(Value::Null),
        _ => Err(StoreError::decode("doubleValue is not a number")),
    }
    .map(|v| match v {
        Value::Number(n) => n
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        other => other,
    })
}

/// Decode a typed field map
pub fn decode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>, StoreError> {
    fields
        .iter()
        .map(|(key, value)| {
            decode_value(value)
                .map(|decoded| (key.clone(), decoded))
                .map_err(|e| StoreError::decode(format!("field {key}: {e}")))
        })
        .collect()
}

/// Turn a REST document into a store [`Document`]
pub fn decode_document(raw: &RawDocument) -> Result<Document, StoreError> {
    let id = raw
        .name
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| StoreError::decode(format!("document name {:?} has no id", raw.name)))?;

    Ok(Document::new(id, decode_fields(&raw.fields)?))
}
