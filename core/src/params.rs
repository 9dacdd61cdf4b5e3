//! Caller-supplied request parameters and their encodings.
//!
//! # Design
//! A single `Params` value covers the three shapes a caller may hand to the
//! client: a pre-encoded string, opaque bytes, or a structured JSON value.
//! Each verb picks the encoding it needs: GET appends a query string, POST
//! sends a form body, PUT sends JSON.
//!
//! Form encoding mirrors the conventions most PHP/Rails style backends expect:
//! nested containers flatten to `key[sub]=value`, booleans become `1`/`0` and
//! `null` entries are dropped.

use std::fmt;

use serde_json::{Map, Value};
use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    /// Already encoded; sent or appended verbatim.
    Raw(String),

    /// Opaque payload, e.g. file contents or a pre-built multipart body.
    Bytes(Vec<u8>),

    /// A JSON value, form-encoded or JSON-serialized depending on the verb.
    Structured(Value),
}

impl Params {
    /// True when encoding would produce nothing worth sending.
    pub fn is_empty(&self) -> bool {
        match self {
            Params::Raw(s) => s.is_empty(),
            Params::Bytes(b) => b.is_empty(),
            Params::Structured(Value::Object(map)) => map.is_empty(),
            Params::Structured(Value::Array(items)) => items.is_empty(),
            Params::Structured(Value::String(s)) => s.is_empty(),
            Params::Structured(Value::Null) => true,
            Params::Structured(_) => false,
        }
    }

    /// Encode as an `application/x-www-form-urlencoded` string.
    ///
    /// Strings and bytes pass through unchanged; containers are flattened.
    pub fn to_form(&self) -> String {
        match self {
            Params::Raw(s) => s.clone(),
            Params::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            Params::Structured(value) => build_query(value),
        }
    }

    /// Encode as a JSON document. Strings and bytes are taken to be JSON
    /// already and pass through unchanged.
    pub fn to_json_bytes(&self) -> Vec<u8> {
        match self {
            Params::Raw(s) => s.clone().into_bytes(),
            Params::Bytes(b) => b.clone(),
            Params::Structured(Value::String(s)) => s.clone().into_bytes(),
            Params::Structured(value) => value.to_string().into_bytes(),
        }
    }

    /// The payload exactly as the caller provided it.
    pub fn to_raw_bytes(&self) -> Vec<u8> {
        match self {
            Params::Raw(s) => s.clone().into_bytes(),
            Params::Bytes(b) => b.clone(),
            Params::Structured(Value::String(s)) => s.clone().into_bytes(),
            Params::Structured(value) => build_query(value).into_bytes(),
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Params::Structured(Value::Object(Map::new()))
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Params::Raw(s) => f.write_str(s),
            Params::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Params::Structured(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Params {
    fn from(s: &str) -> Self {
        Params::Raw(s.to_string())
    }
}

impl From<String> for Params {
    fn from(s: String) -> Self {
        Params::Raw(s)
    }
}

impl From<Vec<u8>> for Params {
    fn from(b: Vec<u8>) -> Self {
        Params::Bytes(b)
    }
}

impl From<&[u8]> for Params {
    fn from(b: &[u8]) -> Self {
        Params::Bytes(b.to_vec())
    }
}

impl From<Value> for Params {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Params::Raw(s),
            other => Params::Structured(other),
        }
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Params::Structured(Value::Object(map))
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Params
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        let map: Map<String, Value> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Params::Structured(Value::Object(map))
    }
}

/// Join `query` onto `url`, using `&` if the URL already carries a query
/// string and `?` otherwise. An empty query leaves the URL untouched.
pub fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

/// Form-encode a JSON value, flattening nested containers into bracketed keys.
pub fn build_query(value: &Value) -> String {
    let mut pairs = Vec::new();
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                flatten(key.clone(), v, &mut pairs);
            }
        }
        Value::Array(items) => {
            for (index, v) in items.iter().enumerate() {
                flatten(index.to_string(), v, &mut pairs);
            }
        }
        Value::String(s) => return s.clone(),
        Value::Null => return String::new(),
        scalar => return scalar_string(scalar).unwrap_or_default(),
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (k, v) in &pairs {
        serializer.append_pair(k, v);
    }
    serializer.finish()
}

fn flatten(prefix: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                flatten(format!("{prefix}[{key}]"), v, out);
            }
        }
        Value::Array(items) => {
            for (index, v) in items.iter().enumerate() {
                flatten(format!("{prefix}[{index}]"), v, out);
            }
        }
        scalar => {
            if let Some(s) = scalar_string(scalar) {
                out.push((prefix, s));
            }
        }
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some("0".to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
