//! Key-value maps carried by loggers and records
//!
//! `FieldMap` backs the persistent context, the persistent custom fields
//! and the ad-hoc data passed at each call site. Values are arbitrary JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Ordered string-keyed map of JSON values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap {
    fields: Map<String, Value>,
}

impl FieldMap {
    /// Create a new empty map
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Add a field (builder version)
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field (mutable version)
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
    }

    /// Shallow merge: every key of `patch` overwrites the same key here
    pub fn merge(&mut self, patch: &FieldMap) {
        for (key, value) in &patch.fields {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// Layer `sources` left to right; later maps win on collision
    pub fn layered(sources: &[&FieldMap]) -> FieldMap {
        let mut merged = FieldMap::new();
        for source in sources {
            merged.merge(source);
        }
        merged
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => format!("{}={}", k, s),
                other => format!("{}={}", k, other),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for FieldMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl From<Map<String, Value>> for FieldMap {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Objects keep their entries, arrays are keyed by index, anything else is empty.
impl From<Value> for FieldMap {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            Value::Array(items) => Self {
                fields: items
                    .into_iter()
                    .enumerate()
                    .map(|(idx, item)| (idx.to_string(), item))
                    .collect(),
            },
            _ => Self::new(),
        }
    }
}

impl From<()> for FieldMap {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

/// `None` is the absent patch
impl<T: Into<FieldMap>> From<Option<T>> for FieldMap {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl From<&FieldMap> for FieldMap {
    fn from(map: &FieldMap) -> Self {
        map.clone()
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
