//! Tree representation of Terraform plan values.

use serde::de::{Deserialize, Deserializer};

/// A value taken from one of a plan's change trees (`before`, `after`,
/// `after_unknown`, `after_sensitive`).
///
/// Object entries keep the order they have in the plan document, and numbers
/// keep their original text, so `80` and `1.50` render back exactly as
/// Terraform wrote them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(String),
    String(String),
    Object(Vec<(String, Value)>),
    Array(Vec<Value>),
}

impl Value {
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
        }
    }

    /// Looks up a key in an object value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// True for the values the renderer elides when unchanged: null, empty
    /// string, empty object, empty array.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Object(entries) => entries.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    /// An array whose elements are all objects. Terraform renders these as
    /// repeated named blocks rather than a bracketed list. An empty array
    /// qualifies (and is then suppressed as empty anyway).
    pub fn is_object_array(&self) -> bool {
        match self {
            Value::Array(items) => items.iter().all(|item| matches!(item, Value::Object(_))),
            _ => false,
        }
    }

    /// A non-empty array containing no objects or nested arrays.
    pub fn is_primitive_array(&self) -> bool {
        match self {
            Value::Array(items) => {
                !items.is_empty()
                    && items
                        .iter()
                        .all(|item| !matches!(item, Value::Object(_) | Value::Array(_)))
            }
            _ => false,
        }
    }

    /// Block-typed values: nested objects and arrays of objects. These sort
    /// after scalar attributes and are excluded from name-column alignment.
    pub fn is_block(&self) -> bool {
        matches!(self, Value::Object(_)) || self.is_object_array()
    }

    /// An object whose values are all scalars. Maps render with quoted keys
    /// and count their hidden entries as "elements" rather than "attributes".
    pub fn is_map(&self) -> bool {
        match self {
            Value::Object(entries) => entries
                .iter()
                .all(|(_, value)| !matches!(value, Value::Object(_) | Value::Array(_))),
            _ => false,
        }
    }

    /// Checks whether two values are semantically equal. Numbers compare by
    /// numeric value, so `1` equals `1.0`; objects compare by key regardless
    /// of entry order; arrays compare positionally.
    pub fn semantic_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => {
                a == b
                    || match (a.parse::<f64>(), b.parse::<f64>()) {
                        (Ok(x), Ok(y)) => x == y,
                        _ => false,
                    }
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        other.get(key).is_some_and(|v| value.semantic_equals(v))
                    })
            }
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(item_a, item_b)| item_a.semantic_equals(item_b))
            }
            _ => false,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.to_string()),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(serde_json::Value::deserialize(deserializer)?.into())
    }
}
