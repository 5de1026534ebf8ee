//! Typed message field values.

use serde::Serialize;
use std::fmt;

/// A message field value.
///
/// The set of kinds is closed so backends can map every value without a
/// fallback branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Text
    Str(String),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Boolean flag
    Bool(bool),
    /// Raw bytes
    Bytes(Vec<u8>),
}

impl Value {
    /// The value as an integer, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The value as a string slice, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Bytes(bytes) => {
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

/// Ordered key-value fields attached to a message.
///
/// Built with [`Fields::with`], so keys and values always come in pairs.
///
/// # Example
///
/// ```
/// use commonlog_types::{Fields, Value};
///
/// let fields = Fields::new()
///     .with("request", 42)
///     .with("path", "/index.html");
///
/// assert_eq!(fields.get("request"), Some(&Value::Int(42)));
/// assert_eq!(fields.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Fields(Vec<(String, Value)>);

impl Fields {
    /// Create empty fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Add or replace a field.
    ///
    /// Returns `true` if the key was not present before.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => {
                *existing = value;
                false
            }
            None => {
                self.0.push((key, value));
                true
            }
        }
    }

    /// Apply every field of `other`, replacing existing keys.
    ///
    /// Returns `true` if any new key was added.
    pub fn merge(&mut self, other: &Fields) -> bool {
        let mut added = false;
        for (key, value) in other.iter() {
            if self.set(key.clone(), value.clone()) {
                added = true;
            }
        }
        added
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterate over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, Value)> {
        self.0.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (key, value) in iter {
            fields.set(key, value);
        }
        fields
    }
}

impl IntoIterator for Fields {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut fields = Fields::new().with("a", 1).with("b", "two");
        assert!(!fields.set("a", 10));
        assert!(fields.set("c", true));

        let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(fields.get("a"), Some(&Value::Int(10)));
    }

    #[test]
    fn test_merge_reports_new_keys() {
        let mut base = Fields::new().with("a", 1);
        assert!(!base.merge(&Fields::new().with("a", 2)));
        assert!(base.merge(&Fields::new().with("b", 3)));
        assert_eq!(base.get("a"), Some(&Value::Int(2)));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from("x").to_string(), "x");
        assert_eq!(Value::from(-3).to_string(), "-3");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(false).to_string(), "false");
        assert_eq!(Value::from(vec![0xde, 0xad, 0x01]).to_string(), "dead01");
    }

    #[test]
    fn test_from_iterator() {
        let fields: Fields = vec![("k", 1), ("k", 2)].into_iter().collect();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("k").and_then(Value::as_int), Some(2));
    }
}
