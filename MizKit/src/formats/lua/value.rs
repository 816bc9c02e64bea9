//! Decoded table-literal values

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// 2^63, the first float past the `i64` range.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// A table key. Lua tables only ever key mission data by integer or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Integer key, used for every sequential collection.
    Int(i64),
    /// String key.
    Str(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{i}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i64::from(i))
    }
}

/// A decoded scalar or nested table.
///
/// Integers and floats are kept apart so an integer never picks up a
/// decimal point on the way back out.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Table(Table),
}

impl Value {
    /// Short name of the value's type, for error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "number",
            Value::Str(_) => "string",
            Value::Table(_) => "table",
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view. Floats with no fractional part count as integers.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 && *f >= -I64_BOUND && *f < I64_BOUND => {
                Some(*f as i64)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// True for a table with no entries.
    #[must_use]
    pub fn is_empty_table(&self) -> bool {
        matches!(self, Value::Table(t) if t.is_empty())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Table> for Value {
    fn from(t: Table) -> Self {
        Value::Table(t)
    }
}

/// An ordered key/value table.
///
/// Insertion order is preserved so passthrough blobs keep their shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    entries: IndexMap<Key, Value>,
}

impl Table {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dense 1-based sequence from `items`, in iteration order.
    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut table = Table::new();
        for (idx, item) in items.into_iter().enumerate() {
            table.insert(idx as i64 + 1, item);
        }
        table
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.entries.get(&key.into())
    }

    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value> {
        self.entries.get_mut(&key.into())
    }

    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Insert or overwrite, returning the previous value.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove an entry, keeping the order of the rest.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.entries.shift_remove(&key.into())
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.entries.keys()
    }

    /// Values of a dense 1-based sequence in key order.
    ///
    /// Returns `None` unless the keys are exactly `1..=len`.
    #[must_use]
    pub fn dense_values(&self) -> Option<Vec<&Value>> {
        (1..=self.entries.len() as i64)
            .map(|idx| self.entries.get(&Key::Int(idx)))
            .collect()
    }

    /// Entries sorted the way the writer emits them: integer keys first,
    /// then string keys, each ascending.
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(&Key, &Value)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(Key, Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        Table {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Table(t) => t.serialize(serializer),
        }
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Dense sequences read better as JSON arrays
        if !self.is_empty()
            && let Some(values) = self.dense_values()
        {
            let mut seq = serializer.serialize_seq(Some(values.len()))?;
            for value in values {
                seq.serialize_element(value)?;
            }
            return seq.end();
        }

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_dense_and_one_based() {
        let table = Table::sequence(["a", "b", "c"]);
        assert_eq!(table.get(1), Some(&Value::from("a")));
        assert_eq!(table.get(3), Some(&Value::from("c")));
        assert!(table.get(0).is_none());
        assert_eq!(table.dense_values().map(|v| v.len()), Some(3));
    }

    #[test]
    fn test_dense_values_rejects_gaps() {
        let mut table = Table::new();
        table.insert(1, 10);
        table.insert(3, 30);
        assert!(table.dense_values().is_none());

        let mut named = Table::new();
        named.insert("x", 1.5);
        assert!(named.dense_values().is_none());
    }

    #[test]
    fn test_integral_float_reads_as_integer() {
        assert_eq!(Value::Float(4.0).as_i64(), Some(4));
        assert_eq!(Value::Float(4.5).as_i64(), None);
        assert_eq!(Value::Int(7).as_f64(), Some(7.0));
    }

    #[test]
    fn test_out_of_range_float_is_not_an_integer() {
        assert_eq!(Value::Float(1e300).as_i64(), None);
        assert_eq!(Value::Float(-1e19).as_i64(), None);
        assert_eq!(Value::Float(9_223_372_036_854_775_808.0).as_i64(), None);
        assert_eq!(Value::Float(-9_223_372_036_854_775_808.0).as_i64(), Some(i64::MIN));
        assert_eq!(Value::Float(f64::NAN).as_i64(), None);
        assert_eq!(Value::Float(f64::INFINITY).as_i64(), None);
    }

    #[test]
    fn test_sorted_entries_puts_integers_first() {
        let mut table = Table::new();
        table.insert("b", 1);
        table.insert(2, 1);
        table.insert("a", 1);
        table.insert(1, 1);
        let keys: Vec<String> = table.sorted_entries().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, ["1", "2", "a", "b"]);
    }

    #[test]
    fn test_json_serialization_uses_arrays_for_sequences() {
        let mut table = Table::new();
        table.insert("units", Table::sequence([1, 2]));
        table.insert("name", "Convoy");
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"units":[1,2],"name":"Convoy"}"#);
    }
}
