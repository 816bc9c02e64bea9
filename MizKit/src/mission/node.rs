//! Path-tracking read access to decoded tables
//!
//! Every accessor reports failures as [`Error::StructuralMismatch`] with the
//! dotted path of the offending key.

use crate::error::{Error, Result};
use crate::formats::lua::{Key, Table, Value};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Node<'a, 'p> {
    table: &'a Table,
    path: &'p str,
}

impl<'a, 'p> Node<'a, 'p> {
    pub(crate) fn new(table: &'a Table, path: &'p str) -> Self {
        Self { table, path }
    }

    pub(crate) fn table(&self) -> &'a Table {
        self.table
    }

    pub(crate) fn child_path(&self, key: impl std::fmt::Display) -> String {
        format!("{}.{key}", self.path)
    }

    pub(crate) fn opt(&self, key: &str) -> Option<&'a Value> {
        self.table.get(key)
    }

    pub(crate) fn has(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    pub(crate) fn value(&self, key: &str) -> Result<&'a Value> {
        self.opt(key)
            .ok_or_else(|| Error::structural(self.child_path(key), "required key is missing"))
    }

    fn mismatch(&self, key: &str, expected: &str, found: &Value) -> Error {
        Error::structural(
            self.child_path(key),
            format!("expected {expected}, found {}", found.type_name()),
        )
    }

    pub(crate) fn str(&self, key: &str) -> Result<&'a str> {
        let value = self.value(key)?;
        value
            .as_str()
            .ok_or_else(|| self.mismatch(key, "string", value))
    }

    pub(crate) fn string(&self, key: &str) -> Result<String> {
        self.str(key).map(str::to_string)
    }

    pub(crate) fn i64(&self, key: &str) -> Result<i64> {
        let value = self.value(key)?;
        value
            .as_i64()
            .ok_or_else(|| self.mismatch(key, "integer", value))
    }

    pub(crate) fn f64(&self, key: &str) -> Result<f64> {
        let value = self.value(key)?;
        value
            .as_f64()
            .ok_or_else(|| self.mismatch(key, "number", value))
    }

    pub(crate) fn bool(&self, key: &str) -> Result<bool> {
        let value = self.value(key)?;
        value
            .as_bool()
            .ok_or_else(|| self.mismatch(key, "boolean", value))
    }

    pub(crate) fn opt_str(&self, key: &str, default: &str) -> Result<String> {
        if self.has(key) { self.string(key) } else { Ok(default.to_string()) }
    }

    pub(crate) fn opt_i64(&self, key: &str, default: i64) -> Result<i64> {
        if self.has(key) { self.i64(key) } else { Ok(default) }
    }

    pub(crate) fn opt_f64(&self, key: &str, default: f64) -> Result<f64> {
        if self.has(key) { self.f64(key) } else { Ok(default) }
    }

    pub(crate) fn opt_bool(&self, key: &str, default: bool) -> Result<bool> {
        if self.has(key) { self.bool(key) } else { Ok(default) }
    }

    /// Integer stored under a positional key.
    pub(crate) fn i64_at(&self, idx: i64) -> Result<i64> {
        let path = self.child_path(idx);
        let value = self
            .table
            .get(idx)
            .ok_or_else(|| Error::structural(&path, "required key is missing"))?;
        value.as_i64().ok_or_else(|| {
            Error::structural(&path, format!("expected integer, found {}", value.type_name()))
        })
    }

    /// A nested table together with its path.
    pub(crate) fn child(&self, key: &str) -> Result<(&'a Table, String)> {
        let value = self.value(key)?;
        value
            .as_table()
            .map(|table| (table, self.child_path(key)))
            .ok_or_else(|| self.mismatch(key, "table", value))
    }

    pub(crate) fn opt_child(&self, key: &str) -> Result<Option<(&'a Table, String)>> {
        if self.has(key) { self.child(key).map(Some) } else { Ok(None) }
    }

    /// A nested table copied out verbatim.
    pub(crate) fn opt_table(&self, key: &str) -> Result<Option<Table>> {
        Ok(self.opt_child(key)?.map(|(table, _)| table.clone()))
    }

    /// The items of this node as a dense 1-based sequence of tables, each
    /// paired with its path.
    pub(crate) fn items(&self) -> Result<Vec<(&'a Table, String)>> {
        let values = self
            .table
            .dense_values()
            .ok_or_else(|| Error::structural(self.path, "expected a dense 1-based sequence"))?;
        values
            .into_iter()
            .enumerate()
            .map(|(idx, value)| {
                let path = self.child_path(idx + 1);
                value.as_table().map(|table| (table, path.clone())).ok_or_else(|| {
                    Error::structural(path, format!("expected table, found {}", value.type_name()))
                })
            })
            .collect()
    }

    /// Integer-keyed entries in ascending key order.
    pub(crate) fn int_entries(&self) -> Result<Vec<(i64, &'a Value)>> {
        let mut entries = self
            .table
            .iter()
            .map(|(key, value)| match key {
                Key::Int(i) => Ok((*i, value)),
                Key::Str(s) => Err(Error::structural(self.child_path(s), "expected integer key")),
            })
            .collect::<Result<Vec<_>>>()?;
        entries.sort_by_key(|(key, _)| *key);
        Ok(entries)
    }
}
