//! Table-literal text encoding
//!
//! Output follows the layout the mission editor itself writes: tab
//! indentation, bracketed keys and `-- end of` trailers after every nested
//! table.

use super::value::{Key, Table, Value};
use std::fmt::Write;

/// Encode `value` as a top-level assignment to `root`.
#[must_use]
pub fn encode(value: &Value, root: &str) -> String {
    match value {
        Value::Table(table) => encode_table(table, root),
        scalar => format!("{root} = {}\n", scalar_literal(scalar)),
    }
}

/// Encode a table as a top-level assignment to `root`.
#[must_use]
pub fn encode_table(table: &Table, root: &str) -> String {
    let mut out = String::new();
    out.push_str(root);
    out.push_str(" = \n{\n");
    write_entries(&mut out, table, 1);
    let _ = writeln!(out, "}} -- end of {root}");
    out
}

fn write_entries(out: &mut String, table: &Table, depth: usize) {
    let indent = "\t".repeat(depth);
    for (key, value) in table.sorted_entries() {
        let key_literal = key_literal(key);
        match value {
            Value::Table(inner) => {
                let _ = writeln!(out, "{indent}{key_literal} = ");
                let _ = writeln!(out, "{indent}{{");
                write_entries(out, inner, depth + 1);
                let _ = writeln!(out, "{indent}}}, -- end of {key_literal}");
            }
            scalar => {
                let _ = writeln!(out, "{indent}{key_literal} = {},", scalar_literal(scalar));
            }
        }
    }
}

fn key_literal(key: &Key) -> String {
    match key {
        Key::Int(i) => format!("[{i}]"),
        Key::Str(s) => format!("[{}]", quote(s)),
    }
}

fn scalar_literal(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => float_literal(*f),
        Value::Str(s) => quote(s),
        Value::Table(_) => String::from("{}"),
    }
}

fn float_literal(f: f64) -> String {
    if f.is_nan() {
        String::from("0/0")
    } else if f.is_infinite() {
        if f > 0.0 { "1e999".into() } else { "-1e999".into() }
    } else {
        // Display is the shortest representation that parses back exactly.
        // Integral values keep a fraction so they decode as floats again.
        let text = f.to_string();
        if text.contains('.') { text } else { format!("{text}.0") }
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\\n"),
            '\r' => out.push_str("\\r"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\{:03}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
