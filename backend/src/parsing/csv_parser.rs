//! Minimal comma-separated table parser.
//!
//! Line 1 is the header; every following line is a value row matched to the
//! header positionally. Quoted fields and embedded commas are **not**
//! supported: a comma always separates fields. The upstream datasets are
//! exported without quoting, so this is a known limitation rather than a
//! parsing error.

use serde::{Deserialize, Serialize};

const FIELD_SEPARATOR: char = ',';
const UTF8_BOM: char = '\u{feff}';

/// One parsed data line: column name to trimmed raw value.
///
/// Keys keep header order. When a header repeats a name the first position
/// is kept and the value of the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, overwriting the value of an existing key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Exact-key lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// A parsed table: header columns plus data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize back to comma-separated text, one `\n`-terminated line per row.
    ///
    /// Values are written as stored, so `parse_csv(table.to_csv())` yields the
    /// same trimmed values (given no value contains a comma or newline).
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        if self.columns.is_empty() {
            return out;
        }

        out.push_str(&self.columns.join(","));
        out.push('\n');

        for row in &self.rows {
            let values: Vec<&str> = self
                .columns
                .iter()
                .map(|c| row.get(c).unwrap_or(""))
                .collect();
            out.push_str(&values.join(","));
            out.push('\n');
        }

        out
    }
}

/// Parse comma-separated text into a [`Table`].
///
/// Never fails: empty input yields an empty table, short lines are padded
/// with empty strings and surplus values are ignored.
pub fn parse_csv(text: &str) -> Table {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let normalized = normalized.trim_start_matches(UTF8_BOM).trim();

    if normalized.is_empty() {
        return Table::default();
    }

    let mut lines = normalized.split('\n');
    let columns: Vec<String> = match lines.next() {
        Some(header) => header
            .split(FIELD_SEPARATOR)
            .map(|c| c.trim().to_string())
            .collect(),
        None => return Table::default(),
    };

    let rows = lines
        .map(|line| {
            let values: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
            columns
                .iter()
                .enumerate()
                .map(|(i, col)| (col.as_str(), values.get(i).copied().unwrap_or("").trim()))
                .collect::<Row>()
        })
        .collect();

    Table { columns, rows }
}
