//! The table projection.
//!
//! Only payloads shaped like a list of resource objects (`{"data": [{"id", "type",
//! "attributes": {..}}, ..]}`) have one. Each resource becomes a row, and the columns are `id` and
//! `type` followed by the union of every attribute name seen. Cells only ever show a summary of
//! their value; nested structure is left to the tree view.
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use crate::raw::format_float;
use crate::JsonValue;

/// Default number of characters shown for a string cell before it is truncated
pub const DEFAULT_MAX_CELL_CHARS: usize = 50;

/// Members of a resource object which never become columns in their own right
pub const RESERVED_KEYS: [&str; 6] = ["id", "type", "links", "relationships", "meta", "attributes"];

/// Columns which are always present, ahead of everything else
const PINNED_COLUMNS: [&str; 2] = ["id", "type"];

/// What a cell shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// The row has nothing at all for this column
    NoValue,
    /// The row holds `null` or undefined for this column
    Placeholder,
    /// A boolean or a number
    Literal(String),
    /// A string, flattened to one line and possibly truncated. `full` keeps the original
    Text { display: String, full: String },
    /// An array, with its length
    Array(usize),
    Object,
}

impl Cell {
    fn from_value(value: &JsonValue, max_chars: usize) -> Self {
        match value {
            JsonValue::Null | JsonValue::Undefined => Cell::Placeholder,
            JsonValue::Boolean(b) => Cell::Literal(b.to_string()),
            JsonValue::Integer(i) => Cell::Literal(i.to_string()),
            JsonValue::Float(f) => Cell::Literal(format_float(*f)),
            JsonValue::String(s) => Cell::Text {
                display: truncate(s, max_chars),
                full: s.to_string(),
            },
            JsonValue::Array(values) => Cell::Array(values.len()),
            JsonValue::Object(_) => Cell::Object,
        }
    }

    /// The full text of the cell, available on demand for strings
    pub fn tooltip(&self) -> Option<&str> {
        match self {
            Cell::Text { full, .. } => Some(full),
            _ => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::NoValue => Ok(()),
            Cell::Placeholder => write!(f, "-"),
            Cell::Literal(text) => write!(f, "{}", text),
            Cell::Text { display, .. } => write!(f, "{}", display),
            Cell::Array(len) => write!(f, "Array[{}]", len),
            Cell::Object => write!(f, "Object"),
        }
    }
}

/// A stable identity for a row. Resources without an id fall back to their position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKey {
    Id(String),
    Index(usize),
}

impl Display for RowKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RowKey::Id(id) => write!(f, "{}", id),
            RowKey::Index(index) => write!(f, "#{}", index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub key: RowKey,
    /// One cell per column, in column order
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    /// No tabular data: the payload has no `data` array, or it is empty
    Empty,
    Table {
        columns: Vec<String>,
        rows: Vec<TableRow>,
    },
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        matches!(self, TableView::Empty)
    }

    pub fn columns(&self) -> &[String] {
        match self {
            TableView::Table { columns, .. } => columns,
            TableView::Empty => &[],
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        match self {
            TableView::Table { rows, .. } => rows,
            TableView::Empty => &[],
        }
    }

    /// Look up a cell by row position and column name
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.columns().iter().position(|c| c == column)?;
        self.rows().get(row).and_then(|r| r.cells.get(index))
    }
}

impl Display for TableView {
    /// Tab separated, one header line followed by a line per row
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TableView::Empty => writeln!(f, "No tabular data"),
            TableView::Table { columns, rows } => {
                writeln!(f, "{}", columns.join("\t"))?;
                for row in rows {
                    let cells: Vec<String> = row.cells.iter().map(|c| c.to_string()).collect();
                    writeln!(f, "{}", cells.join("\t"))?;
                }
                Ok(())
            }
        }
    }
}

/// The `data` array of a payload, if it has a non-empty one
fn resources<'v, 'a>(value: &'v JsonValue<'a>) -> Option<&'v [JsonValue<'a>]> {
    value
        .get("data")
        .and_then(|data| data.as_array())
        .filter(|items| !items.is_empty())
}

/// The attributes object of a resource, if it has one
fn attributes<'v, 'a>(item: &'v JsonValue<'a>) -> Option<&'v JsonValue<'a>> {
    item.get("attributes").filter(|a| a.as_object().is_some())
}

/// Sort the way a browser sorts strings by default, on UTF-16 code units
fn utf16_order(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

/// Work out the column set for a list of resources
pub fn columns(items: &[JsonValue]) -> Vec<String> {
    let mut names: Vec<String> = vec![];
    for item in items {
        match (attributes(item), item.as_object()) {
            (Some(attributes), _) => {
                if let Some(pairs) = attributes.as_object() {
                    names.extend(pairs.iter().map(|(k, _)| k.to_string()));
                }
            }
            (None, Some(pairs)) => names.extend(
                pairs
                    .iter()
                    .filter(|(k, _)| !RESERVED_KEYS.contains(&&**k))
                    .map(|(k, _)| k.to_string()),
            ),
            (None, None) => (),
        }
    }
    names.retain(|n| !PINNED_COLUMNS.contains(&n.as_str()));
    names.sort_by(|a, b| utf16_order(a, b));
    names.dedup();

    let mut columns: Vec<String> = PINNED_COLUMNS.iter().map(|c| c.to_string()).collect();
    columns.append(&mut names);
    columns
}

/// Resolve the value shown for a column: pinned columns come from the resource itself, anything
/// else from its attributes first and then from the resource
fn resolve<'v, 'a>(item: &'v JsonValue<'a>, column: &str) -> Option<&'v JsonValue<'a>> {
    if PINNED_COLUMNS.contains(&column) {
        return item.get(column);
    }
    attributes(item)
        .and_then(|a| a.get(column))
        .or_else(|| item.get(column))
}

fn row_key(item: &JsonValue, index: usize) -> RowKey {
    match item.get("id") {
        Some(JsonValue::String(id)) => RowKey::Id(id.to_string()),
        Some(JsonValue::Integer(id)) => RowKey::Id(id.to_string()),
        Some(JsonValue::Float(id)) => RowKey::Id(format_float(*id)),
        _ => RowKey::Index(index),
    }
}

/// Collapse a string onto a single line, truncating it to `max_chars` characters
fn truncate(s: &str, max_chars: usize) -> String {
    let single_line: String = s
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if single_line.chars().count() <= max_chars {
        single_line
    } else {
        let mut truncated: String = single_line.chars().take(max_chars).collect();
        truncated.push('…');
        truncated
    }
}

/// Render the table projection of a value
pub fn render(value: &JsonValue, max_cell_chars: usize) -> TableView {
    let items = match resources(value) {
        Some(items) => items,
        None => return TableView::Empty,
    };
    let columns = columns(items);
    let rows = items
        .iter()
        .enumerate()
        .map(|(index, item)| TableRow {
            key: row_key(item, index),
            cells: columns
                .iter()
                .map(|column| match resolve(item, column) {
                    Some(value) => Cell::from_value(value, max_cell_chars),
                    None => Cell::NoValue,
                })
                .collect(),
        })
        .collect();
    TableView::Table { columns, rows }
}
