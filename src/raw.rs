//! The raw projection: the whole value serialised as indented JSON text.
//!
//! Output follows the conventions of a browser's `JSON.stringify`: object members keep their
//! received order, undefined members are dropped from objects and written as `null` within
//! arrays, and non-finite numbers are written as `null`. An undefined root has no serialised form
//! at all.
use std::fmt::Write;

use crate::JsonValue;

/// Default indentation width, in spaces
pub const DEFAULT_INDENT: usize = 2;

/// The outcome of rendering the raw projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawView {
    Text(String),
    /// The value has no serialised form
    Empty,
}

impl RawView {
    pub fn as_str(&self) -> &str {
        match self {
            RawView::Text(text) => text,
            RawView::Empty => "",
        }
    }
}

/// Render the raw projection of a value with a given indentation width
pub fn render(value: &JsonValue, indent: usize) -> RawView {
    match serialize(value, indent) {
        Some(text) => RawView::Text(text),
        None => RawView::Empty,
    }
}

/// Pieces of output still to be written
enum Task<'v, 'a> {
    Value(&'v JsonValue<'a>, usize),
    Key(&'v str),
    Text(&'static str),
    /// Line break followed by indentation for the given nesting level
    Break(usize),
}

/// Serialise a value. An indent of zero produces compact output with no whitespace at all
pub fn serialize(value: &JsonValue, indent: usize) -> Option<String> {
    if let JsonValue::Undefined = value {
        return None;
    }
    let mut out = String::new();
    let mut pending = vec![Task::Value(value, 0)];
    while let Some(task) = pending.pop() {
        match task {
            Task::Text(text) => out.push_str(text),
            Task::Key(key) => {
                write_escaped(&mut out, key);
                out.push_str(if indent > 0 { ": " } else { ":" });
            }
            Task::Break(level) => {
                if indent > 0 {
                    out.push('\n');
                    out.extend(std::iter::repeat(' ').take(indent * level));
                }
            }
            Task::Value(value, level) => match value {
                JsonValue::Array(values) if !values.is_empty() => {
                    out.push('[');
                    let mut tasks = Vec::with_capacity(values.len() * 3 + 2);
                    for (i, child) in values.iter().enumerate() {
                        if i > 0 {
                            tasks.push(Task::Text(","));
                        }
                        tasks.push(Task::Break(level + 1));
                        tasks.push(Task::Value(child, level + 1));
                    }
                    tasks.push(Task::Break(level));
                    tasks.push(Task::Text("]"));
                    pending.extend(tasks.into_iter().rev());
                }
                JsonValue::Object(pairs) => {
                    let mut members = pairs
                        .iter()
                        .filter(|(_, v)| !matches!(v, JsonValue::Undefined))
                        .peekable();
                    if members.peek().is_none() {
                        out.push_str("{}");
                        continue;
                    }
                    out.push('{');
                    let mut tasks = vec![];
                    for (i, (key, child)) in members.enumerate() {
                        if i > 0 {
                            tasks.push(Task::Text(","));
                        }
                        tasks.push(Task::Break(level + 1));
                        tasks.push(Task::Key(key));
                        tasks.push(Task::Value(child, level + 1));
                    }
                    tasks.push(Task::Break(level));
                    tasks.push(Task::Text("}"));
                    pending.extend(tasks.into_iter().rev());
                }
                scalar => write_scalar(&mut out, scalar),
            },
        }
    }
    Some(out)
}

fn write_scalar(out: &mut String, value: &JsonValue) {
    match value {
        JsonValue::Null | JsonValue::Undefined => out.push_str("null"),
        JsonValue::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        JsonValue::Integer(i) => {
            let _ = write!(out, "{}", i);
        }
        JsonValue::Float(f) if f.is_finite() => out.push_str(&format_float(*f)),
        JsonValue::Float(_) => out.push_str("null"),
        JsonValue::String(s) => write_escaped(out, s),
        JsonValue::Array(_) => out.push_str("[]"),
        JsonValue::Object(_) => out.push_str("{}"),
    }
}

/// Write a quoted JSON string, escaping quotes, backslashes and control characters
/// Write `s` as a quoted JSON string literal
pub(crate) fn write_escaped(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Format a float the way a browser prints numbers: integral values without a fractional part,
/// and exponent notation for very large or very small magnitudes
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", f);
        match formatted.find('e') {
            Some(at) if !formatted[at + 1..].starts_with('-') => {
                format!("{}e+{}", &formatted[..at], &formatted[at + 1..])
            }
            _ => formatted,
        }
    } else {
        format!("{}", f)
    }
}
