//! Inspection views over JSON payloads.
//!
//! A payload is decoded into a [JsonValue] (see [parser::Parser]) and handed to an
//! [inspector::Inspector], which projects it as a lazily expandable tree, as a table when it looks
//! like a list of resource objects, or as indented raw text.
extern crate core;

use std::borrow::Cow;
use std::collections::HashMap;

pub mod coords;
pub mod decoders;
pub mod errors;
pub mod expansion;
pub mod inspector;
pub mod lexer;
pub mod pagination;
pub mod parser;
pub mod paths;
pub mod raw;
pub mod table;
#[cfg(test)]
mod test_macros;
pub mod tree;

/// Basic enumeration of different Json values
#[derive(Debug, Clone)]
pub enum JsonValue<'a> {
    /// Map of values, in the order the keys were received
    Object(Vec<(Cow<'a, str>, JsonValue<'a>)>),
    /// Array of values
    Array(Vec<JsonValue<'a>>),
    /// Canonical string value
    String(Cow<'a, str>),

    /// Floating point numeric value
    Float(f64),

    /// Integer numeric value
    Integer(i64),
    /// Canonical boolean value
    Boolean(bool),
    /// Canonical null value
    Null,
    /// An absent value. Never produced by the parser, but callers assembling payloads by hand may
    /// use it to mark a missing entry distinctly from `null`
    Undefined,
}

/// The kind of a [JsonValue], without its contents
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValueKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
    Undefined,
}

impl<'a> JsonValue<'a> {
    /// The [ValueKind] of this value. Integers and floats are both [ValueKind::Number]
    pub fn kind(&self) -> ValueKind {
        match self {
            JsonValue::Object(_) => ValueKind::Object,
            JsonValue::Array(_) => ValueKind::Array,
            JsonValue::String(_) => ValueKind::String,
            JsonValue::Float(_) | JsonValue::Integer(_) => ValueKind::Number,
            JsonValue::Boolean(_) => ValueKind::Boolean,
            JsonValue::Null => ValueKind::Null,
            JsonValue::Undefined => ValueKind::Undefined,
        }
    }

    /// Look up a key within an object. Returns [None] for anything that isn't an object
    pub fn get(&self, key: &str) -> Option<&JsonValue<'a>> {
        match self {
            JsonValue::Object(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Look up an element within an array. Returns [None] for anything that isn't an array
    pub fn index(&self, index: usize) -> Option<&JsonValue<'a>> {
        match self {
            JsonValue::Array(values) => values.get(index),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue<'a>]> {
        match self {
            JsonValue::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(Cow<'a, str>, JsonValue<'a>)]> {
        match self {
            JsonValue::Object(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Number of children for composite values, [None] for scalars
    pub fn len(&self) -> Option<usize> {
        match self {
            JsonValue::Object(pairs) => Some(pairs.len()),
            JsonValue::Array(values) => Some(values.len()),
            _ => None,
        }
    }

    /// Whether the value is `null` or undefined
    pub fn is_absent(&self) -> bool {
        matches!(self, JsonValue::Null | JsonValue::Undefined)
    }

    /// Take the children out of a composite, leaving it empty. Used to tear down deep values
    /// without recursion
    fn drain_children(&mut self, into: &mut Vec<JsonValue<'a>>) {
        match self {
            JsonValue::Object(pairs) => into.extend(pairs.drain(..).map(|(_, v)| v)),
            JsonValue::Array(values) => into.append(values),
            _ => (),
        }
    }
}

impl<'a> Drop for JsonValue<'a> {
    fn drop(&mut self) {
        let mut pending = vec![];
        self.drain_children(&mut pending);
        while let Some(mut value) = pending.pop() {
            value.drain_children(&mut pending);
        }
    }
}

impl<'a, 'b> PartialEq<JsonValue<'b>> for JsonValue<'a> {
    /// Deep equality. Objects compare as maps, so key order is irrelevant, and integers compare
    /// equal to floats holding the same number
    fn eq(&self, other: &JsonValue<'b>) -> bool {
        let mut pending: Vec<(&JsonValue<'a>, &JsonValue<'b>)> = vec![(self, other)];
        while let Some((lhs, rhs)) = pending.pop() {
            match (lhs, rhs) {
                (JsonValue::Object(l), JsonValue::Object(r)) => {
                    if l.len() != r.len() {
                        return false;
                    }
                    let by_key: HashMap<&str, &JsonValue<'b>> =
                        r.iter().map(|(k, v)| (&**k, v)).collect();
                    for (key, value) in l {
                        match by_key.get(&**key) {
                            Some(matching) => pending.push((value, *matching)),
                            None => return false,
                        }
                    }
                }
                (JsonValue::Array(l), JsonValue::Array(r)) => {
                    if l.len() != r.len() {
                        return false;
                    }
                    pending.extend(l.iter().zip(r.iter()));
                }
                (JsonValue::String(l), JsonValue::String(r)) => {
                    if l != r {
                        return false;
                    }
                }
                (JsonValue::Integer(l), JsonValue::Integer(r)) => {
                    if l != r {
                        return false;
                    }
                }
                (JsonValue::Float(l), JsonValue::Float(r)) => {
                    if l != r {
                        return false;
                    }
                }
                (JsonValue::Integer(i), JsonValue::Float(f))
                | (JsonValue::Float(f), JsonValue::Integer(i)) => {
                    if *i as f64 != *f {
                        return false;
                    }
                }
                (JsonValue::Boolean(l), JsonValue::Boolean(r)) => {
                    if l != r {
                        return false;
                    }
                }
                (JsonValue::Null, JsonValue::Null) => (),
                (JsonValue::Undefined, JsonValue::Undefined) => (),
                _ => return false,
            }
        }
        true
    }
}
