//! The tree projection.
//!
//! A value is walked from a starting [Path], descending only into composites whose path is in the
//! [ExpansionSet]. The result is a flat list of depth annotated lines, in display order. The walk
//! keeps its own stack, so arbitrarily deep values render without recursion.
use std::fmt::{Display, Formatter, Write};

use crate::expansion::ExpansionSet;
use crate::paths::Path;
use crate::raw::{format_float, write_escaped};
use crate::{JsonValue, ValueKind};

/// How a line is introduced within its parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// Member of an object
    Key(String),
    /// Element of an array
    Index(usize),
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Key(key) => {
                for c in key.chars() {
                    if c.is_control() {
                        write!(f, "{}", c.escape_default())?;
                    } else {
                        f.write_char(c)?;
                    }
                }
                Ok(())
            }
            Label::Index(index) => write!(f, "{}", index),
        }
    }
}

/// What a line shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// A scalar, with its display text
    Leaf { kind: ValueKind, text: String },
    /// A toggle control for an array or object
    Toggle {
        kind: ValueKind,
        len: usize,
        expanded: bool,
    },
}

impl Content {
    /// The text shown for the line. Toggles read `Array[N]` or `Object{N}`
    pub fn summary(&self) -> String {
        match self {
            Content::Leaf { text, .. } => text.clone(),
            Content::Toggle { kind, len, .. } => match kind {
                ValueKind::Array => format!("Array[{}]", len),
                _ => format!("Object{{{}}}", len),
            },
        }
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self, Content::Toggle { expanded: true, .. })
    }
}

/// A single rendered line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    /// Nesting depth relative to the starting path
    pub depth: usize,
    /// The path toggling this line acts on
    pub path: Path,
    /// [None] for the starting value
    pub label: Option<Label>,
    pub content: Content,
}

impl Display for TreeLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:width$}", "", width = self.depth * 2)?;
        if let Some(label) = &self.label {
            write!(f, "{}: ", label)?;
        }
        match &self.content {
            Content::Toggle { expanded: true, .. } => write!(f, "▾ ")?,
            Content::Toggle { expanded: false, .. } => write!(f, "▸ ")?,
            Content::Leaf { .. } => (),
        }
        write!(f, "{}", self.content.summary())
    }
}

/// The rendered tree, one entry per visible line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeView {
    pub lines: Vec<TreeLine>,
}

impl TreeView {
    /// Find the line rendered for a given path, if it is visible
    pub fn line(&self, path: impl AsRef<str>) -> Option<&TreeLine> {
        let path = path.as_ref();
        self.lines.iter().find(|l| l.path.as_str() == path)
    }

    /// Paths of all the composite lines that were rendered expanded
    pub fn expanded_paths(&self) -> impl Iterator<Item = &Path> {
        self.lines
            .iter()
            .filter(|l| l.content.is_expanded())
            .map(|l| &l.path)
    }
}

impl Display for TreeView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Display text for a scalar. Strings are quoted and escaped, so a leaf never spans lines
fn leaf_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "null".to_string(),
        JsonValue::Undefined => "undefined".to_string(),
        JsonValue::Boolean(b) => b.to_string(),
        JsonValue::Integer(i) => i.to_string(),
        JsonValue::Float(f) => format_float(*f),
        JsonValue::String(s) => {
            let mut text = String::with_capacity(s.len() + 2);
            write_escaped(&mut text, s);
            text
        }
        JsonValue::Array(_) | JsonValue::Object(_) => String::new(),
    }
}

/// Render `value`, found at `path`, against the current expansion state
pub fn render(value: &JsonValue, path: &Path, expansion: &ExpansionSet) -> TreeView {
    let mut lines = vec![];
    let mut pending: Vec<(&JsonValue, Path, usize, Option<Label>)> =
        vec![(value, path.clone(), 0, None)];

    while let Some((value, path, depth, label)) = pending.pop() {
        let content = match value {
            JsonValue::Array(_) | JsonValue::Object(_) => {
                let expanded = expansion.is_expanded(&path);
                if expanded {
                    push_children(&mut pending, value, &path, depth + 1);
                }
                Content::Toggle {
                    kind: value.kind(),
                    len: value.len().unwrap_or(0),
                    expanded,
                }
            }
            scalar => Content::Leaf {
                kind: scalar.kind(),
                text: leaf_text(scalar),
            },
        };
        lines.push(TreeLine {
            depth,
            path,
            label,
            content,
        });
    }
    TreeView { lines }
}

/// Queue up the children of a composite. They are pushed in reverse so that they come off the
/// stack in their original order
fn push_children<'v, 'a>(
    pending: &mut Vec<(&'v JsonValue<'a>, Path, usize, Option<Label>)>,
    value: &'v JsonValue<'a>,
    path: &Path,
    depth: usize,
) {
    match value {
        JsonValue::Array(values) => {
            for (index, child) in values.iter().enumerate().rev() {
                pending.push((child, path.index(index), depth, Some(Label::Index(index))));
            }
        }
        JsonValue::Object(pairs) => {
            for (key, child) in pairs.iter().rev() {
                pending.push((child, path.key(key), depth, Some(Label::Key(key.to_string()))));
            }
        }
        _ => (),
    }
}

#[cfg(test)]
mod tests {
    use super::{render, Content, Label};
    use crate::expansion::ExpansionSet;
    use crate::paths::Path;
    use crate::{parse_literal, JsonValue, ValueKind};

    #[test]
    fn scalars_should_render_with_their_literal_text() {
        let cases = [
            (JsonValue::Null, "null"),
            (JsonValue::Undefined, "undefined"),
            (JsonValue::Boolean(false), "false"),
            (JsonValue::Integer(-4), "-4"),
            (JsonValue::Float(2.5), "2.5"),
            (parse_literal!("\"hi\""), "\"hi\""),
        ];
        for (value, expected) in cases {
            let view = render(&value, &Path::root(), &ExpansionSet::new());
            assert_eq!(view.lines.len(), 1);
            assert_eq!(view.lines[0].content.summary(), expected);
        }
    }

    #[test]
    fn multiline_strings_and_keys_should_stay_on_one_line() {
        let value = parse_literal!(r#"{"two\nlines": "first\nsecond \"quoted\"", "tab": "a\tb"}"#);
        let view = render(&value, &Path::root(), &ExpansionSet::new());
        assert_eq!(
            view.to_string(),
            "▾ Object{2}\n  two\\nlines: \"first\\nsecond \\\"quoted\\\"\"\n  tab: \"a\\tb\"\n"
        );
        assert_eq!(view.to_string().lines().count(), view.lines.len());
    }

    #[test]
    fn top_level_summaries_should_show_sizes() {
        let value = parse_literal!(r#"{"a": 1, "b": [1,2,3], "c": {"x": true}}"#);
        let view = render(&value, &Path::root(), &ExpansionSet::new());
        assert_eq!(view.line("root").unwrap().content.summary(), "Object{3}");
        assert_eq!(view.line("root.a").unwrap().content.summary(), "1");
        assert_eq!(view.line("root.b").unwrap().content.summary(), "Array[3]");
        assert_eq!(view.line("root.c").unwrap().content.summary(), "Object{1}");
        assert!(view.line("root.b.0").is_none());
        assert!(view.line("root.c.x").is_none());
    }

    #[test]
    fn collapsed_root_should_render_a_single_line() {
        let value = parse_literal!("[1, 2]");
        let view = render(&value, &Path::root(), &ExpansionSet::collapsed());
        assert_eq!(view.lines.len(), 1);
        assert_eq!(
            view.lines[0].content,
            Content::Toggle {
                kind: ValueKind::Array,
                len: 2,
                expanded: false
            }
        );
    }

    #[test]
    fn children_should_keep_their_received_order() {
        let value = parse_literal!(r#"{"zeta": 1, "alpha": 2, "list": ["x", "y"]}"#);
        let expansion: ExpansionSet = ["root", "root.list"].into_iter().collect();
        let view = render(&value, &Path::root(), &expansion);
        let paths: Vec<&str> = view.lines.iter().map(|l| l.path.as_str()).collect();
        assert_eq!(
            paths,
            ["root", "root.zeta", "root.alpha", "root.list", "root.list.0", "root.list.1"]
        );
        assert_eq!(view.lines[4].label, Some(Label::Index(0)));
        assert_eq!(view.lines[4].depth, 2);
        assert_eq!(view.lines[1].label, Some(Label::Key("zeta".to_string())));
    }

    #[test]
    fn expanded_descendants_of_collapsed_parents_should_stay_hidden() {
        let value = parse_literal!(r#"{"a": {"b": {"c": 1}}}"#);
        let expansion: ExpansionSet = ["root", "root.a.b"].into_iter().collect();
        let view = render(&value, &Path::root(), &expansion);
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.expanded_paths().count(), 1);
    }

    #[test]
    fn rendering_should_be_idempotent() {
        let value = parse_literal!(r#"{"data": [{"id": "1"}, {"id": "2"}]}"#);
        let expansion: ExpansionSet = ["root", "root.data", "root.data.1"].into_iter().collect();
        let first = render(&value, &Path::root(), &expansion);
        let second = render(&value, &Path::root(), &expansion);
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn outlines_should_indent_by_depth() {
        let value = parse_literal!(r#"{"a": [true], "b": {}}"#);
        let expansion: ExpansionSet = ["root", "root.a"].into_iter().collect();
        let view = render(&value, &Path::root(), &expansion);
        assert_eq!(
            view.to_string(),
            "▾ Object{2}\n  a: ▾ Array[1]\n    0: true\n  b: ▸ Object{0}\n"
        );
    }

    #[test]
    fn rendering_from_a_sub_path_should_prefix_child_paths() {
        let value = parse_literal!(r#"{"x": 1}"#);
        let start = Path::root().key("data").index(0);
        let expansion: ExpansionSet = [start.as_str()].into_iter().collect();
        let view = render(&value, &start, &expansion);
        assert_eq!(view.lines[1].path.as_str(), "root.data.0.x");
    }

    #[test]
    fn deep_values_should_render_fully_expanded() {
        let depth = 2_000;
        let mut value = JsonValue::Integer(7);
        for _ in 0..depth {
            value = JsonValue::Array(vec![value]);
        }
        let mut expansion = ExpansionSet::new();
        let mut path = Path::root();
        for _ in 0..depth {
            expansion.expand(&path);
            path = path.index(0);
        }
        let view = render(&value, &Path::root(), &expansion);
        assert_eq!(view.lines.len(), depth + 1);
        assert_eq!(view.lines[depth].content.summary(), "7");
        assert_eq!(view.lines[depth].depth, depth);
    }
}
