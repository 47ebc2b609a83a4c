//! The stateful inspector: one payload at a time, the paths expanded within it, and the view
//! mode it is currently being projected through.
//!
//! Rendering is a pure function of that state. Loading a new payload resets the expansion state
//! back to just the root, while re-rendering the same payload leaves it untouched.
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::{debug, trace};
use url::Url;

use crate::decoders::Encoding;
use crate::errors::ParserResult;
use crate::expansion::ExpansionSet;
use crate::pagination::PageLinks;
use crate::parser::Parser;
use crate::paths::Path;
use crate::raw::{RawView, DEFAULT_INDENT};
use crate::table::{TableView, DEFAULT_MAX_CELL_CHARS};
use crate::tree::TreeView;
use crate::{raw, table, tree, JsonValue};

/// Tunables for rendering and payload decoding
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InspectorOptions {
    /// Indentation width used by the raw view. Zero gives compact output
    pub indent: usize,
    /// Characters shown for a string table cell before truncation
    pub max_cell_chars: usize,
    /// Encoding assumed for payloads loaded from bytes
    pub encoding: Encoding,
}

impl Default for InspectorOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            max_cell_chars: DEFAULT_MAX_CELL_CHARS,
            encoding: Encoding::default(),
        }
    }
}

impl InspectorOptions {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_max_cell_chars(mut self, max_cell_chars: usize) -> Self {
        self.max_cell_chars = max_cell_chars;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// The interchangeable projections of a payload
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Tree,
    Table,
    Raw,
}

impl Display for ViewMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Tree => write!(f, "tree"),
            ViewMode::Table => write!(f, "table"),
            ViewMode::Raw => write!(f, "raw"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tree" | "formatted" => Ok(ViewMode::Tree),
            "table" => Ok(ViewMode::Table),
            "raw" => Ok(ViewMode::Raw),
            other => Err(format!("unknown view mode: {}", other)),
        }
    }
}

/// A rendered view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Nothing has been loaded
    NoData,
    Tree(TreeView),
    Table(TableView),
    Raw(RawView),
}

impl Display for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            View::NoData => writeln!(f, "No data to display"),
            View::Tree(tree) => write!(f, "{}", tree),
            View::Table(table) => write!(f, "{}", table),
            View::Raw(raw) => writeln!(f, "{}", raw.as_str()),
        }
    }
}

/// Somewhere copied text can be sent
pub trait Clipboard {
    type Error;

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error>;
}

/// A plain string works as an in-memory clipboard, with each write replacing the last
impl Clipboard for String {
    type Error = Infallible;

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        self.clear();
        self.push_str(text);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct Inspector<'a> {
    data: Option<JsonValue<'a>>,
    expansion: ExpansionSet,
    mode: ViewMode,
    options: InspectorOptions,
}

impl<'a> Inspector<'a> {
    pub fn new(options: InspectorOptions) -> Self {
        Self {
            data: None,
            expansion: ExpansionSet::default(),
            mode: ViewMode::default(),
            options,
        }
    }

    pub fn options(&self) -> &InspectorOptions {
        &self.options
    }

    /// Replace the payload. Expansion state goes back to just the root
    pub fn load(&mut self, value: JsonValue<'a>) {
        debug!(
            "loading {:?} payload with {} top-level entries",
            value.kind(),
            value.len().unwrap_or(0)
        );
        self.data = Some(value);
        self.expansion.reset();
    }

    /// Decode a payload from a string and load it
    pub fn load_str(&mut self, body: &str) -> ParserResult<()> {
        let value = Parser::with_encoding(self.options.encoding).parse_str(body)?;
        self.load(value);
        Ok(())
    }

    /// Decode a payload from raw bytes, using the configured [Encoding], and load it
    pub fn load_bytes(&mut self, body: &[u8]) -> ParserResult<()> {
        let value = Parser::with_encoding(self.options.encoding).parse_bytes(body)?;
        self.load(value);
        Ok(())
    }

    /// Drop the payload
    pub fn clear(&mut self) {
        debug!("clearing payload");
        self.data = None;
        self.expansion.reset();
    }

    pub fn value(&self) -> Option<&JsonValue<'a>> {
        self.data.as_ref()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        if mode != self.mode {
            debug!("switching view mode from {} to {}", self.mode, mode);
            self.mode = mode;
        }
    }

    pub fn expansion(&self) -> &ExpansionSet {
        &self.expansion
    }

    /// Flip the expansion state of a single path, returning whether it is now expanded
    pub fn toggle(&mut self, path: impl AsRef<str>) -> bool {
        let expanded = self.expansion.toggle(path.as_ref());
        trace!(
            "{} {}",
            if expanded { "expanded" } else { "collapsed" },
            path.as_ref()
        );
        expanded
    }

    pub fn expand(&mut self, path: impl AsRef<str>) {
        self.expansion.expand(path)
    }

    pub fn collapse(&mut self, path: impl AsRef<str>) {
        self.expansion.collapse(path)
    }

    /// Render the payload through the current view mode
    pub fn render(&self) -> View {
        let value = match &self.data {
            Some(value) => value,
            None => return View::NoData,
        };
        match self.mode {
            ViewMode::Tree => View::Tree(tree::render(value, &Path::root(), &self.expansion)),
            ViewMode::Table => View::Table(table::render(value, self.options.max_cell_chars)),
            ViewMode::Raw => View::Raw(raw::render(value, self.options.indent)),
        }
    }

    /// Pagination links found in the payload, resolved against `base`
    pub fn page_links(&self, base: Option<&Url>) -> PageLinks {
        match &self.data {
            Some(value) => PageLinks::from_value(value, base),
            None => PageLinks::default(),
        }
    }

    /// The text a copy produces: the whole payload as indented JSON, whatever the view mode or the
    /// raw view's indentation
    pub fn clipboard_text(&self) -> Option<String> {
        self.data
            .as_ref()
            .and_then(|value| raw::serialize(value, DEFAULT_INDENT))
    }

    /// Copy the payload to a clipboard. Returns `false` when there was nothing to copy
    pub fn copy_to<C: Clipboard>(&self, clipboard: &mut C) -> Result<bool, C::Error> {
        match self.clipboard_text() {
            Some(text) => {
                debug!("copying {} bytes to the clipboard", text.len());
                clipboard.write_text(&text)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Size of the payload in compact form, in kilobytes to two decimal places
    pub fn size_summary(&self) -> String {
        match self.data.as_ref().and_then(|value| raw::serialize(value, 0)) {
            Some(compact) => format!("{:.2} KB", compact.len() as f64 / 1024.0),
            None => "0 KB".to_string(),
        }
    }
}
