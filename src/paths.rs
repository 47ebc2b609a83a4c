//! Structural paths which identify a node's position within one rendered tree.
//!
//! A path starts at `root` and appends `.`-separated object keys and array indices, so the second
//! element of a top-level `data` array is `root.data.1`. Keys are escaped in the style of RFC 6901
//! (`~` as `~0`, `.` as `~1`) so that two different positions can never share a path.
use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// The token every path starts with
pub const ROOT: &str = "root";
/// Separator placed between components
const PATH_SEPARATOR: char = '.';
/// Tildes within keys are encoded as ~0
const ENCODED_TILDE: &str = "~0";
/// Separators within keys are encoded as ~1
const ENCODED_SEPARATOR: &str = "~1";

/// Each path is made of one of three different component types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent<'a> {
    /// The root of a path
    Root,
    /// A key within an object
    Key(Cow<'a, str>),
    /// An index within an array
    Index(usize),
}

impl<'a> Display for PathComponent<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Root => write!(f, "{}", ROOT),
            Self::Key(key) => {
                if key.contains(['~', PATH_SEPARATOR]) {
                    write!(
                        f,
                        "{}",
                        key.replace('~', ENCODED_TILDE)
                            .replace(PATH_SEPARATOR, ENCODED_SEPARATOR)
                    )
                } else {
                    write!(f, "{}", key)
                }
            }
            Self::Index(i) => write!(f, "{}", i),
        }
    }
}

/// A complete path, held in its serialised form since that is what expansion state is keyed on
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(String);

impl Path {
    /// The path of the top-level value
    pub fn root() -> Self {
        Path(ROOT.to_string())
    }

    /// Extend the path by a single component, producing the path of a child
    pub fn join(&self, component: &PathComponent) -> Self {
        match component {
            PathComponent::Root => Path::root(),
            component => Path(format!("{}{}{}", self.0, PATH_SEPARATOR, component)),
        }
    }

    /// The path of a named member of the object at this path
    pub fn key(&self, key: &str) -> Self {
        self.join(&PathComponent::Key(Cow::Borrowed(key)))
    }

    /// The path of an element of the array at this path
    pub fn index(&self, index: usize) -> Self {
        self.join(&PathComponent::Index(index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of components below the root
    pub fn depth(&self) -> usize {
        self.0.matches(PATH_SEPARATOR).count()
    }

    /// Checks whether `other` lies strictly beneath this path
    pub fn is_ancestor_of(&self, other: &str) -> bool {
        other.len() > self.0.len()
            && other.starts_with(self.0.as_str())
            && other[self.0.len()..].starts_with(PATH_SEPARATOR)
    }
}

impl Default for Path {
    fn default() -> Self {
        Path::root()
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.0
    }
}
