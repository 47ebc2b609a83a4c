//! The set of paths currently shown expanded in the tree view.
//!
//! Membership is flat: collapsing a path leaves the memberships of everything beneath it alone,
//! so re-expanding a parent brings its previously expanded descendants straight back.
//! [ExpansionSet::collapse_subtree] is there for callers who want the opposite.
use std::collections::BTreeSet;

use crate::paths::{Path, ROOT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionSet {
    paths: BTreeSet<String>,
}

impl Default for ExpansionSet {
    /// A fresh set only has the root expanded
    fn default() -> Self {
        let mut paths = BTreeSet::new();
        paths.insert(ROOT.to_string());
        Self { paths }
    }
}

impl ExpansionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set with nothing expanded, not even the root
    pub fn collapsed() -> Self {
        Self {
            paths: BTreeSet::new(),
        }
    }

    pub fn is_expanded(&self, path: impl AsRef<str>) -> bool {
        self.paths.contains(path.as_ref())
    }

    /// Flip the membership of a single path, returning whether it is now expanded
    pub fn toggle(&mut self, path: impl AsRef<str>) -> bool {
        let path = path.as_ref();
        if self.paths.remove(path) {
            false
        } else {
            self.paths.insert(path.to_string());
            true
        }
    }

    pub fn expand(&mut self, path: impl AsRef<str>) {
        self.paths.insert(path.as_ref().to_string());
    }

    pub fn collapse(&mut self, path: impl AsRef<str>) {
        self.paths.remove(path.as_ref());
    }

    /// Collapse a path along with everything beneath it
    pub fn collapse_subtree(&mut self, path: &Path) {
        self.paths
            .retain(|p| p != path.as_str() && !path.is_ancestor_of(p));
    }

    /// Back to just the root being expanded
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The expanded paths, in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(|p| p.as_str())
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExpansionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(|p| p.as_ref().to_string()).collect(),
        }
    }
}

impl<S: AsRef<str>> Extend<S> for ExpansionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.paths
            .extend(iter.into_iter().map(|p| p.as_ref().to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::ExpansionSet;
    use crate::paths::Path;

    #[test]
    fn a_new_set_should_only_expand_the_root() {
        let set = ExpansionSet::new();
        assert_eq!(set.iter().collect::<Vec<_>>(), ["root"]);
        assert!(ExpansionSet::collapsed().is_empty());
    }

    #[test]
    fn toggling_should_only_affect_the_given_path() {
        let mut set = ExpansionSet::new();
        set.expand("root.data.1");
        assert!(set.toggle("root.data.0"));
        assert!(set.is_expanded("root.data.0"));
        assert!(set.is_expanded("root.data.1"));
        assert!(!set.toggle("root.data.0"));
        assert!(!set.is_expanded("root.data.0"));
        assert!(set.is_expanded("root.data.1"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn collapsing_a_parent_should_leave_descendants_alone() {
        let mut set = ExpansionSet::new();
        set.expand("root.data");
        set.expand("root.data.0");
        set.collapse("root.data");
        assert!(set.is_expanded("root.data.0"));
    }

    #[test]
    fn collapsing_a_subtree_should_remove_descendants() {
        let mut set: ExpansionSet = ["root", "root.data", "root.data.0", "root.database"]
            .into_iter()
            .collect();
        set.collapse_subtree(&Path::root().key("data"));
        assert_eq!(set.iter().collect::<Vec<_>>(), ["root", "root.database"]);
    }

    #[test]
    fn reset_should_restore_the_initial_state() {
        let mut set = ExpansionSet::collapsed();
        set.extend(["root.a", "root.b"]);
        set.reset();
        assert_eq!(set, ExpansionSet::new());
    }
}
