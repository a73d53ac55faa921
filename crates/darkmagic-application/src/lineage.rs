//! Per-branch ancestor chains
//!
//! A lineage is a persistent list: pushing returns a new lineage that shares
//! its tail with the original, so sibling branches never see each other's
//! names.

use std::fmt;
use std::sync::Arc;

struct Node {
    name: String,
    parent: Option<Arc<Node>>,
}

/// In-flight dependency names leading to the current resolution
#[derive(Clone, Default)]
pub struct Lineage {
    head: Option<Arc<Node>>,
    len: usize,
}

impl Lineage {
    /// Empty lineage of a top-level invocation
    pub fn root() -> Self {
        Self::default()
    }

    /// Lineage extended with `name`; `self` is left untouched
    pub fn push(&self, name: &str) -> Self {
        Self {
            head: Some(Arc::new(Node {
                name: name.to_string(),
                parent: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Whether `name` is already in flight on this branch
    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|entry| entry == name)
    }

    /// Most recently pushed name
    pub fn innermost(&self) -> Option<&str> {
        self.head.as_deref().map(|node| node.name.as_str())
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a top-level lineage
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Names, outermost first
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.iter().map(str::to_string).collect();
        names.reverse();
        names
    }

    fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::successors(self.head.as_deref(), |node| node.parent.as_deref())
            .map(|node| node.name.as_str())
    }
}

impl fmt::Debug for Lineage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
