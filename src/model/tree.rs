//! Navigation hierarchy of a dataset.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Recursive ordered mapping from label to subtree.
///
/// Leaves are empty mappings. Label order is the order of the source
/// document. Any value that is not a JSON object (arrays, strings, numbers,
/// null) is read as an empty subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTree(IndexMap<String, CategoryTree>);

impl CategoryTree {
    /// Empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from an arbitrary JSON value.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self(
                map.iter()
                    .map(|(label, child)| (label.clone(), Self::from_value(child)))
                    .collect(),
            ),
            _ => Self::default(),
        }
    }

    /// Insert (or replace) a child subtree, returning `self` for chaining.
    #[must_use]
    pub fn with_child(mut self, label: impl Into<String>, child: CategoryTree) -> Self {
        self.0.insert(label.into(), child);
        self
    }

    /// Insert a leaf label, returning `self` for chaining.
    #[must_use]
    pub fn with_leaf(self, label: impl Into<String>) -> Self {
        self.with_child(label, CategoryTree::new())
    }

    /// Immediate child labels, in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Child subtree for a label.
    pub fn child(&self, label: &str) -> Option<&CategoryTree> {
        self.0.get(label)
    }

    /// Iterate over `(label, subtree)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryTree)> {
        self.0.iter().map(|(label, child)| (label.as_str(), child))
    }

    /// Subtree at a path of labels, if every label exists.
    pub fn node<S: AsRef<str>>(&self, path: &[S]) -> Option<&CategoryTree> {
        path.iter()
            .try_fold(self, |node, label| node.child(label.as_ref()))
    }

    /// Number of immediate children.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a leaf.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of labels in the whole tree.
    pub fn total_labels(&self) -> usize {
        self.0.values().map(|child| 1 + child.total_labels()).sum()
    }
}

impl<'de> Deserialize<'de> for CategoryTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
