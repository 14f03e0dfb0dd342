//! Read contract the layout core needs from a tree, plus a simple in-memory model.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// Read-only view of a rooted, ordered tree.
///
/// The layout borrows the model for the whole call, so the tree cannot change
/// underneath it.
pub trait TreeModel {
    type NodeId: Clone + Eq + Hash + Debug;

    /// Children of `node` in left-to-right display order. Unknown ids are leaves.
    fn children(&self, node: &Self::NodeId) -> &[Self::NodeId];

    /// Parent of `node`, `None` for the root.
    fn parent(&self, node: &Self::NodeId) -> Option<Self::NodeId>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("No root node found")]
    NoRoot,
    #[error("Multiple root nodes found: {0:?}")]
    MultipleRoots(Vec<String>),
}

/// Parent id -> ordered children, with a reverse parent index.
#[derive(Debug, Clone)]
pub struct ChildMap<Id> {
    children: HashMap<Id, Vec<Id>>,
    parents: HashMap<Id, Id>,
    // Insertion order of every id seen, so root lookup is deterministic.
    order: Vec<Id>,
}

impl<Id: Clone + Eq + Hash + Debug> Default for ChildMap<Id> {
    fn default() -> Self {
        Self {
            children: HashMap::new(),
            parents: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<Id: Clone + Eq + Hash + Debug> ChildMap<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(parent, child)` pairs; children keep the order they appear in.
    pub fn from_edges(edges: impl IntoIterator<Item = (Id, Id)>) -> Self {
        let mut map = Self::new();
        for (parent, child) in edges {
            map.push_child(parent, child);
        }
        map
    }

    /// Register a node that may have no edges (a single-node tree).
    pub fn add_node(&mut self, id: Id) {
        if !self.children.contains_key(&id) {
            self.children.insert(id.clone(), Vec::new());
            self.order.push(id);
        }
    }

    /// Append `child` as the rightmost child of `parent`.
    ///
    /// A child pushed under a second parent keeps both edges; the parent index
    /// records the latest one, which the layout then reports as malformed.
    pub fn push_child(&mut self, parent: Id, child: Id) {
        self.add_node(parent.clone());
        self.add_node(child.clone());
        if let Some(siblings) = self.children.get_mut(&parent) {
            siblings.push(child.clone());
        }
        self.parents.insert(child, parent);
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.children.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The single node that is nobody's child.
    pub fn find_root(&self) -> Result<&Id, TreeError> {
        let all_children: HashSet<&Id> = self.children.values().flatten().collect();
        let roots: Vec<&Id> = self
            .order
            .iter()
            .filter(|id| !all_children.contains(id))
            .collect();

        match roots.as_slice() {
            [root] => Ok(root),
            [] => Err(TreeError::NoRoot),
            many => Err(TreeError::MultipleRoots(
                many.iter().map(|id| format!("{:?}", id)).collect(),
            )),
        }
    }

    /// Left-right reversed copy: every child list is reversed.
    pub fn mirrored(&self) -> Self {
        let children = self
            .children
            .iter()
            .map(|(id, kids)| (id.clone(), kids.iter().rev().cloned().collect()))
            .collect();
        Self {
            children,
            parents: self.parents.clone(),
            order: self.order.clone(),
        }
    }
}

impl<Id: Clone + Eq + Hash + Debug> TreeModel for ChildMap<Id> {
    type NodeId = Id;

    fn children(&self, node: &Id) -> &[Id] {
        self.children.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    fn parent(&self, node: &Id) -> Option<Id> {
        self.parents.get(node).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_root() {
        let tree = ChildMap::from_edges([("1", "2"), ("1", "3"), ("2", "4"), ("3", "5")]);
        assert_eq!(tree.find_root(), Ok(&"1"));
    }

    #[test]
    fn test_single_node_root() {
        let mut tree = ChildMap::new();
        tree.add_node("only");
        assert_eq!(tree.find_root(), Ok(&"only"));
        assert!(tree.children(&"only").is_empty());
        assert_eq!(tree.parent(&"only"), None);
    }

    #[test]
    fn test_multiple_roots() {
        let tree = ChildMap::from_edges([("a", "b"), ("c", "d")]);
        assert_eq!(
            tree.find_root(),
            Err(TreeError::MultipleRoots(vec![
                "\"a\"".to_string(),
                "\"c\"".to_string()
            ]))
        );
    }

    #[test]
    fn test_no_root_in_cycle() {
        let tree = ChildMap::from_edges([("a", "b"), ("b", "a")]);
        assert_eq!(tree.find_root(), Err(TreeError::NoRoot));
    }

    #[test]
    fn test_children_keep_order() {
        let tree = ChildMap::from_edges([("r", "x"), ("r", "y"), ("r", "z")]);
        assert_eq!(tree.children(&"r"), &["x", "y", "z"]);
        assert_eq!(tree.parent(&"y"), Some("r"));
        assert!(tree.children(&"missing").is_empty());
    }

    #[test]
    fn test_mirrored_reverses_children() {
        let tree = ChildMap::from_edges([("r", "x"), ("r", "y"), ("y", "p"), ("y", "q")]);
        let mirror = tree.mirrored();
        assert_eq!(mirror.children(&"r"), &["y", "x"]);
        assert_eq!(mirror.children(&"y"), &["q", "p"]);
        assert_eq!(mirror.find_root(), Ok(&"r"));
    }
}
