//! Data structures for layout computation.

use std::collections::HashMap;
use std::hash::Hash;

/// A position in layout units. y grows downward with depth.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Per-node working state of one layout call, indexed by arena slot.
#[derive(Debug, Clone)]
pub(crate) struct Annotation {
    /// Position relative to the node's own subtree.
    pub prelim: f64,
    /// Offset applied to every descendant.
    pub modifier: f64,
    /// Contour link past the end of a leaf.
    pub thread: Option<usize>,
    /// Sibling-level ancestor of this node's contour, for apportioning.
    pub ancestor: usize,
    /// Deferred shift of this subtree.
    pub shift: f64,
    /// Per-sibling change of the deferred shift.
    pub change: f64,
}

impl Annotation {
    pub fn new(slot: usize) -> Self {
        Self {
            prelim: 0.0,
            modifier: 0.0,
            thread: None,
            ancestor: slot,
            shift: 0.0,
            change: 0.0,
        }
    }
}

/// Axis-aligned box around every node center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Extents {
    fn around(p: Point) -> Self {
        Self {
            min_x: p.x,
            max_x: p.x,
            min_y: p.y,
            max_y: p.y,
        }
    }

    fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_y = self.max_y.max(p.y);
    }
}

/// A positioned node in the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode<Id> {
    pub id: Id,
    pub depth: usize,
    pub position: Point,
}

/// The complete layout result, nodes in pre-order.
#[derive(Debug, Clone)]
pub struct TreeLayout<Id> {
    nodes: Vec<PositionedNode<Id>>,
    lookup: HashMap<Id, usize>,
    extents: Extents,
    node_width: f64,
}

impl<Id: Clone + Eq + Hash> TreeLayout<Id> {
    /// `nodes` must be non-empty; the first one is the root.
    pub(crate) fn new(nodes: Vec<PositionedNode<Id>>, node_width: f64) -> Self {
        let mut extents = Extents::around(nodes.first().map(|n| n.position).unwrap_or_default());
        for node in &nodes {
            extents.include(node.position);
        }
        let lookup = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
        Self {
            nodes,
            lookup,
            extents,
            node_width,
        }
    }

    pub fn get(&self, id: &Id) -> Option<Point> {
        self.lookup.get(id).map(|&i| self.nodes[i].position)
    }

    pub fn node(&self, id: &Id) -> Option<&PositionedNode<Id>> {
        self.lookup.get(id).map(|&i| &self.nodes[i])
    }

    pub fn root(&self) -> &PositionedNode<Id> {
        &self.nodes[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &PositionedNode<Id>> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn extents(&self) -> Extents {
        self.extents
    }

    /// Horizontal span including half a node on each side.
    pub fn width(&self) -> f64 {
        self.extents.max_x - self.extents.min_x + self.node_width
    }

    pub fn height(&self) -> f64 {
        self.extents.max_y - self.extents.min_y
    }

    /// Id -> position, for callers that want a plain map.
    pub fn to_map(&self) -> HashMap<Id, Point> {
        self.nodes
            .iter()
            .map(|n| (n.id.clone(), n.position))
            .collect()
    }
}

impl<Id: PartialEq> PartialEq for TreeLayout<Id> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.node_width == other.node_width
    }
}
