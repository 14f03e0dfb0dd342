//! Tree layout: Walker's node-positioning algorithm, linear time.
//!
//! Passes, in order:
//! 1. index the tree into an arena (rejects cycles, shared nodes, deep trees)
//! 2. first walk: preliminary x and modifiers, bottom-up, with contour threads
//! 3. second walk: absolute x from accumulated modifiers, top-down
//! 4. (symmetric mode) the same over the mirrored tree, negated and averaged
//! 5. re-center every parent over its children
//!
//! All working state lives inside one call; nothing is published unless every
//! pass succeeds.

mod adjuster;
mod arena;
mod config;
mod contour;
mod positioner;
mod resolver;
mod types;

pub use config::{Bounds, ConfigError, DEFAULT_MAX_DEPTH, LayoutConfig};
pub use types::{Extents, Point, PositionedNode, TreeLayout};

use tracing::{debug, debug_span};

use crate::tree::TreeModel;
use arena::Arena;
use positioner::Positioner;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Malformed tree: {0}")]
    MalformedTree(#[from] TreeDefect),
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error("Node {node} at ({x}, {y}) is outside the configured bounds")]
    OutOfRange { node: String, x: f64, y: f64 },
}

/// Ways the input can fail to be a strict tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeDefect {
    #[error("cycle through node {node}")]
    Cycle { node: String },
    #[error("node {node} is reachable from more than one parent")]
    SharedNode { node: String },
    #[error("node {node} names a different parent than the one it was reached from")]
    ParentMismatch { node: String },
    #[error("node {node} is at depth {depth}, beyond the maximum of {max_depth}")]
    DepthExceeded {
        node: String,
        depth: usize,
        max_depth: usize,
    },
}

/// Layout engine with a validated configuration.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Compute coordinates for every node reachable from `root`.
    ///
    /// `root` need not be the model's root; its subtree is laid out on its own.
    pub fn layout<T: TreeModel>(
        &self,
        tree: &T,
        root: &T::NodeId,
    ) -> Result<TreeLayout<T::NodeId>, LayoutError> {
        let config = &self.config;
        let arena = Arena::index(tree, root, config.max_depth)?;
        let _span = debug_span!("layout", nodes = arena.len(), symmetric = config.symmetric).entered();

        let mut x = normalized_pass(&arena, config);
        if config.symmetric {
            let mirror = arena.mirrored();
            let mirrored = normalized_pass(&mirror, config);
            // mirrored x grows toward the first child, so subtract to flip it back
            for (x, m) in x.iter_mut().zip(&mirrored) {
                *x = (*x - *m) / 2.0;
            }
        }
        adjuster::recenter(&arena, &mut x);

        let mut nodes = Vec::with_capacity(arena.len());
        for (slot, &x) in arena.slots().iter().zip(&x) {
            let position = Point::new(
                config.origin.x + x,
                config.origin.y + slot.depth as f64 * config.level_height,
            );
            if let Some(bounds) = &config.bounds {
                if !bounds.contains(position) {
                    return Err(LayoutError::OutOfRange {
                        node: format!("{:?}", slot.id),
                        x: position.x,
                        y: position.y,
                    });
                }
            }
            nodes.push(PositionedNode {
                id: slot.id.clone(),
                depth: slot.depth,
                position,
            });
        }

        let layout = TreeLayout::new(nodes, config.node_width);
        debug!(
            width = layout.width(),
            height = layout.height(),
            "layout complete"
        );
        Ok(layout)
    }
}

/// Lay out `root`'s subtree with `config`.
pub fn layout<T: TreeModel>(
    tree: &T,
    root: &T::NodeId,
    config: &LayoutConfig,
) -> Result<TreeLayout<T::NodeId>, LayoutError> {
    LayoutEngine::new(config.clone())?.layout(tree, root)
}

/// First and second walk over `arena`, shifted so the root sits at 0.
fn normalized_pass<Id: std::fmt::Debug>(arena: &Arena<Id>, config: &LayoutConfig) -> Vec<f64> {
    let notes = Positioner::new(arena, config).run();
    let mut x = resolver::resolve(arena, &notes);
    let root = x[0];
    for x in x.iter_mut() {
        *x -= root;
    }
    x
}
