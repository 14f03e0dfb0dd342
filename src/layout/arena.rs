//! Flattening of the tree into an index arena.
//!
//! Slots are allocated in pre-order, so every parent has a smaller index than
//! its children: a forward loop over the slots is a pre-order pass and a
//! reverse loop is a post-order pass. No pass needs the call stack.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::tree::TreeModel;

use super::{LayoutError, TreeDefect};

#[derive(Debug, Clone)]
pub(crate) struct Slot<Id> {
    pub id: Id,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub depth: usize,
    /// Position among its siblings, 0-based.
    pub number: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct Arena<Id> {
    slots: Vec<Slot<Id>>,
}

impl<Id: Clone + Eq + Hash + Debug> Arena<Id> {
    /// Walk the tree from `root`, rejecting anything that is not a strict tree.
    pub fn index<T>(tree: &T, root: &Id, max_depth: usize) -> Result<Self, LayoutError>
    where
        T: TreeModel<NodeId = Id>,
    {
        let mut slots: Vec<Slot<Id>> = Vec::new();
        let mut seen: HashSet<Id> = HashSet::new();
        // (id, parent slot, sibling number); children pushed in reverse so they pop in order
        let mut stack: Vec<(Id, Option<usize>, usize)> = vec![(root.clone(), None, 0)];

        while let Some((id, parent, number)) = stack.pop() {
            if seen.contains(&id) {
                let on_path = Self::path_contains(&slots, parent, &id);
                let node = format!("{:?}", id);
                return Err(if on_path {
                    TreeDefect::Cycle { node }.into()
                } else {
                    TreeDefect::SharedNode { node }.into()
                });
            }

            let depth = match parent {
                Some(p) => {
                    let parent_id = &slots[p].id;
                    if tree.parent(&id).as_ref() != Some(parent_id) {
                        return Err(TreeDefect::ParentMismatch {
                            node: format!("{:?}", id),
                        }
                        .into());
                    }
                    slots[p].depth + 1
                }
                None => 0,
            };
            if depth > max_depth {
                return Err(TreeDefect::DepthExceeded {
                    node: format!("{:?}", id),
                    depth,
                    max_depth,
                }
                .into());
            }

            let index = slots.len();
            if let Some(p) = parent {
                slots[p].children.push(index);
            }
            seen.insert(id.clone());

            for (i, child) in tree.children(&id).iter().enumerate().rev() {
                stack.push((child.clone(), Some(index), i));
            }

            slots.push(Slot {
                id,
                parent,
                children: Vec::new(),
                depth,
                number,
            });
        }

        Ok(Self { slots })
    }

    fn path_contains(slots: &[Slot<Id>], mut cursor: Option<usize>, id: &Id) -> bool {
        while let Some(i) = cursor {
            if slots[i].id == *id {
                return true;
            }
            cursor = slots[i].parent;
        }
        false
    }

    /// Same slots with every child list reversed. Indices and parents are kept,
    /// so parents still precede children.
    pub fn mirrored(&self) -> Self {
        let slots = self
            .slots
            .iter()
            .map(|slot| {
                let sibling_count = slot
                    .parent
                    .map(|p| self.slots[p].children.len())
                    .unwrap_or(1);
                Slot {
                    id: slot.id.clone(),
                    parent: slot.parent,
                    children: slot.children.iter().rev().copied().collect(),
                    depth: slot.depth,
                    number: sibling_count - 1 - slot.number,
                }
            })
            .collect();
        Self { slots }
    }
}

impl<Id> Arena<Id> {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, index: usize) -> &Slot<Id> {
        &self.slots[index]
    }

    pub fn slots(&self) -> &[Slot<Id>] {
        &self.slots
    }

    pub fn children(&self, index: usize) -> &[usize] {
        &self.slots[index].children
    }

    pub fn parent(&self, index: usize) -> Option<usize> {
        self.slots[index].parent
    }

    pub fn same_parent(&self, a: usize, b: usize) -> bool {
        self.slots[a].parent.is_some() && self.slots[a].parent == self.slots[b].parent
    }

    /// Leftmost sibling of `index` (itself for the root).
    pub fn first_sibling(&self, index: usize) -> usize {
        self.slots[index]
            .parent
            .and_then(|p| self.slots[p].children.first().copied())
            .unwrap_or(index)
    }
}
