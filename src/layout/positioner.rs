//! First walk: preliminary positions and modifiers, bottom-up.
//!
//! Children are merged into their parent left to right. Each new child is put
//! one sibling distance right of its left neighbour, then its left contour is
//! compared level by level with the right contour of everything merged so far.
//! Any overlap pushes the new subtree right and spreads the same push evenly
//! over the smaller subtrees in between, so they don't pile up on one side.

use std::fmt::Debug;

use tracing::trace;

use super::arena::Arena;
use super::config::LayoutConfig;
use super::contour::{install_thread, next_left, next_right};
use super::types::Annotation;

pub(crate) struct Positioner<'a, Id> {
    arena: &'a Arena<Id>,
    config: &'a LayoutConfig,
    notes: Vec<Annotation>,
}

impl<'a, Id: Debug> Positioner<'a, Id> {
    pub fn new(arena: &'a Arena<Id>, config: &'a LayoutConfig) -> Self {
        Self {
            arena,
            config,
            notes: (0..arena.len()).map(Annotation::new).collect(),
        }
    }

    /// Run the walk over the whole arena and hand back the annotations.
    pub fn run(mut self) -> Vec<Annotation> {
        // parents precede children, so reverse slot order is post-order
        for v in (0..self.arena.len()).rev() {
            self.first_walk(v);
        }
        self.notes
    }

    /// All children of `v` are already positioned within their own subtrees.
    fn first_walk(&mut self, v: usize) {
        let arena = self.arena;
        let children = arena.children(v);
        let (Some(&first), Some(&last)) = (children.first(), children.last()) else {
            // leaf: prelim 0 until its parent merges it
            return;
        };

        let mut default_ancestor = first;
        for pair in children.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            self.place_after(left, right);
            default_ancestor = self.apportion(right, left, default_ancestor);
        }
        self.execute_shifts(v);

        self.notes[v].prelim = (self.notes[first].prelim + self.notes[last].prelim) / 2.0;
    }

    /// Put `right` one sibling distance after `left`, dragging its descendants along.
    fn place_after(&mut self, left: usize, right: usize) {
        let target = self.notes[left].prelim + self.config.distance(true);
        let shift = target - self.notes[right].prelim;
        self.notes[right].prelim += shift;
        self.notes[right].modifier += shift;
    }

    /// Resolve overlaps between the subtree of `v` and the forest to its left.
    ///
    /// Four contours are walked together: the inner ones facing each other
    /// (`inner_left` is the forest's right contour, `inner_right` is v's left
    /// contour) and the outer ones (`outer_left` is the forest's left contour,
    /// `outer_right` is v's right contour). Each carries the sum of modifiers
    /// above its current node.
    fn apportion(&mut self, v: usize, left_sibling: usize, mut default_ancestor: usize) -> usize {
        let arena = self.arena;

        let mut inner_left = left_sibling;
        let mut inner_right = v;
        let mut outer_left = arena.first_sibling(v);
        let mut outer_right = v;

        let mut sum_inner_left = self.notes[inner_left].modifier;
        let mut sum_inner_right = self.notes[inner_right].modifier;
        let mut sum_outer_left = self.notes[outer_left].modifier;
        let mut sum_outer_right = self.notes[outer_right].modifier;

        loop {
            let (Some(next_il), Some(next_ir)) = (
                next_right(arena, &self.notes, inner_left),
                next_left(arena, &self.notes, inner_right),
            ) else {
                break;
            };
            // outer contours are at least as deep as the inner ones they enclose
            let (Some(next_ol), Some(next_or)) = (
                next_left(arena, &self.notes, outer_left),
                next_right(arena, &self.notes, outer_right),
            ) else {
                break;
            };
            inner_left = next_il;
            inner_right = next_ir;
            outer_left = next_ol;
            outer_right = next_or;

            self.notes[outer_right].ancestor = v;

            let distance = self.config.distance(arena.same_parent(inner_left, inner_right));
            let shift = (self.notes[inner_left].prelim + sum_inner_left)
                - (self.notes[inner_right].prelim + sum_inner_right)
                + distance;
            if shift > 0.0 {
                let ancestor = self.sibling_ancestor(inner_left, v, default_ancestor);
                self.move_subtree(ancestor, v, shift);
                sum_inner_right += shift;
                sum_outer_right += shift;
            }

            sum_inner_left += self.notes[inner_left].modifier;
            sum_inner_right += self.notes[inner_right].modifier;
            sum_outer_left += self.notes[outer_left].modifier;
            sum_outer_right += self.notes[outer_right].modifier;
        }

        // The forest goes deeper: continue v's right contour into it.
        if let Some(target) = next_right(arena, &self.notes, inner_left) {
            if next_right(arena, &self.notes, outer_right).is_none() {
                install_thread(
                    &mut self.notes,
                    outer_right,
                    target,
                    sum_inner_left - sum_outer_right,
                );
            }
        }

        // v goes deeper: continue the forest's left contour into v.
        if let Some(target) = next_left(arena, &self.notes, inner_right) {
            if next_left(arena, &self.notes, outer_left).is_none() {
                install_thread(
                    &mut self.notes,
                    outer_left,
                    target,
                    sum_inner_right - sum_outer_left,
                );
                default_ancestor = v;
            }
        }

        default_ancestor
    }

    /// The sibling of `v` whose subtree contains the conflicting node.
    fn sibling_ancestor(&self, conflict: usize, v: usize, default_ancestor: usize) -> usize {
        let candidate = self.notes[conflict].ancestor;
        if self.arena.same_parent(candidate, v) {
            candidate
        } else {
            default_ancestor
        }
    }

    /// Move `right` by `shift` and schedule the interior siblings between
    /// `left` and `right` to move by evenly growing fractions of it.
    ///
    /// `left` itself never moves. The deferred amounts are applied by
    /// `execute_shifts` once all children are merged.
    fn move_subtree(&mut self, left: usize, right: usize, shift: f64) {
        let gaps = self
            .arena
            .slot(right)
            .number
            .saturating_sub(self.arena.slot(left).number)
            .max(1) as f64;
        trace!(
            node = ?self.arena.slot(right).id,
            against = ?self.arena.slot(left).id,
            shift,
            "move subtree"
        );

        self.notes[right].change -= shift / gaps;
        self.notes[right].shift += shift;
        self.notes[left].change += shift / gaps;
        self.notes[right].prelim += shift;
        self.notes[right].modifier += shift;
    }

    fn execute_shifts(&mut self, v: usize) {
        let arena = self.arena;
        let mut shift = 0.0;
        let mut change = 0.0;
        for &child in arena.children(v).iter().rev() {
            let note = &mut self.notes[child];
            note.prelim += shift;
            note.modifier += shift;
            change += note.change;
            shift += note.shift + change;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ChildMap;

    fn position(edges: &[(&'static str, &'static str)], root: &'static str) -> (Arena<&'static str>, Vec<Annotation>) {
        let tree = ChildMap::from_edges(edges.iter().copied());
        let arena = Arena::index(&tree, &root, 100).unwrap();
        let config = LayoutConfig::default();
        let notes = Positioner::new(&arena, &config).run();
        (arena, notes)
    }

    fn slot_of(arena: &Arena<&'static str>, id: &str) -> usize {
        arena.slots().iter().position(|s| s.id == id).unwrap()
    }

    #[test]
    fn test_leaves_spaced_by_separation() {
        let (arena, notes) = position(&[("r", "a"), ("r", "b"), ("r", "c")], "r");
        let prelims: Vec<f64> = ["a", "b", "c"]
            .iter()
            .map(|id| notes[slot_of(&arena, id)].prelim)
            .collect();
        assert_eq!(prelims, vec![0.0, 1.0, 2.0]);
        assert_eq!(notes[0].prelim, 1.0);
        assert_eq!(notes[0].modifier, 0.0);
    }

    #[test]
    fn test_single_child_takes_child_prelim() {
        let (arena, notes) = position(&[("r", "a"), ("a", "x"), ("a", "y")], "r");
        let a = slot_of(&arena, "a");
        assert_eq!(notes[a].prelim, 0.5);
        assert_eq!(notes[0].prelim, notes[a].prelim);
    }

    #[test]
    fn test_parent_moves_with_modifier() {
        // second child has two leaves centered at 0.5 locally
        let (arena, notes) = position(&[("r", "a"), ("r", "b"), ("b", "x"), ("b", "y")], "r");
        let b = slot_of(&arena, "b");
        // placed one unit after "a", descendants follow through the modifier
        assert_eq!(notes[b].prelim, 1.0);
        assert_eq!(notes[b].modifier, 0.5);
    }

    #[test]
    fn test_interior_sibling_apportioned() {
        // a and c each have three leaves; m sits between them
        let (arena, notes) = position(
            &[
                ("r", "a"),
                ("r", "m"),
                ("r", "c"),
                ("a", "a1"),
                ("a", "a2"),
                ("a", "a3"),
                ("c", "c1"),
                ("c", "c2"),
                ("c", "c3"),
            ],
            "r",
        );
        let a = notes[slot_of(&arena, "a")].prelim;
        let m = notes[slot_of(&arena, "m")].prelim;
        let c = notes[slot_of(&arena, "c")].prelim;
        assert_eq!(a, 1.0);
        assert_eq!(c, 4.0);
        // pushed halfway along with c instead of staying next to a
        assert_eq!(m, 2.5);
        assert_eq!(notes[0].prelim, 2.5);
    }

    #[test]
    fn test_thread_installed_for_shallow_subtree() {
        // leaf "a" is shallower than "b", so its contour is threaded into b's leaves
        let (arena, notes) = position(&[("r", "a"), ("r", "b"), ("b", "x"), ("b", "y")], "r");
        let a = slot_of(&arena, "a");
        let x = slot_of(&arena, "x");
        assert_eq!(notes[a].thread, Some(x));
    }
}
