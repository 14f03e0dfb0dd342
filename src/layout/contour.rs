//! Subtree contours: the outermost node of a subtree on each level.
//!
//! A contour continues into the first (left) or last (right) child. Where a
//! subtree ends before its neighbour does, a thread links its last contour
//! node to the neighbour's next one, so walking a contour costs one step per
//! level no matter how wide the subtree is.

use tracing::trace;

use super::arena::Arena;
use super::types::Annotation;

/// Next node down the left contour, `None` at the bottom.
pub(crate) fn next_left<Id>(arena: &Arena<Id>, notes: &[Annotation], v: usize) -> Option<usize> {
    arena.children(v).first().copied().or(notes[v].thread)
}

/// Next node down the right contour, `None` at the bottom.
pub(crate) fn next_right<Id>(arena: &Arena<Id>, notes: &[Annotation], v: usize) -> Option<usize> {
    arena.children(v).last().copied().or(notes[v].thread)
}

/// Thread leaf `from` to `to`.
///
/// `offset` is the modifier sum above `to` minus the one above `from`; it goes
/// into the leaf's modifier so running sums stay right across the jump. A leaf
/// has no descendants, so its final position is unaffected.
pub(crate) fn install_thread(notes: &mut [Annotation], from: usize, to: usize, offset: f64) {
    trace!(from, to, offset, "thread");
    notes[from].thread = Some(to);
    notes[from].modifier += offset;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ChildMap;

    fn fixture() -> (Arena<&'static str>, Vec<Annotation>) {
        // r -> [a -> [c, d], b]
        let tree = ChildMap::from_edges([("r", "a"), ("r", "b"), ("a", "c"), ("a", "d")]);
        let arena = Arena::index(&tree, &"r", 10).unwrap();
        let notes = (0..arena.len()).map(Annotation::new).collect();
        (arena, notes)
    }

    #[test]
    fn test_contour_follows_children() {
        let (arena, notes) = fixture();
        // slots: r=0 a=1 c=2 d=3 b=4
        assert_eq!(next_left(&arena, &notes, 0), Some(1));
        assert_eq!(next_right(&arena, &notes, 0), Some(4));
        assert_eq!(next_left(&arena, &notes, 1), Some(2));
        assert_eq!(next_right(&arena, &notes, 1), Some(3));
    }

    #[test]
    fn test_bottom_of_contour() {
        let (arena, notes) = fixture();
        assert_eq!(next_left(&arena, &notes, 4), None);
        assert_eq!(next_right(&arena, &notes, 2), None);
    }

    #[test]
    fn test_thread_extends_contour() {
        let (arena, mut notes) = fixture();
        notes[4].modifier = 2.0;
        install_thread(&mut notes, 4, 3, -1.5);

        assert_eq!(next_left(&arena, &notes, 4), Some(3));
        assert_eq!(next_right(&arena, &notes, 4), Some(3));
        assert_eq!(notes[4].modifier, 0.5);
        // children win over threads
        assert_eq!(next_left(&arena, &notes, 1), Some(2));
    }
}
