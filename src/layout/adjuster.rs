//! Final re-centering of parents over their children, bottom-up.

use super::arena::Arena;

/// Put every non-leaf at the midpoint of its first and last child's final x.
pub(crate) fn recenter<Id>(arena: &Arena<Id>, x: &mut [f64]) {
    for v in (0..arena.len()).rev() {
        let children = arena.children(v);
        if let (Some(&first), Some(&last)) = (children.first(), children.last()) {
            x[v] = (x[first] + x[last]) / 2.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ChildMap;

    #[test]
    fn test_recenter_propagates_upward() {
        // r -> [a -> [c, d], b]
        let tree = ChildMap::from_edges([("r", "a"), ("r", "b"), ("a", "c"), ("a", "d")]);
        let arena = Arena::index(&tree, &"r", 10).unwrap();
        // slots: r a c d b, parents deliberately off
        let mut x = vec![100.0, 100.0, 0.0, 2.0, 3.0];
        recenter(&arena, &mut x);

        assert_eq!(x[1], 1.0);
        assert_eq!(x[0], 2.0);
        // leaves untouched
        assert_eq!(&x[2..], &[0.0, 2.0, 3.0]);
    }

    #[test]
    fn test_single_leaf_untouched() {
        let mut tree = ChildMap::new();
        tree.add_node("r");
        let arena = Arena::index(&tree, &"r", 10).unwrap();
        let mut x = vec![4.0];
        recenter(&arena, &mut x);
        assert_eq!(x, vec![4.0]);
    }
}
