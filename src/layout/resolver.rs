//! Second walk: turn modifiers into absolute x, top-down.

use super::arena::Arena;
use super::types::Annotation;

/// x of every slot: its prelim plus the modifiers of all its proper ancestors.
pub(crate) fn resolve<Id>(arena: &Arena<Id>, notes: &[Annotation]) -> Vec<f64> {
    let mut x = vec![0.0; arena.len()];
    // modifier sum over a slot and its ancestors, i.e. what its children inherit
    let mut inherited = vec![0.0; arena.len()];

    for v in 0..arena.len() {
        let above = arena.parent(v).map(|p| inherited[p]).unwrap_or(0.0);
        x[v] = notes[v].prelim + above;
        inherited[v] = above + notes[v].modifier;
    }

    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ChildMap;

    #[test]
    fn test_modifiers_accumulate_down_the_chain() {
        let tree = ChildMap::from_edges([("r", "a"), ("a", "b"), ("b", "c")]);
        let arena = Arena::index(&tree, &"r", 10).unwrap();
        let mut notes: Vec<Annotation> = (0..arena.len()).map(Annotation::new).collect();
        for (slot, (prelim, modifier)) in [(1.0, 10.0), (2.0, 20.0), (3.0, 30.0), (4.0, 40.0)]
            .into_iter()
            .enumerate()
        {
            notes[slot].prelim = prelim;
            notes[slot].modifier = modifier;
        }

        let x = resolve(&arena, &notes);
        // own modifier never applies to the node itself
        assert_eq!(x, vec![1.0, 12.0, 33.0, 64.0]);
    }

    #[test]
    fn test_siblings_share_parent_offset() {
        let tree = ChildMap::from_edges([("r", "a"), ("r", "b")]);
        let arena = Arena::index(&tree, &"r", 10).unwrap();
        let mut notes: Vec<Annotation> = (0..arena.len()).map(Annotation::new).collect();
        notes[0].modifier = -0.5;
        notes[1].prelim = 0.0;
        notes[2].prelim = 1.0;
        notes[2].modifier = 7.0;

        assert_eq!(resolve(&arena, &notes), vec![0.0, -0.5, 0.5]);
    }
}
