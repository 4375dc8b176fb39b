//! # Row Resolution
//!
//! Callers ask for "the row of deck X" after selecting, studying or creating a deck.
//! That deck may not have a row of its own: it can sit inside a collapsed parent or
//! be filtered out. [`position_of`] walks up the hierarchy until it hits an ancestor
//! that is visible and returns that row instead, so the list lands next to the deck
//! rather than failing.
//!
//! Unknown ids, and ids whose ancestors are all hidden, resolve to row `0`.

use crate::model::{DeckId, DeckNode};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Parent lookup by deck id.
pub trait DeckHierarchy {
    /// The immediate parent of `id`, or `None` for top-level or unknown decks.
    fn parent_id(&self, id: DeckId) -> Option<DeckId>;
}

impl<T: DeckHierarchy + ?Sized> DeckHierarchy for &T {
    fn parent_id(&self, id: DeckId) -> Option<DeckId> {
        (**self).parent_id(id)
    }
}

/// A [`DeckHierarchy`] read off a forest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentIndex {
    parents: HashMap<DeckId, DeckId>,
}

impl ParentIndex {
    pub fn from_forest(forest: &[Arc<DeckNode>]) -> Self {
        let mut parents = HashMap::new();
        for root in forest {
            index_children(root, &mut parents);
        }
        Self { parents }
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

fn index_children(node: &DeckNode, parents: &mut HashMap<DeckId, DeckId>) {
    for child in &node.children {
        parents.insert(child.id, node.id);
        index_children(child, parents);
    }
}

impl DeckHierarchy for ParentIndex {
    fn parent_id(&self, id: DeckId) -> Option<DeckId> {
        self.parents.get(&id).copied()
    }
}

/// Index of `target` in `visible`, or of its nearest visible ancestor, or `0`.
pub fn position_of<H: DeckHierarchy + ?Sized>(
    visible: &[Arc<DeckNode>],
    target: DeckId,
    hierarchy: &H,
) -> usize {
    let mut seen = HashSet::new();
    let mut current = Some(target);

    while let Some(id) = current {
        if let Some(position) = visible.iter().position(|node| node.id == id) {
            return position;
        }
        // A broken hierarchy must not loop forever
        if !seen.insert(id) {
            break;
        }
        current = hierarchy.parent_id(id);
    }

    tracing::debug!(deck_id = target, "no visible row or ancestor, using first row");
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::{flatten, BuildContext};
    use crate::model::{forest, DeckForest};

    fn nested(collapse_b: bool) -> DeckForest {
        forest(vec![
            DeckNode::new(1, "A"),
            DeckNode::new(2, "B")
                .with_collapsed(collapse_b)
                .with_children(vec![DeckNode::new(3, "B::C")
                    .with_children(vec![DeckNode::new(4, "B::C::D")])]),
            DeckNode::new(5, "E"),
        ])
    }

    #[test]
    fn test_visible_deck_returns_its_index() {
        let f = nested(false);
        let visible = flatten(&f, &BuildContext::default()).visible;
        let parents = ParentIndex::from_forest(&f);

        for (expected, node) in visible.iter().enumerate() {
            assert_eq!(position_of(&visible, node.id, &parents), expected);
        }
    }

    #[test]
    fn test_hidden_deck_resolves_to_collapsed_ancestor() {
        let f = nested(true);
        let visible = flatten(&f, &BuildContext::default()).visible;
        let parents = ParentIndex::from_forest(&f);

        // Rows: A, B, E. D and C live under collapsed B.
        assert_eq!(position_of(&visible, 4, &parents), 1);
        assert_eq!(position_of(&visible, 3, &parents), 1);
    }

    #[test]
    fn test_unknown_deck_resolves_to_first_row() {
        let f = nested(false);
        let visible = flatten(&f, &BuildContext::default()).visible;
        let parents = ParentIndex::from_forest(&f);

        assert_eq!(position_of(&visible, 999, &parents), 0);
        assert_eq!(position_of(&[], 1, &parents), 0);
    }

    #[test]
    fn test_cyclic_hierarchy_terminates() {
        struct Cycle;
        impl DeckHierarchy for Cycle {
            fn parent_id(&self, id: DeckId) -> Option<DeckId> {
                Some(if id == 10 { 11 } else { 10 })
            }
        }
        let visible = forest(vec![DeckNode::new(1, "A"), DeckNode::new(2, "B")]);
        assert_eq!(position_of(&visible, 10, &Cycle), 0);
    }

    #[test]
    fn test_parent_index() {
        let parents = ParentIndex::from_forest(&nested(false));
        assert_eq!(parents.len(), 2);
        assert_eq!(parents.parent_id(3), Some(2));
        assert_eq!(parents.parent_id(4), Some(3));
        assert_eq!(parents.parent_id(1), None);
        assert_eq!(parents.parent_id(42), None);
    }
}
