//! # Domain Model: Decks and Counts
//!
//! A deck is a named, hierarchically nestable collection of study cards. Names are
//! path-qualified with `::` (`"Languages::Spanish::Verbs"`), and the hierarchy the
//! collection hands out mirrors those paths.
//!
//! ## Immutability
//!
//! [`DeckNode`]s are built once at the collection boundary and never mutated after
//! that. Children are held behind [`Arc`] so the same subtree can be shared between
//! the source forest, the flattened rows and a filtered forest without copying, and
//! so a forest can be handed to a worker thread as-is.
//!
//! ## Depth
//!
//! `depth` is 0 for top-level decks and exactly `parent.depth + 1` for a child.
//! [`DeckNode::new`] derives it from the number of name components, and
//! [`DeckNode::with_children`] re-bases every descendant under the parent, so a
//! tree assembled with the builder methods always satisfies the invariant.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use std::sync::Arc;

pub type DeckId = i64;

/// The collection's built-in deck. Legacy collections may hide it when empty.
pub const DEFAULT_DECK_ID: DeckId = 1;

/// Separator between the components of a qualified deck name.
pub const NAME_SEPARATOR: &str = "::";

/// An ordered sequence of top-level decks.
pub type DeckForest = Vec<Arc<DeckNode>>;

/// Due card counts of a deck: new, learning and review.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Counts {
    pub new: u32,
    pub learning: u32,
    pub review: u32,
}

impl Counts {
    pub const fn new(new: u32, learning: u32, review: u32) -> Self {
        Self {
            new,
            learning,
            review,
        }
    }

    pub fn total(&self) -> u32 {
        self.new
            .saturating_add(self.learning)
            .saturating_add(self.review)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Add for Counts {
    type Output = Counts;

    fn add(self, rhs: Counts) -> Counts {
        Counts {
            new: self.new.saturating_add(rhs.new),
            learning: self.learning.saturating_add(rhs.learning),
            review: self.review.saturating_add(rhs.review),
        }
    }
}

impl AddAssign for Counts {
    fn add_assign(&mut self, rhs: Counts) {
        *self = *self + rhs;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckNode {
    pub id: DeckId,
    /// Fully qualified name, e.g. `"Parent::Child"`.
    pub name: String,
    pub depth: usize,
    pub counts: Counts,
    pub collapsed: bool,
    /// Dynamic (filter) deck. Only affects styling.
    pub filtered: bool,
    /// False for filter decks whose counts are not meaningful to show.
    pub display_counts: bool,
    pub children: Vec<Arc<DeckNode>>,
}

impl DeckNode {
    pub fn new(id: DeckId, name: impl Into<String>) -> Self {
        let name = name.into();
        let depth = name.split(NAME_SEPARATOR).count().saturating_sub(1);
        Self {
            id,
            name,
            depth,
            counts: Counts::default(),
            collapsed: false,
            filtered: false,
            display_counts: true,
            children: Vec::new(),
        }
    }

    pub fn with_counts(mut self, counts: Counts) -> Self {
        self.counts = counts;
        self
    }

    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn with_filtered(mut self, filtered: bool) -> Self {
        self.filtered = filtered;
        self
    }

    pub fn with_display_counts(mut self, display_counts: bool) -> Self {
        self.display_counts = display_counts;
        self
    }

    /// Attaches `children`, re-basing their depths under this node.
    pub fn with_children(mut self, children: Vec<DeckNode>) -> Self {
        let child_depth = self.depth + 1;
        self.children = children
            .into_iter()
            .map(|mut child| {
                child.set_depth(child_depth);
                Arc::new(child)
            })
            .collect();
        self
    }

    /// A copy of this node's own fields with `children` swapped in.
    ///
    /// The filter uses this to synthesize partial-match branches; the original node
    /// is left untouched.
    pub fn with_replaced_children(&self, children: Vec<Arc<DeckNode>>) -> DeckNode {
        DeckNode {
            id: self.id,
            name: self.name.clone(),
            depth: self.depth,
            counts: self.counts,
            collapsed: self.collapsed,
            filtered: self.filtered,
            display_counts: self.display_counts,
            children,
        }
    }

    fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
        for child in &mut self.children {
            Arc::make_mut(child).set_depth(depth + 1);
        }
    }

    /// The trailing segment of the qualified name.
    pub fn last_component(&self) -> &str {
        self.name
            .rsplit(NAME_SEPARATOR)
            .next()
            .unwrap_or(&self.name)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn should_display_counts(&self) -> bool {
        self.display_counts
    }

    /// Number of nodes in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.subtree_len())
            .sum::<usize>()
    }
}

/// Wraps owned nodes into a forest.
pub fn forest(nodes: Vec<DeckNode>) -> DeckForest {
    nodes.into_iter().map(Arc::new).collect()
}

/// Total number of nodes in a forest.
pub fn node_count(forest: &[Arc<DeckNode>]) -> usize {
    forest.iter().map(|node| node.subtree_len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_from_name() {
        assert_eq!(DeckNode::new(1, "Default").depth, 0);
        assert_eq!(DeckNode::new(2, "A::B").depth, 1);
        assert_eq!(DeckNode::new(3, "A::B::C").depth, 2);
    }

    #[test]
    fn test_last_component() {
        assert_eq!(DeckNode::new(1, "Default").last_component(), "Default");
        assert_eq!(
            DeckNode::new(2, "Languages::Spanish::Verbs").last_component(),
            "Verbs"
        );
    }

    #[test]
    fn test_with_children_rebases_depth() {
        // Children built with unqualified names still land one level down
        let tree = DeckNode::new(1, "Science").with_children(vec![DeckNode::new(2, "Physics")
            .with_children(vec![DeckNode::new(3, "Optics")])]);

        assert_eq!(tree.depth, 0);
        assert_eq!(tree.children[0].depth, 1);
        assert_eq!(tree.children[0].children[0].depth, 2);
    }

    #[test]
    fn test_nesting_an_assembled_subtree_rebases_again() {
        let inner =
            DeckNode::new(2, "B").with_children(vec![DeckNode::new(3, "C")]);
        let outer = DeckNode::new(1, "A").with_children(vec![inner]);
        let root = DeckNode::new(0, "Root").with_children(vec![outer]);

        let a = &root.children[0];
        assert_eq!(a.depth, 1);
        assert_eq!(a.children[0].depth, 2);
        assert_eq!(a.children[0].children[0].depth, 3);
    }

    #[test]
    fn test_counts_total_and_add() {
        let mut totals = Counts::new(1, 2, 3);
        totals += Counts::new(10, 0, 5);
        assert_eq!(totals, Counts::new(11, 2, 8));
        assert_eq!(totals.total(), 21);
        assert!(Counts::default().is_empty());
    }

    #[test]
    fn test_counts_saturate() {
        let big = Counts::new(u32::MAX, 1, 0);
        assert_eq!(big.total(), u32::MAX);
        assert_eq!((big + Counts::new(1, 0, 0)).new, u32::MAX);
    }

    #[test]
    fn test_node_count() {
        let f = forest(vec![
            DeckNode::new(1, "A").with_children(vec![DeckNode::new(2, "A::B")]),
            DeckNode::new(3, "C"),
        ]);
        assert_eq!(node_count(&f), 3);
    }

    #[test]
    fn test_replaced_children_keeps_own_fields() {
        let original = DeckNode::new(1, "A")
            .with_counts(Counts::new(1, 1, 1))
            .with_collapsed(true)
            .with_children(vec![DeckNode::new(2, "A::B"), DeckNode::new(3, "A::C")]);
        let kept = vec![original.children[1].clone()];
        let copy = original.with_replaced_children(kept);

        assert_eq!(copy.id, 1);
        assert_eq!(copy.counts, Counts::new(1, 1, 1));
        assert!(copy.collapsed);
        assert_eq!(copy.children.len(), 1);
        assert_eq!(original.children.len(), 2);
    }
}
