//! Render-ready rows.
//!
//! A [`DeckRow`] carries what a list item needs to draw itself and nothing more:
//! the short name, indentation depth, which expander affordance to show, whether it
//! is the current deck, and the counts if the deck displays them. Colors, drawables
//! and padding are the host's business.

use crate::model::{Counts, DeckId, DeckNode};
use serde::Serialize;

/// The expand/collapse affordance of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Expander {
    /// Collapsed deck with children; activating it expands.
    Expand,
    /// Expanded deck with children; activating it collapses.
    Collapse,
    /// A deck without children. Reserves the space so names stay aligned.
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckRow {
    pub id: DeckId,
    /// Last name component, e.g. `"Verbs"` for `"Spanish::Verbs"`.
    pub name: String,
    pub full_name: String,
    pub depth: usize,
    /// `None` when no deck in the list has subdecks, so no expander column is drawn.
    pub expander: Option<Expander>,
    pub is_current: bool,
    pub filtered: bool,
    /// `None` for decks that suppress their counts.
    pub counts: Option<Counts>,
}

impl DeckRow {
    pub fn from_node(node: &DeckNode, show_expanders: bool, current: Option<DeckId>) -> Self {
        let expander = show_expanders.then(|| match (node.has_children(), node.collapsed) {
            (false, _) => Expander::Blank,
            (true, true) => Expander::Expand,
            (true, false) => Expander::Collapse,
        });

        Self {
            id: node.id,
            name: node.last_component().to_string(),
            full_name: node.name.clone(),
            depth: node.depth,
            expander,
            is_current: current == Some(node.id),
            filtered: node.filtered,
            counts: node.should_display_counts().then_some(node.counts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expander_states() {
        let leaf = DeckNode::new(1, "A::Leaf");
        let open = DeckNode::new(2, "B").with_children(vec![DeckNode::new(3, "B::C")]);
        let closed = open.clone().with_collapsed(true);

        assert_eq!(
            DeckRow::from_node(&leaf, true, None).expander,
            Some(Expander::Blank)
        );
        assert_eq!(
            DeckRow::from_node(&open, true, None).expander,
            Some(Expander::Collapse)
        );
        assert_eq!(
            DeckRow::from_node(&closed, true, None).expander,
            Some(Expander::Expand)
        );
        assert_eq!(DeckRow::from_node(&open, false, None).expander, None);
    }

    #[test]
    fn test_row_fields() {
        let node = DeckNode::new(7, "Spanish::Verbs")
            .with_counts(Counts::new(4, 0, 2))
            .with_filtered(true);
        let row = DeckRow::from_node(&node, false, Some(7));

        assert_eq!(row.name, "Verbs");
        assert_eq!(row.full_name, "Spanish::Verbs");
        assert_eq!(row.depth, 1);
        assert!(row.is_current);
        assert!(row.filtered);
        assert_eq!(row.counts, Some(Counts::new(4, 0, 2)));
    }

    #[test]
    fn test_hidden_counts() {
        let node = DeckNode::new(7, "Cram").with_display_counts(false);
        let row = DeckRow::from_node(&node, false, Some(1));
        assert_eq!(row.counts, None);
        assert!(!row.is_current);
    }
}
