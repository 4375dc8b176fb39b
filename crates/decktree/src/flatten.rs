//! # Tree Flattening
//!
//! A list widget needs rows, not a tree. [`flatten`] walks the forest depth-first,
//! pre-order, and emits one row per deck the user should currently see:
//!
//! - A collapsed deck still gets its own row; its descendants do not.
//! - In legacy mode only, the default deck is dropped when it is empty, childless
//!   and not alone at its level. Modern collections already leave it out upstream.
//!
//! While walking it also accumulates the due totals shown under the list (top-level
//! decks only, so a parent and its children are never counted twice) and notes
//! whether any subdecks exist, which decides whether expanders are drawn at all.

use crate::model::{Counts, DeckForest, DeckId, DeckNode, DEFAULT_DECK_ID};
use std::sync::Arc;

/// Everything a build needs from the collection besides the forest itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildContext {
    pub current_deck_id: Option<DeckId>,
    pub legacy_schema: bool,
    pub default_deck_id: DeckId,
    pub default_deck_has_cards: bool,
}

impl Default for BuildContext {
    fn default() -> Self {
        Self {
            current_deck_id: None,
            legacy_schema: false,
            default_deck_id: DEFAULT_DECK_ID,
            default_deck_has_cards: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Flattened {
    /// Rows in display order.
    pub visible: DeckForest,
    /// Sum of the counts of displayable top-level decks.
    pub totals: Counts,
    pub has_subdecks: bool,
}

pub fn flatten(forest: &[Arc<DeckNode>], ctx: &BuildContext) -> Flattened {
    let mut flattened = Flattened::default();
    flatten_level(forest, ctx, &mut flattened);
    flattened
}

fn flatten_level(nodes: &[Arc<DeckNode>], ctx: &BuildContext, out: &mut Flattened) {
    for node in nodes {
        if is_hidden_default(node, nodes.len(), ctx) {
            continue;
        }

        // A collapsed parent never lets the walk reach depth > 0, but it still has subdecks
        if node.depth > 0 || node.has_children() {
            out.has_subdecks = true;
        }

        out.visible.push(Arc::clone(node));

        if node.depth == 0 && node.should_display_counts() {
            out.totals += node.counts;
        }

        if !node.collapsed {
            flatten_level(&node.children, ctx, out);
        }
    }
}

fn is_hidden_default(node: &DeckNode, siblings: usize, ctx: &BuildContext) -> bool {
    ctx.legacy_schema
        && node.id == ctx.default_deck_id
        && siblings > 1
        && !node.has_children()
        && !ctx.default_deck_has_cards
}

/// Returns `forest` without the default deck [`flatten`] would hide.
///
/// Unchanged subtrees are shared with the input; only the branches that lost a
/// child are rebuilt.
pub fn prune_hidden_default(forest: &[Arc<DeckNode>], ctx: &BuildContext) -> DeckForest {
    if !ctx.legacy_schema {
        return forest.to_vec();
    }
    prune_level(forest, ctx)
}

fn prune_level(nodes: &[Arc<DeckNode>], ctx: &BuildContext) -> DeckForest {
    nodes
        .iter()
        .filter(|node| !is_hidden_default(node, nodes.len(), ctx))
        .map(|node| {
            let children = prune_level(&node.children, ctx);
            let unchanged = children.len() == node.children.len()
                && children
                    .iter()
                    .zip(&node.children)
                    .all(|(a, b)| Arc::ptr_eq(a, b));
            if unchanged {
                Arc::clone(node)
            } else {
                Arc::new(node.with_replaced_children(children))
            }
        })
        .collect()
}
