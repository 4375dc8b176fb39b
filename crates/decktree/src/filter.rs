//! # Name Filter
//!
//! Searching the deck list by name works on the **source forest**, not on the rows
//! currently on screen, so decks tucked away inside a collapsed parent are still
//! found.
//!
//! Rules, applied recursively from the roots:
//!
//! 1. A deck whose qualified name contains the pattern is kept together with its
//!    whole subtree.
//! 2. A deck that does not match but has matching descendants is kept as a new
//!    node carrying only those descendants, in their original order.
//! 3. Anything else is dropped.
//!
//! Because names are fully qualified (`"Science::Physics"`), rule 1 rarely keeps a
//! descendant that would not have matched on its own; it matters for patterns that
//! straddle a `::`.
//!
//! The input forest is never touched. Fully matching subtrees are shared with it;
//! partial branches are fresh nodes.

use crate::locale::Locale;
use crate::model::{DeckForest, DeckNode};
use std::sync::Arc;

/// A normalized search pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatcher {
    pattern: String,
    locale: Locale,
}

impl NameMatcher {
    /// Lower-cases `raw` with `locale` and trims whitespace and control characters
    /// from both ends. A missing pattern behaves like an empty one.
    pub fn new(raw: Option<&str>, locale: Locale) -> Self {
        let lowered = locale.to_lowercase(raw.unwrap_or_default());
        let pattern = lowered.trim_matches(|c: char| c <= ' ').to_string();
        Self { pattern, locale }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Whether the deck's qualified name contains the pattern, lower-cased under
    /// either the matcher's locale or the invariant rules.
    pub fn matches(&self, node: &DeckNode) -> bool {
        if self.pattern.is_empty() {
            return true;
        }
        [self.locale, Locale::Invariant]
            .iter()
            .any(|locale| locale.to_lowercase(&node.name).contains(&self.pattern))
    }
}

pub fn filter(forest: &[Arc<DeckNode>], matcher: &NameMatcher) -> DeckForest {
    if matcher.is_empty() {
        return forest.to_vec();
    }
    forest
        .iter()
        .filter_map(|node| filter_node(node, matcher))
        .collect()
}

fn filter_node(node: &Arc<DeckNode>, matcher: &NameMatcher) -> Option<Arc<DeckNode>> {
    if matcher.matches(node) {
        return Some(Arc::clone(node));
    }

    let children: DeckForest = node
        .children
        .iter()
        .filter_map(|child| filter_node(child, matcher))
        .collect();

    if children.is_empty() {
        None
    } else {
        Some(Arc::new(node.with_replaced_children(children)))
    }
}
