use super::Collection;
use crate::error::Result;
use crate::model::{Counts, DeckForest, DeckId, DeckNode, DEFAULT_DECK_ID};
use crate::position::{DeckHierarchy, ParentIndex};
use std::sync::Arc;

pub const DEFAULT_SECONDS_PER_CARD: u32 = 10;

/// A collection held entirely in memory.
#[derive(Debug, Clone)]
pub struct InMemoryCollection {
    forest: DeckForest,
    parents: ParentIndex,
    current_deck_id: Option<DeckId>,
    default_deck_id: DeckId,
    default_deck_cards: u32,
    legacy_schema: bool,
    seconds_per_card: u32,
}

impl Default for InMemoryCollection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemoryCollection {
    pub fn new(forest: DeckForest) -> Self {
        let parents = ParentIndex::from_forest(&forest);
        Self {
            forest,
            parents,
            current_deck_id: None,
            default_deck_id: DEFAULT_DECK_ID,
            default_deck_cards: 0,
            legacy_schema: false,
            seconds_per_card: DEFAULT_SECONDS_PER_CARD,
        }
    }

    pub fn with_current_deck(mut self, id: DeckId) -> Self {
        self.current_deck_id = Some(id);
        self
    }

    pub fn with_legacy_schema(mut self, legacy: bool) -> Self {
        self.legacy_schema = legacy;
        self
    }

    pub fn with_default_deck_id(mut self, id: DeckId) -> Self {
        self.default_deck_id = id;
        self
    }

    /// Number of cards stored in the default deck (not just due ones).
    pub fn with_default_deck_cards(mut self, cards: u32) -> Self {
        self.default_deck_cards = cards;
        self
    }

    pub fn with_seconds_per_card(mut self, seconds: u32) -> Self {
        self.seconds_per_card = seconds;
        self
    }

    /// Replaces the decks, e.g. after the user collapsed one.
    pub fn set_forest(&mut self, forest: DeckForest) {
        self.parents = ParentIndex::from_forest(&forest);
        self.forest = forest;
    }

    pub fn select_deck(&mut self, id: DeckId) {
        self.current_deck_id = Some(id);
    }

    pub fn find(&self, id: DeckId) -> Option<Arc<DeckNode>> {
        find_in(&self.forest, id)
    }
}

fn find_in(nodes: &[Arc<DeckNode>], id: DeckId) -> Option<Arc<DeckNode>> {
    for node in nodes {
        if node.id == id {
            return Some(Arc::clone(node));
        }
        if let Some(found) = find_in(&node.children, id) {
            return Some(found);
        }
    }
    None
}

impl DeckHierarchy for InMemoryCollection {
    fn parent_id(&self, id: DeckId) -> Option<DeckId> {
        self.parents.parent_id(id)
    }
}

impl Collection for InMemoryCollection {
    fn deck_tree(&self) -> Result<DeckForest> {
        Ok(self.forest.clone())
    }

    fn current_deck_id(&self) -> Result<Option<DeckId>> {
        // A deleted deck can still be recorded as current
        Ok(self.current_deck_id.filter(|id| self.find(*id).is_some()))
    }

    fn default_deck_has_cards(&self) -> Result<bool> {
        // The recorded card count may be missing; due counts still prove cards exist
        let has_due = self
            .find(self.default_deck_id)
            .is_some_and(|deck| !deck.counts.is_empty());
        Ok(self.default_deck_cards > 0 || has_due)
    }

    fn eta(&self, counts: Counts) -> Option<u32> {
        let cards = u64::from(counts.total());
        if cards == 0 {
            return None;
        }
        let minutes = (cards * u64::from(self.seconds_per_card)).div_ceil(60);
        Some(u32::try_from(minutes).unwrap_or(u32::MAX))
    }

    fn legacy_schema(&self) -> bool {
        self.legacy_schema
    }

    fn default_deck_id(&self) -> DeckId {
        self.default_deck_id
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::forest;

    /// Ids used by [`CollectionFixture::with_sample_decks`].
    pub mod ids {
        use crate::model::DeckId;

        pub const DEFAULT: DeckId = 1;
        pub const LANGUAGES: DeckId = 10;
        pub const SPANISH: DeckId = 11;
        pub const VERBS: DeckId = 12;
        pub const FRENCH: DeckId = 13;
        pub const SCIENCE: DeckId = 20;
        pub const PHYSICS: DeckId = 21;
        pub const CHEMISTRY: DeckId = 22;
        pub const CRAM: DeckId = 30;
    }

    /// ```text
    /// Default                    (0, 0, 0)
    /// Languages                  (12, 3, 20)
    ///   Spanish                  (10, 2, 15)
    ///     Verbs                  (4, 1, 5)
    ///   French                   (2, 1, 5)
    /// Science      [collapsed]   (6, 0, 9)
    ///   Physics                  (3, 0, 4)
    ///   Chemistry                (3, 0, 5)
    /// Cram         [filtered, counts hidden]
    /// ```
    pub fn sample_forest() -> DeckForest {
        forest(vec![
            DeckNode::new(ids::DEFAULT, "Default"),
            DeckNode::new(ids::LANGUAGES, "Languages")
                .with_counts(Counts::new(12, 3, 20))
                .with_children(vec![
                    DeckNode::new(ids::SPANISH, "Languages::Spanish")
                        .with_counts(Counts::new(10, 2, 15))
                        .with_children(vec![DeckNode::new(ids::VERBS, "Languages::Spanish::Verbs")
                            .with_counts(Counts::new(4, 1, 5))]),
                    DeckNode::new(ids::FRENCH, "Languages::French")
                        .with_counts(Counts::new(2, 1, 5)),
                ]),
            DeckNode::new(ids::SCIENCE, "Science")
                .with_counts(Counts::new(6, 0, 9))
                .with_collapsed(true)
                .with_children(vec![
                    DeckNode::new(ids::PHYSICS, "Science::Physics")
                        .with_counts(Counts::new(3, 0, 4)),
                    DeckNode::new(ids::CHEMISTRY, "Science::Chemistry")
                        .with_counts(Counts::new(3, 0, 5)),
                ]),
            DeckNode::new(ids::CRAM, "Cram")
                .with_filtered(true)
                .with_display_counts(false)
                .with_counts(Counts::new(7, 7, 7)),
        ])
    }

    pub struct CollectionFixture {
        pub collection: InMemoryCollection,
    }

    impl Default for CollectionFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl CollectionFixture {
        pub fn new() -> Self {
            Self {
                collection: InMemoryCollection::default(),
            }
        }

        pub fn with_sample_decks(mut self) -> Self {
            self.collection.set_forest(sample_forest());
            self
        }

        pub fn with_decks(mut self, decks: Vec<DeckNode>) -> Self {
            self.collection.set_forest(forest(decks));
            self
        }

        pub fn with_current_deck(mut self, id: DeckId) -> Self {
            self.collection.select_deck(id);
            self
        }

        pub fn legacy(mut self, default_deck_cards: u32) -> Self {
            self.collection = self
                .collection
                .with_legacy_schema(true)
                .with_default_deck_cards(default_deck_cards);
            self
        }

        pub fn build(self) -> InMemoryCollection {
            self.collection
        }
    }
}
