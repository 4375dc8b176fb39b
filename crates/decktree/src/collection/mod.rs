//! # Collection Boundary
//!
//! The presenter never talks to a scheduler or a database. Everything it needs
//! comes through the [`Collection`] trait, once per build:
//!
//! - the deck forest, already normalized into [`DeckNode`](crate::model::DeckNode)s
//! - the currently selected deck
//! - whether the default deck holds cards (legacy hiding rule)
//! - an ETA estimate for a set of due counts
//! - parent lookup by deck id, via the [`DeckHierarchy`] supertrait
//!
//! ## Normalization
//!
//! Collections come in two shapes. Modern backends hand out a ready-made tree with
//! collapse and filter flags on each node. Legacy collections keep a flat list of
//! decks keyed by `::` names with the flags stored on each deck's config. Rather
//! than letting the presenter branch on which shape it is looking at, both are
//! converted to the same `DeckNode` tree at this boundary (see [`snapshot`]).
//!
//! ## Implementations
//!
//! - [`memory::InMemoryCollection`]: a forest held in memory, used by tests and by
//!   the snapshot loader.
//! - [`snapshot`]: loads a JSON snapshot in either shape into an
//!   `InMemoryCollection`.

use crate::error::Result;
use crate::model::{Counts, DeckForest, DeckId, DEFAULT_DECK_ID};
use crate::position::DeckHierarchy;

pub mod memory;
pub mod snapshot;

/// Abstract interface to the collection and scheduler.
pub trait Collection: DeckHierarchy {
    /// A fresh forest of the collection's decks.
    fn deck_tree(&self) -> Result<DeckForest>;

    /// The deck the user last selected, if it still exists.
    fn current_deck_id(&self) -> Result<Option<DeckId>>;

    /// Whether the default deck holds any cards.
    fn default_deck_has_cards(&self) -> Result<bool>;

    /// Estimated minutes to work through `counts`, if an estimate is available.
    fn eta(&self, counts: Counts) -> Option<u32>;

    /// Whether the collection uses the legacy schema.
    fn legacy_schema(&self) -> bool;

    fn default_deck_id(&self) -> DeckId {
        DEFAULT_DECK_ID
    }
}
