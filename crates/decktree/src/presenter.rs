//! # Deck List Presenter
//!
//! [`DeckPresenter`] owns the derived state of the deck list and nothing else:
//!
//! - `source`: the forest of the last build, minus a hidden default deck. Filters
//!   run against it.
//! - `flattened`: every row the unfiltered list shows.
//! - `displayed`: the rows currently on screen. Equal to `flattened` right after a
//!   build, replaced whenever a filter result is applied.
//!
//! All three are replaced wholesale, never edited in place.
//!
//! ## Sequencing
//!
//! The presenter issues a sequence number with every [`FilterRequest`] and only
//! applies a [`FilterOutcome`] carrying the latest one. A build also takes a
//! number, which invalidates filters computed against the previous forest. Failed
//! outcomes are logged and dropped; the rows from the last successful build or
//! filter stay on screen.
//!
//! ## Notifications
//!
//! Every completed build and every applied filter is announced on a broadcast
//! channel. Hosts that redraw on change call [`DeckPresenter::subscribe`]; sending
//! with no subscribers is not an error.

use crate::collection::Collection;
use crate::filter::NameMatcher;
use crate::flatten::{flatten, prune_hidden_default, BuildContext};
use crate::locale::Locale;
use crate::model::{Counts, DeckForest, DeckId, DeckNode};
use crate::position::{position_of, DeckHierarchy};
use crate::row::DeckRow;
use crate::worker::{FilterOutcome, FilterRequest};
use std::sync::Arc;
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckListEvent {
    /// A new forest was flattened; `rows` rows are displayed, unfiltered.
    Built { rows: usize },
    /// The filter request `seq` for `pattern` was applied.
    Filtered {
        seq: u64,
        pattern: String,
        rows: usize,
    },
}

pub struct DeckPresenter {
    source: DeckForest,
    flattened: DeckForest,
    displayed: DeckForest,
    totals: Counts,
    numbers_computed: bool,
    has_subdecks: bool,
    ctx: BuildContext,
    locale: Locale,
    latest_seq: u64,
    applied_seq: u64,
    active_pattern: String,
    events: broadcast::Sender<DeckListEvent>,
}

impl Default for DeckPresenter {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl DeckPresenter {
    pub fn new(locale: Locale) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            source: Vec::new(),
            flattened: Vec::new(),
            displayed: Vec::new(),
            totals: Counts::default(),
            numbers_computed: false,
            has_subdecks: false,
            ctx: BuildContext::default(),
            locale,
            latest_seq: 0,
            applied_seq: 0,
            active_pattern: String::new(),
            events,
        }
    }

    /// Replaces all derived state with a flattening of `forest`.
    pub fn build(&mut self, forest: &[Arc<DeckNode>], ctx: BuildContext) {
        let source = prune_hidden_default(forest, &ctx);
        let flattened = flatten(&source, &ctx);

        self.source = source;
        self.displayed = flattened.visible.clone();
        self.flattened = flattened.visible;
        self.totals = flattened.totals;
        self.has_subdecks = flattened.has_subdecks;
        self.numbers_computed = true;
        self.ctx = ctx;

        // Anything still in flight was computed against the old forest
        self.latest_seq += 1;
        self.applied_seq = self.latest_seq;
        self.active_pattern.clear();

        tracing::debug!(
            rows = self.displayed.len(),
            totals = ?self.totals,
            has_subdecks = self.has_subdecks,
            "deck list built"
        );
        let _ = self.events.send(DeckListEvent::Built {
            rows: self.displayed.len(),
        });
    }

    /// Issues a filter request for `pattern` against the current source forest.
    /// The request supersedes every earlier one.
    pub fn request_filter(&mut self, pattern: Option<&str>) -> FilterRequest {
        self.latest_seq += 1;
        FilterRequest {
            seq: self.latest_seq,
            source: self.source.clone(),
            matcher: NameMatcher::new(pattern, self.locale),
            ctx: self.ctx,
        }
    }

    /// Applies `outcome` if it answers the latest request. Returns whether the
    /// displayed rows changed.
    pub fn apply_filter(&mut self, outcome: FilterOutcome) -> bool {
        if outcome.seq != self.latest_seq {
            tracing::debug!(
                seq = outcome.seq,
                latest = self.latest_seq,
                "discarding superseded filter result"
            );
            return false;
        }

        match outcome.result {
            Ok(rows) => {
                self.displayed = rows;
                self.applied_seq = outcome.seq;
                self.active_pattern = outcome.pattern.clone();
                let _ = self.events.send(DeckListEvent::Filtered {
                    seq: outcome.seq,
                    pattern: outcome.pattern,
                    rows: self.displayed.len(),
                });
                true
            }
            Err(err) => {
                tracing::warn!(seq = outcome.seq, error = %err, "filter failed, keeping current rows");
                false
            }
        }
    }

    /// Whether the displayed rows answer the latest request.
    pub fn is_settled(&self) -> bool {
        self.applied_seq == self.latest_seq
    }

    /// The normalized pattern of the applied filter; empty when unfiltered.
    pub fn active_pattern(&self) -> &str {
        &self.active_pattern
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DeckListEvent> {
        self.events.subscribe()
    }

    pub fn item_count(&self) -> usize {
        self.displayed.len()
    }

    pub fn item_at(&self, position: usize) -> Option<&Arc<DeckNode>> {
        self.displayed.get(position)
    }

    pub fn row_at(&self, position: usize) -> Option<DeckRow> {
        self.item_at(position)
            .map(|node| DeckRow::from_node(node, self.has_subdecks, self.ctx.current_deck_id))
    }

    pub fn rows(&self) -> Vec<DeckRow> {
        self.displayed
            .iter()
            .map(|node| DeckRow::from_node(node, self.has_subdecks, self.ctx.current_deck_id))
            .collect()
    }

    pub fn displayed(&self) -> &[Arc<DeckNode>] {
        &self.displayed
    }

    /// Rows of the last build, ignoring any filter.
    pub fn flattened(&self) -> &[Arc<DeckNode>] {
        &self.flattened
    }

    pub fn has_subdecks(&self) -> bool {
        self.has_subdecks
    }

    pub fn current_deck_id(&self) -> Option<DeckId> {
        self.ctx.current_deck_id
    }

    pub fn is_current_deck(&self, id: DeckId) -> bool {
        self.ctx.current_deck_id == Some(id)
    }

    /// Due totals of the last build, `None` before the first one.
    pub fn totals(&self) -> Option<Counts> {
        self.numbers_computed.then_some(self.totals)
    }

    pub fn due(&self) -> Option<u32> {
        self.totals().map(|totals| totals.total())
    }

    pub fn eta<C: Collection + ?Sized>(&self, collection: &C) -> Option<u32> {
        self.totals().and_then(|totals| collection.eta(totals))
    }

    /// Row of `id`, or of its nearest displayed ancestor, or `0`.
    pub fn position_of<H: DeckHierarchy + ?Sized>(&self, id: DeckId, hierarchy: &H) -> usize {
        position_of(&self.displayed, id, hierarchy)
    }

    /// The node on the row [`DeckPresenter::position_of`] resolves to.
    pub fn node_by_id<H: DeckHierarchy + ?Sized>(
        &self,
        id: DeckId,
        hierarchy: &H,
    ) -> Option<&Arc<DeckNode>> {
        self.item_at(self.position_of(id, hierarchy))
    }
}
