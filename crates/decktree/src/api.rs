//! # API Facade
//!
//! The API layer is a **thin facade** that wires a [`Collection`] to a
//! [`DeckPresenter`] and a [`FilterWorker`]. It is the single entry point for hosts,
//! whatever they render to.
//!
//! ## Role and Responsibilities
//!
//! - **Fetches** a fresh forest and build context from the collection on every build
//! - **Dispatches** filter requests to the worker
//! - **Settles**: applies worker outcomes to the presenter as they arrive
//!
//! ## What the API Does NOT Do
//!
//! - **Tree logic**: that lives in `flatten`, `filter` and `position`
//! - **Drawing**: hosts read [`DeckRow`]s and decide how they look
//!
//! ## Typical Flow
//!
//! ```ignore
//! let mut api = DeckPickerApi::new(collection, Locale::from_env());
//! api.build_deck_list(Some("span"))?;
//! api.settle().await;
//! for row in api.rows() { /* draw */ }
//! ```
//!
//! `build_deck_list` shows the unfiltered rows immediately and the filtered ones
//! once `settle` has applied the worker's result. Typing into a search box maps to
//! repeated [`DeckPickerApi::filter`] calls; only the last one ever lands.
//!
//! ## Generic Over Collection
//!
//! `DeckPickerApi<C: Collection>` works with any collection:
//! - CLI: `InMemoryCollection` loaded from a JSON snapshot
//! - Tests: `InMemoryCollection` built from fixtures

use crate::collection::Collection;
use crate::error::Result;
use crate::flatten::BuildContext;
use crate::locale::Locale;
use crate::model::{DeckId, DeckNode};
use crate::presenter::{DeckListEvent, DeckPresenter};
use crate::row::DeckRow;
use crate::worker::FilterWorker;
use std::sync::Arc;
use tokio::sync::broadcast;

pub struct DeckPickerApi<C: Collection> {
    collection: C,
    presenter: DeckPresenter,
    worker: FilterWorker,
}

impl<C: Collection> DeckPickerApi<C> {
    pub fn new(collection: C, locale: Locale) -> Self {
        Self {
            collection,
            presenter: DeckPresenter::new(locale),
            worker: FilterWorker::new(),
        }
    }

    /// Rebuilds the deck list from the collection and submits `filter` against it.
    /// Returns the filter's sequence number.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build_deck_list(&mut self, filter: Option<&str>) -> Result<u64> {
        let forest = self.collection.deck_tree()?;
        let ctx = BuildContext {
            current_deck_id: self.collection.current_deck_id()?,
            legacy_schema: self.collection.legacy_schema(),
            default_deck_id: self.collection.default_deck_id(),
            default_deck_has_cards: self.collection.default_deck_has_cards()?,
        };
        self.presenter.build(&forest, ctx);
        Ok(self.filter(filter))
    }

    /// Submits a new filter; it supersedes every earlier one.
    pub fn filter(&mut self, pattern: Option<&str>) -> u64 {
        let request = self.presenter.request_filter(pattern);
        let seq = request.seq;
        self.worker.submit(request);
        seq
    }

    /// Applies worker outcomes until nothing is in flight. Returns whether the
    /// displayed rows answer the latest request.
    pub async fn settle(&mut self) -> bool {
        while let Some(outcome) = self.worker.next().await {
            self.presenter.apply_filter(outcome);
        }
        self.presenter.is_settled()
    }

    pub fn find_deck_position(&self, id: DeckId) -> usize {
        self.presenter.position_of(id, &self.collection)
    }

    pub fn node_by_id(&self, id: DeckId) -> Option<Arc<DeckNode>> {
        self.presenter.node_by_id(id, &self.collection).cloned()
    }

    pub fn rows(&self) -> Vec<DeckRow> {
        self.presenter.rows()
    }

    pub fn eta(&self) -> Option<u32> {
        self.presenter.eta(&self.collection)
    }

    pub fn due(&self) -> Option<u32> {
        self.presenter.due()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DeckListEvent> {
        self.presenter.subscribe()
    }

    pub fn presenter(&self) -> &DeckPresenter {
        &self.presenter
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut C {
        &mut self.collection
    }
}
