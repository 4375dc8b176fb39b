//! # Decktree Architecture
//!
//! Decktree is a **UI-agnostic deck list presenter**. It takes the deck hierarchy a
//! flashcard collection hands out and turns it into something a list widget can
//! bind to: an ordered run of rows honoring collapse state, a name filter that can
//! look inside collapsed decks, totals of due cards, and a lookup from deck id to row.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Rendering host (decktree-cli, or any other UI)             │
//! │  - Owns the terminal / widget, draws `DeckRow`s             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Fetches a fresh forest from the `Collection`             │
//! │  - Rebuilds the presenter, dispatches filters to the worker │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presenter (presenter.rs, row.rs, worker.rs)                │
//! │  - Owns the derived lists, applies the latest filter only   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Pure tree functions (flatten.rs, filter.rs, position.rs)   │
//! │  - Immutable forest in, new values out                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Collection boundary (collection/)                          │
//! │  - `Collection` trait, in-memory impl, JSON snapshots       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Snapshots, Not Live Objects
//!
//! Every build starts from a fresh forest of immutable [`model::DeckNode`]s. The
//! presenter never reaches back into the collection to ask which field holds the
//! truth for "collapsed" or "filtered": the collection boundary normalizes both
//! backend shapes into one node type before anything else sees them.
//!
//! ## Filtering and Ordering
//!
//! Filtering may run on a worker. Each request carries a sequence number and the
//! presenter only ever applies the most recently issued one, so a slow filter for
//! an old search string can never overwrite the result of a newer one.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade that ties a collection, the presenter and the worker together
//! - [`model`]: `DeckNode`, `Counts`, `DeckId`
//! - [`flatten`]: Collapse-aware pre-order flattening and totals
//! - [`filter`]: Recursive name filter
//! - [`locale`]: Locale-sensitive lower-casing used by the filter
//! - [`position`]: Deck id to row resolution
//! - [`presenter`]: Derived list ownership and change events
//! - [`row`]: Render-ready row view models
//! - [`worker`]: Off-thread filter execution
//! - [`collection`]: Collaborator trait and implementations
//! - [`config`]: Configuration
//! - [`error`]: Error types

pub mod api;
pub mod collection;
pub mod config;
pub mod error;
pub mod filter;
pub mod flatten;
pub mod locale;
pub mod model;
pub mod position;
pub mod presenter;
pub mod row;
pub mod worker;
