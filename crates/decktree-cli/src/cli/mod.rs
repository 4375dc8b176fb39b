//! # CLI Behavior
//!
//! This is **one possible rendering host** for decktree, not the application
//! itself. The CLI is the only place that knows about terminal I/O, exit codes and
//! output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## Naked Execution (`decktree`)
//!
//! Running `decktree` with no subcommand defaults to `decktree list`.
//!
//! ## Where the Decks Come From
//!
//! The CLI reads a JSON collection snapshot, given by `--snapshot`, the `snapshot`
//! config key, or `DECKTREE_SNAPSHOT`. Either snapshot schema is accepted.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `render`: Row and totals formatting
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
