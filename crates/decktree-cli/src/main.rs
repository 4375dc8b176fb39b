//! # decktree CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/decktree/`: UI-agnostic library (tree, filter, presenter, collections)
//! - `crates/decktree-cli/`: This CLI, one possible rendering host for the library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/decktree-cli/src/cli/)                   │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering of rows (render.rs)                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/decktree/src/api.rs)                     │
//! │  - Builds the deck list from a collection                   │
//! │  - Runs filters off-thread and settles them                 │
//! │  - Returns render-ready `DeckRow`s                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI is responsible for all
//! user-facing concerns: argument parsing, configuration and snapshot loading,
//! log setup, error reporting and rendering.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
