use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "decktree", bin_name = "decktree", version)]
#[command(about = "Browse and filter a flashcard collection's deck tree", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Collection snapshot (JSON); overrides the configured one
    #[arg(short, long, global = true, value_name = "PATH", help_heading = "Options")]
    pub snapshot: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List decks (default)
    #[command(alias = "ls")]
    List {
        /// Only show decks whose name contains PATTERN, plus their parents
        #[arg(short, long, value_name = "PATTERN")]
        filter: Option<String>,
    },

    /// Show the row a deck resolves to
    Find {
        /// Deck id
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Print the resolved configuration
    Config,
}
