//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the log subscriber
//! - Owns a tokio runtime
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Load configuration, then the snapshot, then build the API
//! 3. **Dispatch**: Route commands to handlers
//! 4. **Output Formatting**: Hand rows to `render`

use super::render::{line_width, render_empty, render_row, render_rows, render_totals};
use super::setup::{Cli, Commands};
use clap::Parser;
use decktree::api::DeckPickerApi;
use decktree::collection::memory::InMemoryCollection;
use decktree::collection::snapshot::load_snapshot;
use decktree::config::{DeckTreeConfig, CONFIG_FILE_NAME};
use decktree::error::{DeckError, Result};
use decktree::model::DeckId;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    match cli.command {
        Some(Commands::Config) => handle_config(&config),
        Some(Commands::Find { id }) => handle_find(&config, id),
        Some(Commands::List { filter }) => handle_list(&config, filter.as_deref()),
        None => handle_list(&config, None),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "decktree").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn load_config(cli: &Cli) -> Result<DeckTreeConfig> {
    let path = cli.config.clone().or_else(default_config_path);
    let mut config = DeckTreeConfig::load(path.as_deref())?;
    if let Some(snapshot) = &cli.snapshot {
        config.snapshot = Some(snapshot.clone());
    }
    Ok(config)
}

fn load_collection(config: &DeckTreeConfig) -> Result<InMemoryCollection> {
    let path = config.snapshot.as_deref().ok_or_else(|| {
        DeckError::Snapshot(
            "no snapshot given; use --snapshot or set DECKTREE_SNAPSHOT".to_string(),
        )
    })?;
    tracing::debug!(path = %path.display(), "loading snapshot");
    Ok(config.apply(load_snapshot(path)?))
}

/// Builds the deck list and waits for `filter` to be applied.
fn build_api(
    config: &DeckTreeConfig,
    filter: Option<&str>,
) -> Result<DeckPickerApi<InMemoryCollection>> {
    let mut api = DeckPickerApi::new(load_collection(config)?, config.locale());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        api.build_deck_list(filter)?;
        api.settle().await;
        Ok::<_, DeckError>(())
    })?;
    Ok(api)
}

fn handle_list(config: &DeckTreeConfig, filter: Option<&str>) -> Result<()> {
    let api = build_api(config, filter)?;
    let rows = api.rows();
    if rows.is_empty() {
        println!("{}", render_empty(filter));
    } else {
        print!("{}", render_rows(&rows, line_width()));
    }
    println!();
    println!("{}", render_totals(api.due(), api.eta()));
    Ok(())
}

fn handle_find(config: &DeckTreeConfig, id: DeckId) -> Result<()> {
    let api = build_api(config, None)?;
    let position = api.find_deck_position(id);
    match api.presenter().row_at(position) {
        Some(row) => {
            if row.id != id {
                println!("Deck {} is not shown; nearest row is {}.", id, position);
            } else {
                println!("Deck {} is on row {}.", id, position);
            }
            println!("{}", render_row(&row, line_width()));
        }
        None => println!("{}", render_empty(None)),
    }
    Ok(())
}

fn handle_config(config: &DeckTreeConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
