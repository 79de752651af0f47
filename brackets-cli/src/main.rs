//! Brackets CLI - Command-line interface
//!
//! Commands:
//! - new: Build a bracket from a player list and save it
//! - show: Print rounds and pending matches
//! - win / undo: Record or take back a match result
//! - list / delete: Manage saved brackets
//!
//! Every invocation is a whole session: the bracket is loaded from the store,
//! changed, and saved back before the process exits.

mod list_cmd;
mod new_cmd;
mod play_cmd;
mod show_cmd;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use brackets_session::{BracketId, BracketStore, JsonFileStore, Session, SessionConfig};

#[derive(Parser)]
#[command(name = "brackets")]
#[command(about = "Single-elimination tournament brackets")]
struct Cli {
    /// Bracket store file (overrides BRACKETS_STORE)
    #[arg(long, global = true, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Random seed for unseeded players (overrides BRACKETS_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and save a new bracket
    New(new_cmd::NewArgs),
    /// Show a saved bracket
    Show(show_cmd::ShowArgs),
    /// Record a match win for a seat
    Win(play_cmd::PlayArgs),
    /// Undo the last win of a seat
    Undo(play_cmd::PlayArgs),
    /// List saved brackets
    List(list_cmd::ListArgs),
    /// Delete a saved bracket
    Delete(list_cmd::DeleteArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = session_config(&cli);
    tracing::debug!("Using store {}", config.store_path.display());

    match cli.command {
        Commands::New(args) => new_cmd::run(args, config),
        Commands::Show(args) => show_cmd::run(args, config),
        Commands::Win(args) => play_cmd::run(args, config, play_cmd::Direction::Forward),
        Commands::Undo(args) => play_cmd::run(args, config, play_cmd::Direction::Backward),
        Commands::List(args) => list_cmd::run_list(args, config),
        Commands::Delete(args) => list_cmd::run_delete(args, config),
    }
}

/// Logs go to stderr so `--json` output stays clean
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Environment first, then command-line flags
fn session_config(cli: &Cli) -> SessionConfig {
    let mut config = SessionConfig::from_env();
    if let Some(path) = &cli.store {
        config = config.with_store_path(path);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    config
}

fn open_store(config: &SessionConfig) -> Result<JsonFileStore> {
    JsonFileStore::open(&config.store_path)
        .with_context(|| format!("Failed to open store: {}", config.store_path.display()))
}

/// Load the bracket called `name` into the session and return its store id
fn load_by_name(session: &mut Session, store: &JsonFileStore, name: &str) -> Result<BracketId> {
    let record = store
        .find(name)?
        .with_context(|| format!("No bracket named {:?} in {}", name, store.path().display()))?;
    session
        .load(store, record.bracket_id)
        .with_context(|| format!("Failed to load bracket {:?}", name))?;
    Ok(record.bracket_id)
}
