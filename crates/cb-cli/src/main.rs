//! CLI frontend for the Cellblock interactive text terminal.

mod commands;
mod presenter;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cb_core::data::DEFAULT_DATA_PATH;

#[derive(Parser)]
#[command(
    name = "cellblock",
    about = "Cellblock: an interactive prison text terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive terminal
    Play {
        /// Game data file
        #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
        data: PathBuf,

        /// Directory holding save slots (default: platform data directory)
        #[arg(short, long)]
        slots: Option<PathBuf>,

        /// Milliseconds per narration character
        #[arg(long, default_value_t = 18)]
        speed: u64,

        /// Print narration at once and skip all timed pauses
        #[arg(long)]
        no_typing: bool,
    },

    /// Resolve a single input against fresh game data and print the result
    Resolve {
        /// Acting identity
        identity: String,

        /// Action verb
        action: String,

        /// Optional supplement
        supplement: Option<String>,

        /// Game data file
        #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
        data: PathBuf,
    },

    /// Validate a game data file
    Check {
        /// Game data file
        #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
        data: PathBuf,
    },

    /// List save slots
    Slots {
        /// Directory holding save slots (default: platform data directory)
        #[arg(short, long)]
        slots: Option<PathBuf>,
    },

    /// Show a player's status
    Status {
        /// Access key (player identity)
        key: String,

        /// Game data file
        #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
        data: PathBuf,

        /// Read the player from a save slot (1-3) instead of the data file
        #[arg(long)]
        slot: Option<u8>,

        /// Directory holding save slots (default: platform data directory)
        #[arg(short, long)]
        slots: Option<PathBuf>,
    },

    /// Write a template game data file
    Init {
        /// Where to write it
        #[arg(default_value = DEFAULT_DATA_PATH)]
        path: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            data,
            slots,
            speed,
            no_typing,
        } => commands::play::run(&data, slots.as_deref(), speed, no_typing),
        Commands::Resolve {
            identity,
            action,
            supplement,
            data,
        } => commands::resolve::run(&data, &identity, &action, supplement.as_deref()),
        Commands::Check { data } => commands::check::run(&data),
        Commands::Slots { slots } => commands::slots::run(slots.as_deref()),
        Commands::Status {
            key,
            data,
            slot,
            slots,
        } => commands::status::run(&key, &data, slot, slots.as_deref()),
        Commands::Init { path } => commands::init::run(&path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
