//! Clap argument types for the `pazaak` binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pazaak",
    version,
    about = "Pazaak card game: play, simulate, and analyze matches"
)]
pub struct PazaakCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play an interactive match against the dealer
    Play {
        /// Dealer difficulty (very-easy, easy, average, hard, very-hard, random)
        #[arg(long)]
        difficulty: Option<String>,
        /// RNG seed for a reproducible match
        #[arg(long)]
        seed: Option<u64>,
        /// Pause before each dealer action, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Path to the saved side deck file
        #[arg(long)]
        deck: Option<String>,
    },
    /// Run automated matches and record them as JSONL
    Sim {
        /// Number of matches to simulate
        #[arg(long)]
        matches: u64,
        /// Path to append match records to (JSONL)
        #[arg(long)]
        output: Option<String>,
        /// Base RNG seed (match i uses seed + i)
        #[arg(long)]
        seed: Option<u64>,
        /// Dealer difficulty for every match
        #[arg(long)]
        difficulty: Option<String>,
    },
    /// Aggregate statistics from JSONL match records
    Stats {
        /// Path to a .jsonl / .jsonl.zst file or a directory of them
        #[arg(long)]
        input: String,
    },
    /// Build and save a 10-card side deck interactively
    Deck {
        /// Path to the saved side deck file
        #[arg(long)]
        path: Option<String>,
    },
    /// Print the dealer preset decks
    Presets,
    /// Display resolved configuration with per-field sources
    Cfg,
}
