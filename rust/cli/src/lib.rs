//! Terminal front end for the Pazaak rules engine.
//!
//! The binary is a thin wrapper around [`run`], which parses arguments and
//! dispatches to a subcommand handler. All handlers write through injected
//! streams so the whole surface is testable in-process.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod store;
pub mod ui;
pub mod validation;

pub use error::CliError;

use std::io::Write;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Commands, PazaakCli};

const COMMANDS: &[&str] = &["play", "sim", "stats", "deck", "presets", "cfg"];

/// Parses `args` and runs the selected subcommand, writing to the given
/// streams. Returns the process exit code.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString> + Clone,
{
    let parsed = match PazaakCli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = write!(out, "{}", e);
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = writeln!(err, "{}", e);
                    let _ = writeln!(err, "Pazaak CLI");
                    let _ = writeln!(err, "Commands: {}", COMMANDS.join(", "));
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match parsed.cmd {
        Commands::Play {
            difficulty,
            seed,
            delay_ms,
            deck,
        } => {
            let stdin = std::io::stdin();
            let mut lock = stdin.lock();
            commands::handle_play_command(difficulty, seed, delay_ms, deck, out, err, &mut lock)
        }
        Commands::Sim {
            matches,
            output,
            seed,
            difficulty,
        } => commands::handle_sim_command(matches, output, seed, difficulty, out, err),
        Commands::Stats { input } => commands::handle_stats_command(input, out, err),
        Commands::Deck { path } => {
            let stdin = std::io::stdin();
            let mut lock = stdin.lock();
            commands::handle_deck_command(path, out, err, &mut lock)
        }
        Commands::Presets => commands::handle_presets_command(out),
        Commands::Cfg => commands::handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            let _ = writeln!(err, "{}", msg);
            exit_code::INTERRUPTED
        }
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(args.iter().copied(), &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_help_exits_zero() {
        let (code, out, _) = run_args(&["pazaak", "--help"]);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(out.contains("play"));
        assert!(out.contains("sim"));
    }

    #[test]
    fn test_version_exits_zero() {
        let (code, out, _) = run_args(&["pazaak", "--version"]);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(out.contains("pazaak"));
    }

    #[test]
    fn test_unknown_command_exits_two_with_usage() {
        let (code, out, err) = run_args(&["pazaak", "bogus"]);
        assert_eq!(code, exit_code::ERROR);
        assert!(out.is_empty());
        assert!(err.contains("Commands: play, sim, stats, deck, presets, cfg"));
    }

    #[test]
    fn test_presets_dispatch() {
        let (code, out, _) = run_args(&["pazaak", "presets"]);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(out.contains("average:"));
    }
}
