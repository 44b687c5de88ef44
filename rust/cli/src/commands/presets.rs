//! Lists the built-in dealer side-deck presets.

use std::io::Write;

use pazaak_engine::provider::Difficulty;

use crate::error::CliError;
use crate::formatters::format_deck;

/// Prints each preset difficulty with its fixed 10-card side deck, plus the
/// `random` profile which draws a fresh deck per match.
pub fn handle_presets_command(out: &mut dyn Write) -> Result<(), CliError> {
    for difficulty in Difficulty::all() {
        writeln!(out, "{}: {}", difficulty, format_deck(&difficulty.preset()))?;
    }
    writeln!(out, "random: a new deck drawn from the side-card pool each match")?;
    Ok(())
}
