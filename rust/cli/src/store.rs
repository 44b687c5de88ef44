//! Single-slot persistence for the player's confirmed side deck.
//!
//! The saved deck is a JSON array of card tokens (plain numbers stay bare
//! integers), the same layout the engine's serde impl for `Card` produces.
//! A missing or unparseable file is treated as "no saved deck", never as an
//! error, so a corrupted save degrades to the deck builder.

use std::path::{Path, PathBuf};

use pazaak_engine::cards::Card;
use pazaak_engine::provider::SIDE_DECK_SIZE;

use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;

pub struct DeckStore {
    path: PathBuf,
}

impl DeckStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved deck, or `None` when absent, malformed, or the wrong size.
    pub fn load(&self) -> Option<Vec<Card>> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let deck: Vec<Card> = serde_json::from_str(&content).ok()?;
        (deck.len() == SIDE_DECK_SIZE).then_some(deck)
    }

    pub fn save(&self, deck: &[Card]) -> Result<(), CliError> {
        if deck.len() != SIDE_DECK_SIZE {
            return Err(CliError::InvalidInput(format!(
                "A side deck holds exactly {} cards (have {})",
                SIDE_DECK_SIZE,
                deck.len()
            )));
        }
        ensure_parent_dir(&self.path).map_err(CliError::Config)?;
        let json = serde_json::to_string(deck).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Delete the saved deck. Absence is not an error.
    pub fn clear(&self) -> Result<(), CliError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CliError::Io(e)),
        }
    }
}
