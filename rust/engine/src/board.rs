use serde::{Deserialize, Serialize};

use crate::cards::{Effect, FlipKind};
use crate::errors::GameError;

/// Maximum entries a board can hold; the 9-card special win ends the round
/// before a 10th entry could ever be placed.
pub const BOARD_CAP: usize = 9;

/// Bust threshold: a board totalling more than this has busted.
pub const TARGET_TOTAL: i32 = 20;

/// One player's in-round sequence of placed card values.
///
/// Append-only within a round, except for the in-place mutations performed
/// by flip and double effects. Reset to empty at round start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    entries: Vec<i8>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(BOARD_CAP),
        }
    }

    pub fn entries(&self) -> &[i8] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> i32 {
        self.entries.iter().map(|&v| v as i32).sum()
    }

    pub fn is_bust(&self) -> bool {
        self.total() > TARGET_TOTAL
    }

    pub fn is_twenty(&self) -> bool {
        self.total() == TARGET_TOTAL
    }

    /// The 9-card special win condition, checked at round evaluation.
    pub fn filled_nine(&self) -> bool {
        self.entries.len() >= BOARD_CAP && !self.is_bust()
    }

    pub fn push(&mut self, value: i8) {
        self.entries.push(value);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Apply a resolved card [`Effect`]. Returns the tiebreaker grant so the
    /// caller can set the owner's round flag.
    pub fn apply(&mut self, effect: Effect) -> Result<AppliedEffect, GameError> {
        match effect {
            Effect::Append(v) => {
                self.entries.push(v);
                Ok(AppliedEffect::Appended(v))
            }
            Effect::Flip(kind) => {
                let flipped = self.flip(kind);
                Ok(AppliedEffect::Flipped { kind, count: flipped })
            }
            Effect::DoubleLast => {
                let doubled = self.double_last()?;
                Ok(AppliedEffect::Doubled(doubled))
            }
            Effect::Tiebreaker => {
                self.entries.push(1);
                Ok(AppliedEffect::TiebreakerSet)
            }
        }
    }

    /// Negate every entry currently equal to one of the pair's positive
    /// targets. Entries already negative are untouched. Returns how many
    /// entries changed.
    pub fn flip(&mut self, kind: FlipKind) -> usize {
        let (a, b) = kind.targets();
        let mut count = 0;
        for v in &mut self.entries {
            if *v > 0 && (*v == a || *v == b) {
                *v = -*v;
                count += 1;
            }
        }
        count
    }

    /// Replace the last entry with twice its value, returning the new value.
    pub fn double_last(&mut self) -> Result<i8, GameError> {
        let last = self.entries.last_mut().ok_or(GameError::EmptyBoardDouble)?;
        *last *= 2;
        Ok(*last)
    }
}

/// What an applied effect did, for narration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AppliedEffect {
    Appended(i8),
    Flipped { kind: FlipKind, count: usize },
    Doubled(i8),
    TiebreakerSet,
}
