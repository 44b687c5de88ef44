use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::session::{Phase, Seat};

/// Renderable snapshot of the whole session, emitted after every state
/// change. The dealer's hand is exposed only by size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub turn: Seat,
    pub player_board: Vec<i8>,
    pub player_total: i32,
    pub dealer_board: Vec<i8>,
    pub dealer_total: i32,
    pub player_hand: Vec<Card>,
    pub dealer_hand_size: usize,
    pub player_standing: bool,
    pub dealer_standing: bool,
    pub player_score: u8,
    pub dealer_score: u8,
}

/// Presentation sink for the core: narration lines, warnings, and state
/// snapshots. Fire-and-forget; implementations must not fail the game.
pub trait EventSink {
    fn log(&mut self, message: &str);

    fn warn(&mut self, message: &str) {
        self.log(message);
    }

    fn render(&mut self, _snapshot: &GameSnapshot) {}
}

/// Sink that discards everything. Handy for simulations and tests that
/// only care about final state.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn log(&mut self, _message: &str) {}
}

/// Sink that records narration lines, used by tests to assert on what the
/// engine said.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub lines: Vec<String>,
    pub warnings: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl EventSink for RecordingSink {
    fn log(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}
