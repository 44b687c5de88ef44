use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, FlipKind};
use crate::events::EventSink;

/// A side deck holds exactly this many cards.
pub const SIDE_DECK_SIZE: usize = 10;

/// Cards sampled from a side deck into a match hand.
pub const HAND_SIZE: usize = 4;

/// The closed set of dealer difficulty presets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    VeryEasy,
    Easy,
    Average,
    Hard,
    VeryHard,
}

impl Difficulty {
    pub fn all() -> [Difficulty; 5] {
        [
            Difficulty::VeryEasy,
            Difficulty::Easy,
            Difficulty::Average,
            Difficulty::Hard,
            Difficulty::VeryHard,
        ]
    }

    /// The fixed 10-card preset deck for this difficulty.
    pub fn preset(self) -> Vec<Card> {
        use Card::*;
        use FlipKind::*;
        match self {
            Difficulty::VeryEasy => vec![
                Number(-3),
                Number(3),
                Number(-4),
                Number(4),
                Number(-5),
                Number(5),
                Number(-3),
                Number(4),
                Number(-5),
                Number(3),
            ],
            Difficulty::Easy => vec![
                Number(1),
                Number(2),
                Number(3),
                Number(4),
                Number(5),
                Number(-6),
                Number(-4),
                Number(-3),
                Number(-2),
                Number(-1),
            ],
            Difficulty::Average => vec![
                Dual(1),
                Dual(2),
                Number(3),
                Number(4),
                Number(5),
                Dual(5),
                Number(-6),
                Dual(3),
                Number(-6),
                Number(5),
            ],
            Difficulty::Hard => vec![
                FlipPair(TwoFour),
                Dual(2),
                FlipPair(ThreeSix),
                Number(6),
                Tiebreaker,
                Tiebreaker,
                Double,
                Dual(3),
                Number(6),
                FlipPair(TwoFour),
            ],
            Difficulty::VeryHard => vec![
                Double,
                Double,
                FlipPair(TwoFour),
                FlipPair(ThreeSix),
                VariableDual,
                VariableDual,
                FlipPair(TwoFour),
                Tiebreaker,
                Tiebreaker,
                Dual(1),
            ],
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::VeryEasy => "very-easy",
            Difficulty::Easy => "easy",
            Difficulty::Average => "average",
            Difficulty::Hard => "hard",
            Difficulty::VeryHard => "very-hard",
        };
        f.write_str(s)
    }
}

impl FromStr for Difficulty {
    type Err = ();

    /// Case-insensitive; separators are ignored so "very-easy", "veryeasy"
    /// and "VERY_EASY" all name the same preset.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "veryeasy" => Ok(Difficulty::VeryEasy),
            "easy" => Ok(Difficulty::Easy),
            "average" => Ok(Difficulty::Average),
            "hard" => Ok(Difficulty::Hard),
            "veryhard" => Ok(Difficulty::VeryHard),
            _ => Err(()),
        }
    }
}

/// How the dealer's side deck is sourced: a fixed preset, or a fresh random
/// deck regenerated at every match start.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DealerProfile {
    Preset(Difficulty),
    Random,
}

impl DealerProfile {
    /// Parse a profile name. Unknown names fall back to the Average preset
    /// with a warning on the sink; this never errors.
    pub fn resolve(name: &str, sink: &mut dyn EventSink) -> DealerProfile {
        if name.trim().eq_ignore_ascii_case("random") {
            return DealerProfile::Random;
        }
        match name.parse::<Difficulty>() {
            Ok(d) => DealerProfile::Preset(d),
            Err(()) => {
                sink.warn(&format!(
                    "Unknown dealer difficulty: {}. Defaulting to average.",
                    name
                ));
                DealerProfile::Preset(Difficulty::Average)
            }
        }
    }

    /// Produce the dealer's side deck for a new match.
    pub fn build_deck(self, rng: &mut impl Rng) -> Vec<Card> {
        match self {
            DealerProfile::Preset(d) => d.preset(),
            DealerProfile::Random => random_side_deck(rng),
        }
    }
}

impl fmt::Display for DealerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealerProfile::Preset(d) => d.fmt(f),
            DealerProfile::Random => f.write_str("random"),
        }
    }
}

/// Preset deck lookup keyed by a difficulty name, with the warned Average
/// fallback for unknown names.
pub fn dealer_deck_for(name: &str, sink: &mut dyn EventSink) -> Vec<Card> {
    match name.parse::<Difficulty>() {
        Ok(d) => d.preset(),
        Err(()) => {
            sink.warn(&format!(
                "Unknown dealer difficulty: {}. Defaulting to average.",
                name
            ));
            Difficulty::Average.preset()
        }
    }
}

/// Assemble a random 10-card side deck.
///
/// Two-stage construction kept from the original game: shuffle a pool of
/// ±1..±6 number cards (two copies each), append the fixed bonus set, then
/// reshuffle and truncate to 10. The truncation means the result is not
/// guaranteed to contain any particular kind of card.
pub fn random_side_deck(rng: &mut impl Rng) -> Vec<Card> {
    let mut pool = Vec::with_capacity(24 + 6);
    for n in 1..=6 {
        pool.extend([Card::Number(n), Card::Number(n)]);
        pool.extend([Card::Number(-n), Card::Number(-n)]);
    }
    pool.shuffle(rng);

    pool.extend([
        Card::Dual(1),
        Card::Dual(2),
        Card::FlipPair(FlipKind::TwoFour),
        Card::FlipPair(FlipKind::ThreeSix),
        Card::Double,
        Card::Tiebreaker,
    ]);
    pool.shuffle(rng);
    pool.truncate(SIDE_DECK_SIZE);
    pool
}

/// Shuffle a side deck in place and sample the first four cards as the
/// match hand. The side deck keeps all ten cards; the hand is a copy.
pub fn draw_hand(side_deck: &mut [Card], rng: &mut impl Rng) -> Vec<Card> {
    side_deck.shuffle(rng);
    side_deck[..HAND_SIZE.min(side_deck.len())].to_vec()
}
