use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::GameError;

/// Identifies which pair of board values a flip card negates.
/// Used as a component of [`Card::FlipPair`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum FlipKind {
    /// Negates board entries equal to +2 or +4
    TwoFour,
    /// Negates board entries equal to +3 or +6
    ThreeSix,
}

impl FlipKind {
    pub fn targets(self) -> (i8, i8) {
        match self {
            FlipKind::TwoFour => (2, 4),
            FlipKind::ThreeSix => (3, 6),
        }
    }
}

/// A side-deck card. The closed set of kinds a Pazaak side deck can hold.
///
/// Cards carry their identity only; resolution against a board happens in
/// [`crate::board::Board`] via [`Card::effect`]. Tokens are parsed once at
/// the boundary ([`FromStr`]) and rendered back with [`fmt::Display`]:
///
/// ```
/// use pazaak_engine::cards::Card;
///
/// let card: Card = "[+/-]3".parse().unwrap();
/// assert_eq!(card, Card::Dual(3));
/// assert_eq!(card.to_string(), "[+/-]3");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Card {
    /// Plain numeric card, value in -10..=10 excluding 0
    Number(i8),
    /// Dual-sign card: resolves to +n or -n, n in 1..=6
    Dual(i8),
    /// Variable dual card: resolves to one of +1, -1, +2, -2
    VariableDual,
    /// Flips every positive board entry matching the pair
    FlipPair(FlipKind),
    /// Doubles the most recently placed board entry
    Double,
    /// Appends +1 and grants round-win priority on equal totals
    Tiebreaker,
}

/// The board mutation a played card resolves to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Effect {
    /// Append a value to the owner's board
    Append(i8),
    /// Negate matching positive entries in place
    Flip(FlipKind),
    /// Double the last board entry in place
    DoubleLast,
    /// Append +1 and set the owner's tiebreaker flag
    Tiebreaker,
}

impl Card {
    /// Resolve this card into a board [`Effect`], consuming the player's
    /// sign choice where one is required.
    ///
    /// `Dual(n)` accepts `Some(n)` or `Some(-n)`; `VariableDual` accepts one
    /// of `Some(1 | -1 | 2 | -2)`. Every other kind rejects a choice being
    /// supplied at all, so callers cannot smuggle a value past the card.
    pub fn effect(self, choice: Option<i8>) -> Result<Effect, GameError> {
        match (self, choice) {
            (Card::Number(n), None) => Ok(Effect::Append(n)),
            (Card::Dual(n), Some(v)) if v == n || v == -n => Ok(Effect::Append(v)),
            (Card::Dual(_), Some(v)) => Err(GameError::InvalidChoice { value: v }),
            (Card::Dual(_), None) => Err(GameError::ChoiceRequired),
            (Card::VariableDual, Some(v)) if matches!(v, 1 | -1 | 2 | -2) => {
                Ok(Effect::Append(v))
            }
            (Card::VariableDual, Some(v)) => Err(GameError::InvalidChoice { value: v }),
            (Card::VariableDual, None) => Err(GameError::ChoiceRequired),
            (Card::FlipPair(kind), None) => Ok(Effect::Flip(kind)),
            (Card::Double, None) => Ok(Effect::DoubleLast),
            (Card::Tiebreaker, None) => Ok(Effect::Tiebreaker),
            (_, Some(v)) => Err(GameError::InvalidChoice { value: v }),
        }
    }

    /// True for kinds that need a sign choice when played.
    pub fn needs_choice(self) -> bool {
        matches!(self, Card::Dual(_) | Card::VariableDual)
    }
}

/// The deck-builder inventory: every card a player may pick from when
/// assembling a 10-card side deck. ±1..±6 two copies each, dual 1..6 two
/// copies each, one variable dual, two of each flip, one double, one
/// tiebreaker.
pub fn side_pool() -> Vec<Card> {
    let mut pool = Vec::with_capacity(43);
    for n in 1..=6 {
        pool.extend([Card::Number(n), Card::Number(n)]);
        pool.extend([Card::Number(-n), Card::Number(-n)]);
    }
    for n in 1..=6 {
        pool.extend([Card::Dual(n), Card::Dual(n)]);
    }
    pool.push(Card::VariableDual);
    pool.extend([Card::FlipPair(FlipKind::TwoFour), Card::FlipPair(FlipKind::TwoFour)]);
    pool.extend([Card::FlipPair(FlipKind::ThreeSix), Card::FlipPair(FlipKind::ThreeSix)]);
    pool.push(Card::Double);
    pool.push(Card::Tiebreaker);
    pool
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Number(n) if *n > 0 => write!(f, "+{}", n),
            Card::Number(n) => write!(f, "{}", n),
            Card::Dual(n) => write!(f, "[+/-]{}", n),
            Card::VariableDual => write!(f, "[+/-][1/2]"),
            Card::FlipPair(FlipKind::TwoFour) => write!(f, "[flip 2&4]"),
            Card::FlipPair(FlipKind::ThreeSix) => write!(f, "[flip 3&6]"),
            Card::Double => write!(f, "[double]"),
            Card::Tiebreaker => write!(f, "[tiebreaker]"),
        }
    }
}

impl FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || GameError::MalformedToken {
            token: s.to_string(),
        };
        match s {
            "[+/-][1/2]" => return Ok(Card::VariableDual),
            "[flip 2&4]" => return Ok(Card::FlipPair(FlipKind::TwoFour)),
            "[flip 3&6]" => return Ok(Card::FlipPair(FlipKind::ThreeSix)),
            "[double]" => return Ok(Card::Double),
            "[tiebreaker]" => return Ok(Card::Tiebreaker),
            _ => {}
        }
        if let Some(rest) = s.strip_prefix("[+/-]") {
            let n: i8 = rest.parse().map_err(|_| bad())?;
            if (1..=6).contains(&n) {
                return Ok(Card::Dual(n));
            }
            return Err(bad());
        }
        let n: i8 = s.parse().map_err(|_| bad())?;
        if n != 0 && (-10..=10).contains(&n) {
            Ok(Card::Number(n))
        } else {
            Err(bad())
        }
    }
}

// Persisted layout keeps the original encoding: plain numbers as bare JSON
// integers, every other kind as its token string.
impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Card::Number(n) => serializer.serialize_i8(*n),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

struct CardVisitor;

impl Visitor<'_> for CardVisitor {
    type Value = Card;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a card token string or a signed integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Card, E> {
        if v != 0 && (-10..=10).contains(&v) {
            Ok(Card::Number(v as i8))
        } else {
            Err(E::custom(format!("card value out of range: {}", v)))
        }
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Card, E> {
        self.visit_i64(v.try_into().map_err(E::custom)?)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Card, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Card, D::Error> {
        deserializer.deserialize_any(CardVisitor)
    }
}
