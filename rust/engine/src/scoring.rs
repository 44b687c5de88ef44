use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::session::Seat;

/// Round wins needed to take the match.
pub const MATCH_TARGET: u8 = 3;

/// One seat's inputs to round evaluation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SeatResult {
    pub total: i32,
    pub cards: usize,
    pub tiebreaker: bool,
}

impl SeatResult {
    pub fn of(board: &Board, tiebreaker: bool) -> Self {
        Self {
            total: board.total(),
            cards: board.len(),
            tiebreaker,
        }
    }

    fn bust(&self) -> bool {
        self.total > crate::board::TARGET_TOTAL
    }

    fn nine_card(&self) -> bool {
        self.cards >= crate::board::BOARD_CAP && !self.bust()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    /// Filled all 9 board slots without busting
    NineCard,
    /// The other seat busted
    OpponentBust,
    /// Equal totals, but this seat held the tiebreaker
    Tiebreaker,
    /// Plain higher total
    HigherTotal,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieReason {
    BothBust,
    EqualTotals,
}

/// Outcome of a finished round.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    Win(Seat, WinReason),
    Tie(TieReason),
}

impl RoundOutcome {
    pub fn winner(&self) -> Option<Seat> {
        match self {
            RoundOutcome::Win(seat, _) => Some(*seat),
            RoundOutcome::Tie(_) => None,
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundOutcome::Win(s, WinReason::NineCard) => {
                write!(f, "{} wins by filling all 9 cards without busting!", s)
            }
            RoundOutcome::Win(s, WinReason::OpponentBust) => {
                write!(f, "{} wins ({} bust).", s, s.opponent())
            }
            RoundOutcome::Win(s, WinReason::Tiebreaker) => {
                write!(f, "{} wins via tiebreaker card!", s)
            }
            RoundOutcome::Win(s, WinReason::HigherTotal) => write!(f, "{} wins.", s),
            RoundOutcome::Tie(TieReason::BothBust) => write!(f, "Both bust. Tie."),
            RoundOutcome::Tie(TieReason::EqualTotals) => write!(f, "Tie game."),
        }
    }
}

/// Evaluate a finished round. Priority order: 9-card special win, double
/// bust, single bust, tiebreaker on equal totals, higher total. The
/// comparison is symmetric: swapping the two seats swaps the winner. When
/// both seats hold non-bust 9-card boards the special rule does not fire
/// and the totals comparison decides.
pub fn evaluate_round(player: SeatResult, dealer: SeatResult) -> RoundOutcome {
    match (player.nine_card(), dealer.nine_card()) {
        (true, false) => return RoundOutcome::Win(Seat::Player, WinReason::NineCard),
        (false, true) => return RoundOutcome::Win(Seat::Dealer, WinReason::NineCard),
        _ => {}
    }
    match (player.bust(), dealer.bust()) {
        (true, true) => return RoundOutcome::Tie(TieReason::BothBust),
        (true, false) => return RoundOutcome::Win(Seat::Dealer, WinReason::OpponentBust),
        (false, true) => return RoundOutcome::Win(Seat::Player, WinReason::OpponentBust),
        (false, false) => {}
    }
    if player.total == dealer.total {
        return match (player.tiebreaker, dealer.tiebreaker) {
            (true, false) => RoundOutcome::Win(Seat::Player, WinReason::Tiebreaker),
            (false, true) => RoundOutcome::Win(Seat::Dealer, WinReason::Tiebreaker),
            _ => RoundOutcome::Tie(TieReason::EqualTotals),
        };
    }
    if player.total > dealer.total {
        RoundOutcome::Win(Seat::Player, WinReason::HigherTotal)
    } else {
        RoundOutcome::Win(Seat::Dealer, WinReason::HigherTotal)
    }
}

/// Match score, persisted across rounds. A round tie leaves it unchanged;
/// the match ends the moment either seat reaches [`MATCH_TARGET`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub player: u8,
    pub dealer: u8,
}

impl MatchScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, seat: Seat) -> u8 {
        match seat {
            Seat::Player => self.player,
            Seat::Dealer => self.dealer,
        }
    }

    /// Record a round outcome. Returns the match winner if this round's
    /// increment reached the target, which can happen at most once per
    /// match since scores only ever step by one.
    pub fn record(&mut self, outcome: &RoundOutcome) -> Option<Seat> {
        let seat = outcome.winner()?;
        match seat {
            Seat::Player => self.player += 1,
            Seat::Dealer => self.dealer += 1,
        }
        (self.get(seat) >= MATCH_TARGET).then_some(seat)
    }
}
