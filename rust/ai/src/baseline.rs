//! Deterministic rule-based dealer.
//!
//! Decision order: reach exactly 20 with a hand card if possible, rescue a
//! busted board if possible, beat or match a standing opponent, otherwise
//! stand on a high total and draw on a low one. No randomness, so the same
//! session state always produces the same action.

use pazaak_engine::board::{Board, TARGET_TOTAL};
use pazaak_engine::cards::Card;
use pazaak_engine::session::{GameSession, Seat, TurnAction};

use crate::DealerBrain;

/// Totals at or above this are worth standing on when the opponent is
/// still drawing.
const STAND_THRESHOLD: i32 = 18;

/// The reference dealer: rule-based and deterministic.
#[derive(Debug, Clone, Default)]
pub struct BaselineDealer;

impl BaselineDealer {
    pub fn new() -> Self {
        Self
    }

    /// Every total the board could reach by playing `card`, paired with
    /// the sign choice that gets there.
    fn play_outcomes(card: Card, board: &Board) -> Vec<(Option<i8>, i32)> {
        let total = board.total();
        match card {
            Card::Number(n) => vec![(None, total + n as i32)],
            Card::Dual(n) => vec![
                (Some(n), total + n as i32),
                (Some(-n), total - n as i32),
            ],
            Card::VariableDual => [1i8, -1, 2, -2]
                .iter()
                .map(|&v| (Some(v), total + v as i32))
                .collect(),
            Card::FlipPair(kind) => {
                let (a, b) = kind.targets();
                let delta: i32 = board
                    .entries()
                    .iter()
                    .filter(|&&v| v > 0 && (v == a || v == b))
                    .map(|&v| -2 * v as i32)
                    .sum();
                vec![(None, total + delta)]
            }
            Card::Double => match board.entries().last() {
                Some(&last) => vec![(None, total + last as i32)],
                None => vec![],
            },
            Card::Tiebreaker => vec![(None, total + 1)],
        }
    }

    /// The single best play available: highest reachable total that does
    /// not bust. Returns the card, its choice, and the resulting total.
    fn best_play(hand: &[Card], board: &Board) -> Option<(Card, Option<i8>, i32)> {
        let mut best: Option<(Card, Option<i8>, i32)> = None;
        for &card in hand {
            for (choice, new_total) in Self::play_outcomes(card, board) {
                if new_total > TARGET_TOTAL {
                    continue;
                }
                if best.is_none_or(|(_, _, t)| new_total > t) {
                    best = Some((card, choice, new_total));
                }
            }
        }
        best
    }

    fn decide_for(
        hand: &[Card],
        board: &Board,
        opponent_standing: bool,
        opponent_total: i32,
        card_played_this_turn: bool,
    ) -> TurnAction {
        let total = board.total();
        let best = if card_played_this_turn {
            None
        } else {
            Self::best_play(hand, board)
        };

        // bust: a rescue play or nothing
        if total > TARGET_TOTAL {
            return match best {
                Some((card, choice, _)) => TurnAction::Play { card, choice },
                None => TurnAction::EndTurn,
            };
        }

        // a perfect 20 is always worth the card
        if let Some((card, choice, new_total)) = best {
            if new_total == TARGET_TOTAL {
                return TurnAction::Play { card, choice };
            }
            // behind a standing opponent: play past them if a card can
            if opponent_standing
                && opponent_total <= TARGET_TOTAL
                && total <= opponent_total
                && new_total > opponent_total
            {
                return TurnAction::Play { card, choice };
            }
        }

        if opponent_standing {
            // the opponent cannot improve; stand the moment we're ahead,
            // or when they busted
            if opponent_total > TARGET_TOTAL || total > opponent_total {
                return TurnAction::Stand;
            }
            return TurnAction::EndTurn;
        }

        if total >= STAND_THRESHOLD {
            TurnAction::Stand
        } else {
            TurnAction::EndTurn
        }
    }
}

impl DealerBrain for BaselineDealer {
    fn decide(&self, session: &GameSession, seat: Seat) -> TurnAction {
        let opponent = seat.opponent();
        Self::decide_for(
            session.hand(seat),
            session.board(seat),
            session.is_standing(opponent),
            session.board(opponent).total(),
            session.card_played_this_turn(),
        )
    }

    fn name(&self) -> &str {
        "BaselineDealer"
    }
}
