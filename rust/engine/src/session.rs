use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cards::Card;
use crate::deck::DrawPile;
use crate::errors::GameError;
use crate::events::{EventSink, GameSnapshot};
use crate::provider::{self, DealerProfile, SIDE_DECK_SIZE};
use crate::schedule::TurnTag;
use crate::scoring::{self, MatchScore, RoundOutcome, SeatResult};

const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

// Keeps side-deck shuffles decorrelated from the draw pile when both are
// derived from the same session seed.
const SIDE_RNG_SALT: u64 = 0x5EED_CA4D;

/// One of the two participants. Everything per-seat in the session is
/// indexed by this.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    Player,
    Dealer,
}

impl Seat {
    pub fn opponent(self) -> Seat {
        match self {
            Seat::Player => Seat::Dealer,
            Seat::Dealer => Seat::Player,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Player => f.write_str("player"),
            Seat::Dealer => f.write_str("dealer"),
        }
    }
}

/// Pair of values indexed by [`Seat`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerSeat<T> {
    pub player: T,
    pub dealer: T,
}

impl<T> PerSeat<T> {
    pub fn get(&self, seat: Seat) -> &T {
        match seat {
            Seat::Player => &self.player,
            Seat::Dealer => &self.dealer,
        }
    }

    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        match seat {
            Seat::Player => &mut self.player,
            Seat::Dealer => &mut self.dealer,
        }
    }
}

/// Where the session currently is in the round/match lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The forced draw for this seat is about to happen (transient)
    AwaitingDraw(Seat),
    /// This seat may play one side card, stand, or end the turn
    AwaitingPlay(Seat),
    /// Round evaluated; waiting for `next_round`
    RoundOver,
    /// Either seat reached the match target
    MatchOver,
}

/// A request routed into the turn controller. Human input and the
/// automated dealer both speak this type.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TurnAction {
    /// Play one side card from the hand, with a resolved sign choice for
    /// dual and variable cards
    Play { card: Card, choice: Option<i8> },
    Stand,
    EndTurn,
}

/// Per-round mutable flags, discarded at round end.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RoundState {
    turn: Seat,
    standing: PerSeat<bool>,
    card_played_this_turn: bool,
    tiebreaker: PerSeat<bool>,
}

impl RoundState {
    fn fresh() -> Self {
        Self {
            turn: Seat::Player,
            standing: PerSeat::default(),
            card_played_this_turn: false,
            tiebreaker: PerSeat::default(),
        }
    }
}

/// The single-owner game session: draw pile, per-seat boards, hands and
/// side decks, round state and match score. All mutation flows through the
/// action entry points ([`play_card`](Self::play_card),
/// [`stand`](Self::stand), [`end_turn`](Self::end_turn),
/// [`next_round`](Self::next_round)); there is no ambient state.
///
/// Narration and renderable snapshots are pushed to the [`EventSink`]
/// passed into each operation, so the core never owns presentation.
///
/// # Examples
///
/// ```
/// use pazaak_engine::events::NullSink;
/// use pazaak_engine::provider::{DealerProfile, Difficulty};
/// use pazaak_engine::session::GameSession;
///
/// let deck = Difficulty::Easy.preset();
/// let mut session = GameSession::new(Some(7), deck, DealerProfile::Random).unwrap();
/// session.start_match(&mut NullSink);
/// // round 1 has begun with a forced draw for the player
/// assert!(!session.board(pazaak_engine::session::Seat::Player).is_empty());
/// ```
#[derive(Debug)]
pub struct GameSession {
    pile: DrawPile,
    boards: PerSeat<Board>,
    side_decks: PerSeat<Vec<Card>>,
    hands: PerSeat<Vec<Card>>,
    score: MatchScore,
    round: RoundState,
    phase: Phase,
    profile: DealerProfile,
    round_no: u32,
    turn_no: u32,
    match_winner: Option<Seat>,
    last_outcome: Option<RoundOutcome>,
    rng: ChaCha20Rng,
}

impl GameSession {
    /// Build a session from the player's confirmed 10-card side deck and a
    /// dealer profile. The dealer's deck itself is materialized at match
    /// start, since the random profile regenerates it every match.
    pub fn new(
        seed: Option<u64>,
        player_side_deck: Vec<Card>,
        profile: DealerProfile,
    ) -> Result<Self, GameError> {
        if player_side_deck.len() != SIDE_DECK_SIZE {
            return Err(GameError::WrongDeckSize {
                expected: SIDE_DECK_SIZE,
                actual: player_side_deck.len(),
            });
        }
        let seed = seed.unwrap_or(DEFAULT_SEED);
        Ok(Self {
            pile: DrawPile::new_with_seed(seed),
            boards: PerSeat::default(),
            side_decks: PerSeat {
                player: player_side_deck,
                dealer: Vec::new(),
            },
            hands: PerSeat::default(),
            score: MatchScore::new(),
            round: RoundState::fresh(),
            phase: Phase::AwaitingDraw(Seat::Player),
            profile,
            round_no: 0,
            turn_no: 0,
            match_winner: None,
            last_outcome: None,
            rng: ChaCha20Rng::seed_from_u64(seed ^ SIDE_RNG_SALT),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> Seat {
        self.round.turn
    }

    pub fn board(&self, seat: Seat) -> &Board {
        self.boards.get(seat)
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        self.hands.get(seat)
    }

    pub fn side_deck(&self, seat: Seat) -> &[Card] {
        self.side_decks.get(seat)
    }

    pub fn score(&self) -> MatchScore {
        self.score
    }

    pub fn is_standing(&self, seat: Seat) -> bool {
        *self.round.standing.get(seat)
    }

    pub fn has_tiebreaker(&self, seat: Seat) -> bool {
        *self.round.tiebreaker.get(seat)
    }

    pub fn card_played_this_turn(&self) -> bool {
        self.round.card_played_this_turn
    }

    pub fn profile(&self) -> DealerProfile {
        self.profile
    }

    pub fn match_winner(&self) -> Option<Seat> {
        self.match_winner
    }

    pub fn last_outcome(&self) -> Option<RoundOutcome> {
        self.last_outcome
    }

    pub fn round_number(&self) -> u32 {
        self.round_no
    }

    pub fn pile_remaining(&self) -> usize {
        self.pile.remaining()
    }

    /// Identifies the current round and turn, for guarding deferred dealer
    /// actions against firing after the turn they were scheduled for.
    pub fn turn_tag(&self) -> TurnTag {
        TurnTag {
            round: self.round_no,
            turn: self.turn_no,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            turn: self.round.turn,
            player_board: self.boards.player.entries().to_vec(),
            player_total: self.boards.player.total(),
            dealer_board: self.boards.dealer.entries().to_vec(),
            dealer_total: self.boards.dealer.total(),
            player_hand: self.hands.player.clone(),
            dealer_hand_size: self.hands.dealer.len(),
            player_standing: self.round.standing.player,
            dealer_standing: self.round.standing.dealer,
            player_score: self.score.player,
            dealer_score: self.score.dealer,
        }
    }

    /// Start (or restart) a match: score reset, dealer deck regenerated
    /// from the profile, fresh 4-card hands sampled from both side decks,
    /// fresh shuffled pile, then round one.
    pub fn start_match(&mut self, sink: &mut dyn EventSink) {
        self.score = MatchScore::new();
        self.match_winner = None;
        self.side_decks.dealer = self.profile.build_deck(&mut self.rng);
        self.hands.player = provider::draw_hand(&mut self.side_decks.player, &mut self.rng);
        self.hands.dealer = provider::draw_hand(&mut self.side_decks.dealer, &mut self.rng);
        self.pile.shuffle();
        self.round_no = 0;
        sink.log("=== New Pazaak Match Started ===");
        self.start_round(sink);
    }

    /// Begin the next round after `RoundOver`.
    pub fn next_round(&mut self, sink: &mut dyn EventSink) -> Result<(), GameError> {
        if self.phase != Phase::RoundOver {
            return Err(GameError::OutOfPhase);
        }
        self.start_round(sink);
        Ok(())
    }

    fn start_round(&mut self, sink: &mut dyn EventSink) {
        if self.pile.needs_refill() {
            self.pile.shuffle();
        }
        self.boards.player.clear();
        self.boards.dealer.clear();
        self.round = RoundState::fresh();
        self.round_no += 1;
        self.turn_no = 0;
        self.phase = Phase::AwaitingDraw(Seat::Player);
        sink.log(&format!(
            "=== New Round === (Score: P {} - D {})",
            self.score.player, self.score.dealer
        ));
        self.force_draw(sink);
    }

    /// Route a [`TurnAction`] for a seat. The automated dealer submits its
    /// decisions through here, same as human input.
    pub fn apply_action(
        &mut self,
        seat: Seat,
        action: TurnAction,
        sink: &mut dyn EventSink,
    ) -> Result<(), GameError> {
        match action {
            TurnAction::Play { card, choice } => self.play_card(seat, card, choice, sink),
            TurnAction::Stand => self.stand(seat, sink),
            TurnAction::EndTurn => self.end_turn(seat, sink),
        }
    }

    /// Play one side card from the seat's hand. At most one per turn; the
    /// card must be present by value equality. A rejected play leaves
    /// every piece of state untouched.
    pub fn play_card(
        &mut self,
        seat: Seat,
        card: Card,
        choice: Option<i8>,
        sink: &mut dyn EventSink,
    ) -> Result<(), GameError> {
        self.check_active(seat)?;
        if self.round.card_played_this_turn {
            return Err(GameError::AlreadyPlayedThisTurn);
        }
        let hand = self.hands.get(seat);
        let idx = hand
            .iter()
            .position(|&c| c == card)
            .ok_or(GameError::CardNotInHand)?;
        let effect = card.effect(choice)?;
        // board.apply fails without mutating only for the empty-board
        // double, so the hand removal below cannot strand a half-applied
        // play
        let applied = self.boards.get_mut(seat).apply(effect)?;
        self.hands.get_mut(seat).remove(idx);
        self.round.card_played_this_turn = true;

        use crate::board::AppliedEffect;
        match applied {
            AppliedEffect::Appended(v) => {
                sink.log(&format!("{} played {} ({:+}).", seat, card, v));
            }
            AppliedEffect::Flipped { kind, count } => {
                let (a, b) = kind.targets();
                sink.log(&format!(
                    "{} played {}: flipped {} value(s) of {} & {} on their own board.",
                    seat, card, count, a, b
                ));
            }
            AppliedEffect::Doubled(v) => {
                sink.log(&format!("{} played [double]: last card doubled to {}.", seat, v));
            }
            AppliedEffect::TiebreakerSet => {
                *self.round.tiebreaker.get_mut(seat) = true;
                sink.log(&format!("{} played [tiebreaker +/-1].", seat));
            }
        }
        sink.log(&format!("{} total: {}", seat, self.boards.get(seat).total()));

        if !self.check_auto_stand(seat, sink) {
            sink.render(&self.snapshot());
        }
        Ok(())
    }

    /// Stop drawing for the rest of the round.
    pub fn stand(&mut self, seat: Seat, sink: &mut dyn EventSink) -> Result<(), GameError> {
        self.check_active(seat)?;
        *self.round.standing.get_mut(seat) = true;
        sink.log(&format!(
            "{} stands at {}.",
            seat,
            self.boards.get(seat).total()
        ));
        self.end_round_if_needed(sink);
        Ok(())
    }

    /// End the turn without standing. A total above 20 is a bust, which
    /// stands both seats and evaluates the round immediately.
    pub fn end_turn(&mut self, seat: Seat, sink: &mut dyn EventSink) -> Result<(), GameError> {
        self.check_active(seat)?;
        let total = self.boards.get(seat).total();
        sink.log(&format!("{} ends turn at {}.", seat, total));
        if total > crate::board::TARGET_TOTAL {
            self.round.standing.player = true;
            self.round.standing.dealer = true;
            self.evaluate_round(sink);
        } else {
            self.switch_turn(sink);
        }
        Ok(())
    }

    fn check_active(&self, seat: Seat) -> Result<(), GameError> {
        match self.phase {
            Phase::AwaitingPlay(active) => {
                if active == seat {
                    Ok(())
                } else {
                    Err(GameError::NotYourTurn { seat })
                }
            }
            _ => Err(GameError::OutOfPhase),
        }
    }

    /// Forced draw for the active seat. Not optional and not an action:
    /// this runs at round start and on every turn switch.
    fn force_draw(&mut self, sink: &mut dyn EventSink) {
        let seat = self.round.turn;
        let card = self.draw_from_pile(sink);
        self.boards.get_mut(seat).push(card);
        sink.log(&format!("{} draws {}", seat, card));
        if !self.check_auto_stand(seat, sink) {
            self.phase = Phase::AwaitingPlay(seat);
            sink.render(&self.snapshot());
        }
    }

    fn draw_from_pile(&mut self, sink: &mut dyn EventSink) -> i8 {
        match self.pile.draw() {
            Some(c) => c,
            None => {
                // structurally unreachable (refill happens at round start),
                // recovered anyway rather than surfacing a failure
                sink.warn("Draw pile exhausted mid-round; rebuilding.");
                self.pile.shuffle();
                self.pile.draw().unwrap_or(1)
            }
        }
    }

    /// Reaching exactly 20 stands the seat immediately, bypassing whatever
    /// the turn would otherwise still allow. So does filling all nine
    /// board slots, which keeps the board from ever taking a 10th entry.
    /// Returns true if either fired.
    fn check_auto_stand(&mut self, seat: Seat, sink: &mut dyn EventSink) -> bool {
        let board = self.boards.get(seat);
        if board.is_twenty() {
            *self.round.standing.get_mut(seat) = true;
            sink.log(&format!("{} hits 20 and stands.", seat));
        } else if board.len() >= crate::board::BOARD_CAP {
            *self.round.standing.get_mut(seat) = true;
            sink.log(&format!("{} fills all 9 board slots and stands.", seat));
        } else {
            return false;
        }
        self.end_round_if_needed(sink);
        true
    }

    fn end_round_if_needed(&mut self, sink: &mut dyn EventSink) {
        if self.round.standing.player && self.round.standing.dealer {
            self.evaluate_round(sink);
        } else {
            self.switch_turn(sink);
        }
    }

    fn switch_turn(&mut self, sink: &mut dyn EventSink) {
        self.round.card_played_this_turn = false;
        self.round.turn = self.round.turn.opponent();
        self.turn_no += 1;

        if *self.round.standing.get(self.round.turn) {
            // skip a standing seat straight to the round-end check
            self.end_round_if_needed(sink);
            return;
        }

        self.phase = Phase::AwaitingDraw(self.round.turn);
        self.force_draw(sink);
        if let Phase::AwaitingPlay(seat) = self.phase {
            sink.log(&format!(
                "=== {} turn ({}) ===",
                seat,
                self.boards.get(seat).total()
            ));
        }
    }

    fn evaluate_round(&mut self, sink: &mut dyn EventSink) {
        let outcome = scoring::evaluate_round(
            SeatResult::of(&self.boards.player, self.round.tiebreaker.player),
            SeatResult::of(&self.boards.dealer, self.round.tiebreaker.dealer),
        );
        sink.log(&format!("ROUND RESULT: {}", outcome));
        let winner = self.score.record(&outcome);
        sink.log(&format!(
            "Score -> P:{} D:{}",
            self.score.player, self.score.dealer
        ));
        self.last_outcome = Some(outcome);
        match winner {
            Some(seat) => {
                self.match_winner = Some(seat);
                self.phase = Phase::MatchOver;
                sink.log(&format!("MATCH OVER: {} wins the match!", seat));
            }
            None => {
                self.phase = Phase::RoundOver;
            }
        }
        sink.render(&self.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::FlipKind;
    use crate::events::RecordingSink;
    use crate::provider::Difficulty;
    use crate::scoring::{TieReason, WinReason};

    fn session() -> GameSession {
        GameSession::new(Some(42), Difficulty::Easy.preset(), DealerProfile::Random)
            .expect("valid deck")
    }

    /// Overwrite the mid-round state so a scenario starts from known
    /// boards with the given seat to act.
    fn rig(
        session: &mut GameSession,
        player_board: &[i8],
        dealer_board: &[i8],
        turn: Seat,
        hand: Vec<Card>,
    ) {
        session.boards.player.clear();
        for &v in player_board {
            session.boards.player.push(v);
        }
        session.boards.dealer.clear();
        for &v in dealer_board {
            session.boards.dealer.push(v);
        }
        session.round = RoundState::fresh();
        session.round.turn = turn;
        *session.hands.get_mut(turn) = hand;
        session.phase = Phase::AwaitingPlay(turn);
    }

    #[test]
    fn wrong_deck_size_is_rejected() {
        let err = GameSession::new(Some(1), vec![Card::Double; 9], DealerProfile::Random)
            .unwrap_err();
        assert_eq!(
            err,
            GameError::WrongDeckSize {
                expected: 10,
                actual: 9
            }
        );
    }

    #[test]
    fn start_match_deals_hands_and_forces_first_draw() {
        let mut sink = RecordingSink::new();
        let mut s = session();
        s.start_match(&mut sink);
        assert_eq!(s.hand(Seat::Player).len(), 4);
        assert_eq!(s.hand(Seat::Dealer).len(), 4);
        assert_eq!(s.side_deck(Seat::Dealer).len(), 10);
        assert!(!s.board(Seat::Player).is_empty(), "forced draw happened");
        assert!(sink.contains("player draws"));
    }

    #[test]
    fn playing_to_twenty_auto_stands_and_evaluates_when_dealer_stands() {
        let mut sink = RecordingSink::new();
        let mut s = session();
        s.start_match(&mut sink);
        rig(&mut s, &[10, 7], &[10, 9], Seat::Player, vec![Card::Number(3)]);
        s.round.standing.dealer = true;

        s.play_card(Seat::Player, Card::Number(3), None, &mut sink)
            .expect("legal play");

        assert!(sink.contains("player hits 20 and stands."));
        assert_eq!(s.phase(), Phase::RoundOver);
        assert_eq!(
            s.last_outcome(),
            Some(RoundOutcome::Win(Seat::Player, WinReason::HigherTotal))
        );
        assert_eq!(s.score().player, 1);
    }

    #[test]
    fn ending_turn_above_twenty_stands_both_and_ends_the_round() {
        let mut sink = RecordingSink::new();
        let mut s = session();
        s.start_match(&mut sink);
        rig(&mut s, &[12, 5, 6], &[9, 9], Seat::Player, vec![]);

        s.end_turn(Seat::Player, &mut sink).expect("legal end turn");

        assert_eq!(
            s.last_outcome(),
            Some(RoundOutcome::Win(Seat::Dealer, WinReason::OpponentBust))
        );
        assert_eq!(s.phase(), Phase::RoundOver);
        assert_eq!(s.score().dealer, 1);
    }

    #[test]
    fn flip_card_negates_own_positive_targets() {
        let mut sink = RecordingSink::new();
        let mut s = session();
        s.start_match(&mut sink);
        rig(
            &mut s,
            &[2, 4, 10],
            &[5],
            Seat::Player,
            vec![Card::FlipPair(FlipKind::TwoFour)],
        );

        s.play_card(
            Seat::Player,
            Card::FlipPair(FlipKind::TwoFour),
            None,
            &mut sink,
        )
        .expect("legal play");

        assert_eq!(s.board(Seat::Player).entries(), &[-2, -4, 10]);
        assert_eq!(s.board(Seat::Player).total(), 4);
    }

    #[test]
    fn filling_nine_slots_auto_stands_and_wins_special() {
        let mut sink = RecordingSink::new();
        let mut s = session();
        s.start_match(&mut sink);
        rig(
            &mut s,
            &[1, 1, 1, 1, 1, 1, 1, 1],
            &[10, 9],
            Seat::Player,
            vec![Card::Number(2)],
        );
        s.round.standing.dealer = true;

        s.play_card(Seat::Player, Card::Number(2), None, &mut sink)
            .expect("legal play");

        assert!(sink.contains("fills all 9 board slots and stands."));
        // total 10 against a standing 19: the 9-card rule overrides totals
        assert_eq!(
            s.last_outcome(),
            Some(RoundOutcome::Win(Seat::Player, WinReason::NineCard))
        );
    }

    #[test]
    fn only_one_side_card_per_turn() {
        let mut sink = RecordingSink::new();
        let mut s = session();
        s.start_match(&mut sink);
        rig(
            &mut s,
            &[5],
            &[9],
            Seat::Player,
            vec![Card::Number(2), Card::Number(3)],
        );

        s.play_card(Seat::Player, Card::Number(2), None, &mut sink)
            .expect("first play is legal");
        let err = s
            .play_card(Seat::Player, Card::Number(3), None, &mut sink)
            .unwrap_err();
        assert_eq!(err, GameError::AlreadyPlayedThisTurn);
        assert_eq!(s.hand(Seat::Player), &[Card::Number(3)]);
    }

    #[test]
    fn rejected_plays_leave_state_unchanged() {
        let mut sink = RecordingSink::new();
        let mut s = session();
        s.start_match(&mut sink);
        rig(&mut s, &[5], &[9], Seat::Player, vec![Card::Double]);
        // remember: rigged hand holds only [double]
        let before = s.snapshot();

        let err = s
            .play_card(Seat::Player, Card::Number(9), None, &mut sink)
            .unwrap_err();
        assert_eq!(err, GameError::CardNotInHand);
        assert_eq!(s.snapshot(), before);

        // a different absent card is rejected the same way
        let err = s
            .play_card(Seat::Player, Card::Dual(3), Some(3), &mut sink)
            .unwrap_err();
        assert_eq!(err, GameError::CardNotInHand);
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn empty_board_double_is_rejected_and_card_kept() {
        let mut sink = RecordingSink::new();
        let mut s = session();
        s.start_match(&mut sink);
        rig(&mut s, &[], &[9], Seat::Player, vec![Card::Double]);

        let err = s
            .play_card(Seat::Player, Card::Double, None, &mut sink)
            .unwrap_err();
        assert_eq!(err, GameError::EmptyBoardDouble);
        assert_eq!(s.hand(Seat::Player), &[Card::Double]);
        assert!(!s.card_played_this_turn());
    }

    #[test]
    fn dual_card_requires_a_matching_choice() {
        let mut sink = RecordingSink::new();
        let mut s = session();
        s.start_match(&mut sink);
        rig(&mut s, &[5], &[9], Seat::Player, vec![Card::Dual(3)]);

        let err = s
            .play_card(Seat::Player, Card::Dual(3), None, &mut sink)
            .unwrap_err();
        assert_eq!(err, GameError::ChoiceRequired);
        let err = s
            .play_card(Seat::Player, Card::Dual(3), Some(4), &mut sink)
            .unwrap_err();
        assert_eq!(err, GameError::InvalidChoice { value: 4 });

        s.play_card(Seat::Player, Card::Dual(3), Some(-3), &mut sink)
            .expect("minus three is a valid resolution");
        assert_eq!(s.board(Seat::Player).entries(), &[5, -3]);
        assert!(s.hand(Seat::Player).is_empty());
    }

    #[test]
    fn second_tiebreaker_still_appends_but_flag_is_idempotent() {
        let mut sink = RecordingSink::new();
        let mut s = session();
        s.start_match(&mut sink);
        rig(
            &mut s,
            &[5],
            &[9],
            Seat::Player,
            vec![Card::Tiebreaker, Card::Tiebreaker],
        );

        s.play_card(Seat::Player, Card::Tiebreaker, None, &mut sink)
            .expect("legal play");
        assert!(s.has_tiebreaker(Seat::Player));
        assert_eq!(s.board(Seat::Player).entries(), &[5, 1]);

        // next turn for the same seat
        s.round.card_played_this_turn = false;
        s.phase = Phase::AwaitingPlay(Seat::Player);
        s.play_card(Seat::Player, Card::Tiebreaker, None, &mut sink)
            .expect("legal play");
        assert!(s.has_tiebreaker(Seat::Player));
        assert_eq!(s.board(Seat::Player).entries(), &[5, 1, 1]);
    }

    #[test]
    fn acting_out_of_turn_or_phase_is_rejected() {
        let mut sink = RecordingSink::new();
        let mut s = session();
        s.start_match(&mut sink);
        rig(&mut s, &[5], &[9], Seat::Player, vec![]);

        let err = s.stand(Seat::Dealer, &mut sink).unwrap_err();
        assert_eq!(err, GameError::NotYourTurn { seat: Seat::Dealer });

        s.phase = Phase::RoundOver;
        let err = s.end_turn(Seat::Player, &mut sink).unwrap_err();
        assert_eq!(err, GameError::OutOfPhase);
    }

    #[test]
    fn standing_seat_is_skipped_on_turn_switch() {
        let mut sink = RecordingSink::new();
        let mut s = session();
        s.start_match(&mut sink);
        rig(&mut s, &[5, 5], &[9], Seat::Dealer, vec![]);
        s.round.standing.player = true;
        let dealer_cards = s.board(Seat::Dealer).len();

        s.end_turn(Seat::Dealer, &mut sink).expect("legal end turn");

        // control came straight back to the dealer with a fresh forced draw
        assert_eq!(s.phase(), Phase::AwaitingPlay(Seat::Dealer));
        assert_eq!(s.board(Seat::Dealer).len(), dealer_cards + 1);
    }

    #[test]
    fn both_standing_evaluates_a_tie_without_scoring() {
        let mut sink = RecordingSink::new();
        let mut s = session();
        s.start_match(&mut sink);
        rig(&mut s, &[10, 8], &[9, 9], Seat::Player, vec![]);
        s.round.standing.dealer = true;

        s.stand(Seat::Player, &mut sink).expect("legal stand");

        assert_eq!(
            s.last_outcome(),
            Some(RoundOutcome::Tie(TieReason::EqualTotals))
        );
        assert_eq!(s.score(), MatchScore::new());
        assert_eq!(s.phase(), Phase::RoundOver);
    }

    #[test]
    fn next_round_resets_round_state_but_keeps_score_and_hands() {
        let mut sink = RecordingSink::new();
        let mut s = session();
        s.start_match(&mut sink);
        rig(&mut s, &[10, 8], &[9, 9], Seat::Player, vec![Card::Double]);
        s.round.standing.dealer = true;
        s.round.tiebreaker.player = true;
        s.stand(Seat::Player, &mut sink).expect("legal stand");
        assert_eq!(s.phase(), Phase::RoundOver);

        let round_before = s.round_number();
        s.next_round(&mut sink).expect("round over");
        assert_eq!(s.round_number(), round_before + 1);
        assert_eq!(s.turn(), Seat::Player);
        assert!(!s.has_tiebreaker(Seat::Player));
        assert!(!s.is_standing(Seat::Player));
        assert_eq!(s.hand(Seat::Player), &[Card::Double]);
        assert_eq!(s.board(Seat::Dealer).len(), 0);
    }

    #[test]
    fn match_ends_at_three_round_wins() {
        let mut sink = RecordingSink::new();
        let mut s = session();
        s.start_match(&mut sink);
        for _ in 0..2 {
            rig(&mut s, &[10, 9], &[9, 9], Seat::Player, vec![]);
            s.round.standing.dealer = true;
            s.stand(Seat::Player, &mut sink).expect("legal stand");
            assert_eq!(s.phase(), Phase::RoundOver);
            s.next_round(&mut sink).expect("round over");
        }
        rig(&mut s, &[10, 9], &[9, 9], Seat::Player, vec![]);
        s.round.standing.dealer = true;
        s.stand(Seat::Player, &mut sink).expect("legal stand");

        assert_eq!(s.phase(), Phase::MatchOver);
        assert_eq!(s.match_winner(), Some(Seat::Player));
        assert_eq!(s.score().player, 3);
        assert!(sink.contains("MATCH OVER"));

        let err = s.next_round(&mut sink).unwrap_err();
        assert_eq!(err, GameError::OutOfPhase);
    }
}
