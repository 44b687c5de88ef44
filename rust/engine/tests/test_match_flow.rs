use pazaak_engine::events::{NullSink, RecordingSink};
use pazaak_engine::provider::{DealerProfile, Difficulty};
use pazaak_engine::scoring::MATCH_TARGET;
use pazaak_engine::session::{GameSession, Phase, Seat};

/// Drive a whole match with both seats standing at their first chance.
/// Every round is then a pair of single forced draws, so the match is a
/// quick, fully deterministic walk to the target score.
#[test]
fn stand_only_match_runs_to_completion() {
    let mut sink = NullSink;
    let mut session = GameSession::new(
        Some(42),
        Difficulty::VeryEasy.preset(),
        DealerProfile::Preset(Difficulty::VeryEasy),
    )
    .expect("valid deck");
    session.start_match(&mut sink);

    let mut guard = 0;
    loop {
        guard += 1;
        assert!(guard < 1000, "match must terminate");
        match session.phase() {
            Phase::AwaitingPlay(seat) => {
                session.stand(seat, &mut sink).expect("standing is legal");
            }
            Phase::RoundOver => {
                session.next_round(&mut sink).expect("round over");
            }
            Phase::MatchOver => break,
            Phase::AwaitingDraw(_) => unreachable!("draws are forced synchronously"),
        }
    }

    let winner = session.match_winner().expect("match has a winner");
    assert_eq!(session.score().get(winner), MATCH_TARGET);
    assert!(session.score().get(winner.opponent()) < MATCH_TARGET);
}

/// Ending the turn forever forces someone to bust eventually; busts end
/// rounds on the spot and the score only ever moves one step at a time.
#[test]
fn end_turn_only_match_scores_one_round_at_a_time() {
    let mut sink = RecordingSink::new();
    let mut session = GameSession::new(
        Some(7),
        Difficulty::Easy.preset(),
        DealerProfile::Preset(Difficulty::Hard),
    )
    .expect("valid deck");
    session.start_match(&mut sink);

    let mut prev_total = 0u8;
    let mut guard = 0;
    loop {
        guard += 1;
        assert!(guard < 5000, "match must terminate");
        match session.phase() {
            Phase::AwaitingPlay(seat) => {
                session.end_turn(seat, &mut sink).expect("end turn is legal");
                assert!(session.board(seat).len() <= 9, "board overfilled");
            }
            Phase::RoundOver | Phase::MatchOver => {
                let total = session.score().player + session.score().dealer;
                assert!(total <= prev_total + 1, "score moved more than one step");
                prev_total = total;
                if session.phase() == Phase::MatchOver {
                    break;
                }
                session.next_round(&mut sink).expect("round over");
            }
            Phase::AwaitingDraw(_) => unreachable!("draws are forced synchronously"),
        }
    }

    assert!(session.match_winner().is_some());
    assert!(sink.contains("ROUND RESULT"));
    assert!(sink.contains("MATCH OVER"));
}

/// A standing opponent is never drawn for again.
#[test]
fn standing_board_stays_frozen_for_the_rest_of_the_round() {
    let mut sink = NullSink;
    let mut session = GameSession::new(
        Some(99),
        Difficulty::Easy.preset(),
        DealerProfile::Random,
    )
    .expect("valid deck");
    session.start_match(&mut sink);

    // player stands immediately; record their board
    if let Phase::AwaitingPlay(Seat::Player) = session.phase() {
        session.stand(Seat::Player, &mut sink).expect("legal stand");
    }
    let frozen = session.board(Seat::Player).entries().to_vec();

    let mut guard = 0;
    while !matches!(session.phase(), Phase::RoundOver | Phase::MatchOver) {
        guard += 1;
        assert!(guard < 100, "round must terminate");
        if let Phase::AwaitingPlay(seat) = session.phase() {
            assert_eq!(seat, Seat::Dealer, "player is standing");
            session.end_turn(seat, &mut sink).expect("legal end turn");
        }
        assert_eq!(session.board(Seat::Player).entries(), frozen.as_slice());
    }
}
