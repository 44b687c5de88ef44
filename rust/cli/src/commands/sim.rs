//! Simulation command handler for automated match generation.
//!
//! Plays N full matches with the baseline brain driving both seats and
//! appends one [`MatchRecord`] per match to a JSONL file. Match `i` uses
//! seed `base + i`, so any recorded match can be replayed deterministically
//! from its seed alone.
//!
//! # Environment Variables
//!
//! - `PAZAAK_SIM_BREAK_AFTER`: stop after N matches (exercises the
//!   interrupted exit path in tests)

use std::io::Write;

use pazaak_ai::create_brain;
use pazaak_engine::events::NullSink;
use pazaak_engine::logger::{MatchLogger, MatchRecord, RoundRecord};
use pazaak_engine::provider::{random_side_deck, DealerProfile};
use pazaak_engine::session::{GameSession, Phase, Seat};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::error::CliError;
use crate::ui::{self, ConsoleSink};

/// Hard cap on engine operations per match; a healthy match finishes in far
/// fewer, so hitting this means the session stopped making progress.
const MAX_STEPS: usize = 10_000;

/// Handle the sim command: run automated matches, optionally recording them.
///
/// # Arguments
///
/// * `matches` - Number of matches to play (must be >= 1)
/// * `output` - JSONL path to append match records to
/// * `seed` - Base RNG seed (default: random)
/// * `difficulty` - Dealer profile for every match (default: config default)
/// * `out` - Output stream for progress messages
/// * `err` - Output stream for warnings and errors
pub fn handle_sim_command(
    matches: u64,
    output: Option<String>,
    seed: Option<u64>,
    difficulty: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let total = matches as usize;
    if total == 0 {
        ui::write_error(err, "matches must be >= 1")?;
        return Err(CliError::InvalidInput("matches must be >= 1".to_string()));
    }

    let profile = {
        let mut warn_sink = ConsoleSink::new(&mut *err);
        DealerProfile::resolve(difficulty.as_deref().unwrap_or("average"), &mut warn_sink)
    };

    let mut logger = match output {
        Some(path) => Some(MatchLogger::create(path)?),
        None => None,
    };

    let break_after = std::env::var("PAZAAK_SIM_BREAK_AFTER")
        .ok()
        .and_then(|v| v.parse::<usize>().ok());

    let base_seed = seed.unwrap_or_else(rand::random);
    let mut completed = 0usize;

    for i in 0..total {
        let match_seed = base_seed.wrapping_add(i as u64);
        let (rounds, score, winner) = play_match(match_seed, profile)?;

        if let Some(logger) = logger.as_mut() {
            let record = MatchRecord {
                match_id: logger.next_id(),
                seed: Some(match_seed),
                difficulty: profile.to_string(),
                rounds,
                player_score: score.player,
                dealer_score: score.dealer,
                winner,
                ts: None,
            };
            logger.write(&record)?;
        }

        completed += 1;

        if let Some(b) = break_after
            && completed == b
        {
            writeln!(out, "Interrupted: saved {}/{}", completed, total)?;
            return Err(CliError::Interrupted(format!(
                "Interrupted: saved {}/{}",
                completed, total
            )));
        }
    }

    writeln!(out, "Simulated: {} matches", completed)?;
    Ok(())
}

/// Play one match to completion with the baseline brain on both seats.
fn play_match(
    seed: u64,
    profile: DealerProfile,
) -> Result<(Vec<RoundRecord>, pazaak_engine::scoring::MatchScore, Option<Seat>), CliError> {
    let mut deck_rng = ChaCha20Rng::seed_from_u64(seed);
    let player_deck = random_side_deck(&mut deck_rng);

    let mut session = GameSession::new(Some(seed), player_deck, profile)?;
    session.start_match(&mut NullSink);

    let brain = create_brain("baseline");
    let mut rounds = Vec::new();

    for _ in 0..MAX_STEPS {
        match session.phase() {
            Phase::AwaitingPlay(seat) => {
                let action = brain.decide(&session, seat);
                if session.apply_action(seat, action, &mut NullSink).is_err() {
                    session.apply_action(
                        seat,
                        pazaak_engine::session::TurnAction::EndTurn,
                        &mut NullSink,
                    )?;
                }
            }
            Phase::RoundOver => {
                record_round(&session, &mut rounds);
                session.next_round(&mut NullSink)?;
            }
            Phase::MatchOver => {
                record_round(&session, &mut rounds);
                return Ok((rounds, session.score(), session.match_winner()));
            }
            Phase::AwaitingDraw(_) => break,
        }
    }

    Err(CliError::Engine(format!(
        "match with seed {} did not terminate",
        seed
    )))
}

fn record_round(session: &GameSession, rounds: &mut Vec<RoundRecord>) {
    if let Some(outcome) = session.last_outcome() {
        rounds.push(RoundRecord {
            round: session.round_number(),
            player_board: session.board(Seat::Player).entries().to_vec(),
            dealer_board: session.board(Seat::Dealer).entries().to_vec(),
            player_total: session.board(Seat::Player).total(),
            dealer_total: session.board(Seat::Dealer).total(),
            outcome,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_command_basic_execution() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let result = handle_sim_command(1, None, Some(42), None, &mut out, &mut err);
        assert!(result.is_ok());

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Simulated: 1 matches"));
    }

    #[test]
    fn test_sim_command_zero_matches() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let result = handle_sim_command(0, None, Some(42), None, &mut out, &mut err);
        assert!(result.is_err());

        let error_output = String::from_utf8(err).unwrap();
        assert!(error_output.contains("matches must be >= 1"));
    }

    #[test]
    fn test_sim_writes_one_record_per_match() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sims").join("matches.jsonl");
        let mut out = Vec::new();
        let mut err = Vec::new();

        let result = handle_sim_command(
            3,
            Some(path.to_string_lossy().into_owned()),
            Some(7),
            Some("hard".to_string()),
            &mut out,
            &mut err,
        );
        assert!(result.is_ok());

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let record: MatchRecord = serde_json::from_str(line).unwrap();
            assert_eq!(record.difficulty, "hard");
            assert!(record.winner.is_some());
            assert!(!record.rounds.is_empty());
            assert!(record.ts.is_some());
            assert!(record.player_score == 3 || record.dealer_score == 3);
        }
    }

    #[test]
    fn test_sim_is_deterministic_per_seed() {
        let (a, score_a, win_a) = play_match(99, DealerProfile::Random).unwrap();
        let (b, score_b, win_b) = play_match(99, DealerProfile::Random).unwrap();
        assert_eq!(a, b);
        assert_eq!(score_a, score_b);
        assert_eq!(win_a, win_b);
    }

    #[test]
    fn test_match_winner_has_three_round_wins() {
        let (_, score, winner) = play_match(5, DealerProfile::Random).unwrap();
        match winner {
            Some(Seat::Player) => assert_eq!(score.player, 3),
            Some(Seat::Dealer) => assert_eq!(score.dealer, 3),
            None => panic!("match must produce a winner"),
        }
    }
}
