//! # Play Command
//!
//! Interactive Pazaak match against the automated dealer.
//!
//! The human drives the player seat through turn prompts; the dealer seat is
//! driven by the baseline brain, with its decisions routed through the
//! engine's [`ActionQueue`] so a decision scheduled for one turn can never
//! fire in a later one. The dealer pause (`--delay-ms`, default from config)
//! sits between scheduling and firing; tests run it at zero.

use std::io::{BufRead, Write};

use pazaak_ai::create_brain;
use pazaak_engine::provider::DealerProfile;
use pazaak_engine::schedule::ActionQueue;
use pazaak_engine::session::{GameSession, Phase, Seat, TurnAction};

use crate::commands::deck::build_deck_interactive;
use crate::config;
use crate::error::CliError;
use crate::formatters::format_hand;
use crate::io_utils::read_stdin_line;
use crate::store::DeckStore;
use crate::ui::{self, ConsoleSink};
use crate::validation::{parse_turn_command, ParseResult};

/// Handle the play command: one interactive match to 3 round wins.
///
/// # Arguments
///
/// * `difficulty` - Dealer profile name (falls back to config, unknown names
///   warn and play the average preset)
/// * `seed` - RNG seed for a reproducible match (default: config, then random)
/// * `delay_ms` - Pause before each dealer action (default: config)
/// * `deck_path` - Saved side deck location (default: config)
/// * `out` - Output stream for the match display
/// * `err` - Error stream for warnings and rejected inputs
/// * `stdin` - Input stream for turn commands
///
/// Quitting mid-match (or EOF on stdin) is a graceful exit, not an error.
pub fn handle_play_command(
    difficulty: Option<String>,
    seed: Option<u64>,
    delay_ms: Option<u64>,
    deck_path: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let difficulty = difficulty.unwrap_or(cfg.difficulty);
    let delay = std::time::Duration::from_millis(delay_ms.unwrap_or(cfg.dealer_delay_ms));
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let store = DeckStore::new(deck_path.unwrap_or(cfg.deck_path));

    let player_deck = match store.load() {
        Some(deck) => deck,
        None => {
            writeln!(out, "No saved side deck; entering the deck builder.")?;
            match build_deck_interactive(&store, out, err, stdin)? {
                Some(deck) => deck,
                None => {
                    writeln!(out, "No side deck confirmed; leaving.")?;
                    return Ok(());
                }
            }
        }
    };

    let profile = {
        let mut warn_sink = ConsoleSink::new(&mut *err);
        DealerProfile::resolve(&difficulty, &mut warn_sink)
    };
    writeln!(out, "play: difficulty={} seed={}", profile, seed)?;

    let mut session = GameSession::new(Some(seed), player_deck, profile)?;
    {
        let mut sink = ConsoleSink::with_snapshots(&mut *out);
        session.start_match(&mut sink);
    }

    let brain = create_brain("baseline");
    let mut queue = ActionQueue::new();

    loop {
        match session.phase() {
            Phase::AwaitingPlay(Seat::Player) => {
                writeln!(out, "Hand: {}", format_hand(session.hand(Seat::Player)))?;
                write!(out, "(play <card> [sign] | stand | end | q): ")?;
                out.flush()?;

                let Some(line) = read_stdin_line(stdin) else {
                    writeln!(out, "\nLeaving match.")?;
                    return Ok(());
                };
                match parse_turn_command(&line) {
                    ParseResult::Action(action) => {
                        let mut sink = ConsoleSink::with_snapshots(&mut *out);
                        if let Err(e) = session.apply_action(Seat::Player, action, &mut sink) {
                            ui::write_error(err, &e.to_string())?;
                        }
                    }
                    ParseResult::Quit => {
                        writeln!(out, "Leaving match.")?;
                        return Ok(());
                    }
                    ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
                }
            }
            Phase::AwaitingPlay(Seat::Dealer) => {
                queue.schedule(session.turn_tag(), brain.decide(&session, Seat::Dealer));
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
                if let Some(action) = queue.take_if_current(session.turn_tag()) {
                    let mut sink = ConsoleSink::with_snapshots(&mut *out);
                    if session.apply_action(Seat::Dealer, action, &mut sink).is_err() {
                        // an illegal brain request must not stall the match
                        let _ = session.apply_action(Seat::Dealer, TurnAction::EndTurn, &mut sink);
                    }
                }
            }
            Phase::RoundOver => {
                let mut sink = ConsoleSink::with_snapshots(&mut *out);
                session.next_round(&mut sink)?;
            }
            Phase::MatchOver => break,
            // transient; never observed between operations
            Phase::AwaitingDraw(_) => break,
        }
    }

    let score = session.score();
    writeln!(out, "Final score: you {} - {} dealer", score.player, score.dealer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pazaak_engine::cards::Card;
    use std::io::Cursor;

    fn saved_store(dir: &tempfile::TempDir) -> DeckStore {
        let store = DeckStore::new(dir.path().join("deck.json"));
        let deck = vec![
            Card::Number(1),
            Card::Number(2),
            Card::Number(3),
            Card::Number(-1),
            Card::Number(-2),
            Card::Number(-3),
            Card::Dual(4),
            Card::Dual(5),
            Card::Number(4),
            Card::Number(-4),
        ];
        store.save(&deck).unwrap();
        store
    }

    fn run_play(stdin_script: &str, dir: &tempfile::TempDir) -> (i32, String, String) {
        let store = saved_store(dir);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(stdin_script.as_bytes().to_vec());
        let result = handle_play_command(
            Some("easy".to_string()),
            Some(42),
            Some(0),
            Some(store.path().to_string_lossy().into_owned()),
            &mut out,
            &mut err,
            &mut stdin,
        );
        (
            if result.is_ok() { 0 } else { 2 },
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_quit_immediately_is_graceful() {
        let dir = tempfile::tempdir().unwrap();
        let (code, output, _) = run_play("q\n", &dir);
        assert_eq!(code, 0);
        assert!(output.contains("play: difficulty=easy seed=42"));
        assert!(output.contains("Leaving match."));
    }

    #[test]
    fn test_eof_is_graceful() {
        let dir = tempfile::tempdir().unwrap();
        let (code, output, _) = run_play("", &dir);
        assert_eq!(code, 0);
        assert!(output.contains("Leaving match."));
    }

    #[test]
    fn test_stand_only_match_runs_to_completion() {
        let dir = tempfile::tempdir().unwrap();
        // standing every turn ends each round quickly; 20 lines outlast any match
        let script = "stand\n".repeat(20);
        let (code, output, _) = run_play(&script, &dir);
        assert_eq!(code, 0);
        assert!(output.contains("MATCH OVER"), "output was: {}", output);
        assert!(output.contains("Final score:"));
    }

    #[test]
    fn test_invalid_command_reprompts() {
        let dir = tempfile::tempdir().unwrap();
        let (code, _, errors) = run_play("flarb\nq\n", &dir);
        assert_eq!(code, 0);
        assert!(errors.contains("Unrecognized command"));
    }

    #[test]
    fn test_card_not_in_hand_is_narrated_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // +10 can never be in a side-deck hand from the saved deck above
        let (code, _, errors) = run_play("play +10\nq\n", &dir);
        assert_eq!(code, 0);
        assert!(errors.contains("Error:"));
    }

    #[test]
    fn test_unknown_difficulty_warns_and_plays() {
        let dir = tempfile::tempdir().unwrap();
        let store = saved_store(&dir);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(b"q\n".to_vec());
        let result = handle_play_command(
            Some("impossible".to_string()),
            Some(42),
            Some(0),
            Some(store.path().to_string_lossy().into_owned()),
            &mut out,
            &mut err,
            &mut stdin,
        );
        assert!(result.is_ok());
        let errors = String::from_utf8(err).unwrap();
        assert!(errors.contains("Unknown dealer difficulty"));
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("difficulty=average"));
    }

    #[test]
    fn test_missing_deck_enters_builder() {
        let dir = tempfile::tempdir().unwrap();
        let deck_path = dir.path().join("deck.json");
        let mut out = Vec::new();
        let mut err = Vec::new();
        // quit the builder straight away
        let mut stdin = Cursor::new(b"q\n".to_vec());
        let result = handle_play_command(
            Some("easy".to_string()),
            Some(42),
            Some(0),
            Some(deck_path.to_string_lossy().into_owned()),
            &mut out,
            &mut err,
            &mut stdin,
        );
        assert!(result.is_ok());
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("entering the deck builder"));
        assert!(output.contains("No side deck confirmed"));
    }
}
