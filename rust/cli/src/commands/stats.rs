//! Statistics aggregation command for match history analysis.
//!
//! Reads JSONL match records (plain or `.jsonl.zst`) and computes summary
//! statistics: matches played, win distribution by seat, and round counts.
//! Records whose reported winner disagrees with their scores fail
//! validation, since a recorded match must show exactly one seat at the
//! match target.

use std::io::Write;
use std::path::Path;

use pazaak_engine::logger::MatchRecord;
use pazaak_engine::scoring::MATCH_TARGET;
use pazaak_engine::session::Seat;

use crate::error::CliError;
use crate::io_utils::read_text_auto;
use crate::ui;

/// Aggregates statistics from JSONL match record files.
///
/// # Arguments
///
/// * `input` - Path to a JSONL file or a directory containing match records
/// * `out` - Output stream for the statistics report
/// * `err` - Output stream for error messages and warnings
///
/// # Validation
///
/// - Detects corrupted or incomplete records
/// - Verifies winner/score consistency (the winner's score must equal the
///   match target; the loser's must be below it)
/// - Reports warnings for skipped records
pub fn handle_stats_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    run_stats(&input, out, err)
}

struct StatsState {
    matches: u64,
    player_wins: u64,
    dealer_wins: u64,
    rounds: u64,
    skipped: u64,
    corrupted: u64,
    stats_ok: bool,
}

fn score_consistent(rec: &MatchRecord) -> bool {
    match rec.winner {
        Some(Seat::Player) => {
            rec.player_score == MATCH_TARGET && rec.dealer_score < MATCH_TARGET
        }
        Some(Seat::Dealer) => {
            rec.dealer_score == MATCH_TARGET && rec.player_score < MATCH_TARGET
        }
        None => rec.player_score < MATCH_TARGET && rec.dealer_score < MATCH_TARGET,
    }
}

fn consume_stats_content(
    content: String,
    state: &mut StatsState,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let has_trailing_nl = content.ends_with('\n');
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    for (i, line) in lines.iter().enumerate() {
        let rec: MatchRecord = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(_) => {
                if i == lines.len() - 1 && !has_trailing_nl {
                    state.skipped += 1;
                } else {
                    state.corrupted += 1;
                }
                continue;
            }
        };

        if !score_consistent(&rec) {
            state.stats_ok = false;
            ui::write_error(
                err,
                &format!("Winner/score mismatch at match {}", rec.match_id),
            )?;
            continue;
        }

        state.matches += 1;
        state.rounds += rec.rounds.len() as u64;
        match rec.winner {
            Some(Seat::Player) => state.player_wins += 1,
            Some(Seat::Dealer) => state.dealer_wins += 1,
            None => {}
        }
    }
    Ok(())
}

fn run_stats(input: &str, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let path = Path::new(input);
    let mut state = StatsState {
        matches: 0,
        player_wins: 0,
        dealer_wins: 0,
        rounds: 0,
        skipped: 0,
        corrupted: 0,
        stats_ok: true,
    };

    if path.is_dir() {
        let mut stack = vec![path.to_path_buf()];
        while let Some(d) = stack.pop() {
            let rd = match std::fs::read_dir(&d) {
                Ok(v) => v,
                Err(_) => continue,
            };
            for e in rd.filter_map(Result::ok) {
                let p = e.path();
                if p.is_dir() {
                    stack.push(p);
                } else if let Some(fname) = p.file_name().and_then(|f| f.to_str())
                    && (fname.ends_with(".jsonl") || fname.ends_with(".jsonl.zst"))
                {
                    match read_text_auto(&p.to_string_lossy()) {
                        Ok(content) => {
                            consume_stats_content(content, &mut state, err)?;
                        }
                        Err(_) => {
                            state.corrupted += 1;
                        }
                    }
                }
            }
        }
    } else {
        match read_text_auto(input) {
            Ok(s) => consume_stats_content(s, &mut state, err)?,
            Err(e) => {
                ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
                return Err(CliError::Config(format!("Failed to read {}: {}", input, e)));
            }
        }
    }

    if state.corrupted > 0 {
        ui::write_error(
            err,
            &format!("Skipped {} corrupted record(s)", state.corrupted),
        )?;
    }
    if state.skipped > 0 {
        ui::write_error(
            err,
            &format!("Discarded {} incomplete final line(s)", state.skipped),
        )?;
    }
    if !path.is_dir() && state.matches == 0 && (state.corrupted > 0 || state.skipped > 0) {
        ui::write_error(err, "Invalid record")?;
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }

    let summary = serde_json::json!({
        "matches": state.matches,
        "rounds": state.rounds,
        "winners": { "player": state.player_wins, "dealer": state.dealer_wins },
    });
    let json_output = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json_output)?;
    if state.stats_ok {
        Ok(())
    } else {
        Err(CliError::InvalidInput(
            "Statistics validation failed".to_string(),
        ))
    }
}
