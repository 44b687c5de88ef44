use serde::{Deserialize, Serialize};

use crate::scoring::RoundOutcome;
use crate::session::Seat;

/// Record of one finished round within a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub player_board: Vec<i8>,
    pub dealer_board: Vec<i8>,
    pub player_total: i32,
    pub dealer_total: i32,
    pub outcome: RoundOutcome,
}

/// Complete record of one match, serialized to JSONL for later analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique identifier (format: YYYYMMDD-NNNNNN)
    pub match_id: String,
    /// RNG seed used by the session (enables deterministic replay)
    pub seed: Option<u64>,
    /// Dealer profile name the match was played against
    pub difficulty: String,
    pub rounds: Vec<RoundRecord>,
    pub player_score: u8,
    pub dealer_score: u8,
    pub winner: Option<Seat>,
    /// Timestamp when the match finished (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_match_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes [`MatchRecord`]s as JSONL, one line per match, injecting a
/// timestamp when the record carries none.
pub struct MatchLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl MatchLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                let _ = create_dir_all(parent);
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_match_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &MatchRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_ids_are_sequential_within_a_date() {
        let mut logger = MatchLogger::with_seq_for_test("20260830");
        assert_eq!(logger.next_id(), "20260830-000001");
        assert_eq!(logger.next_id(), "20260830-000002");
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = MatchRecord {
            match_id: format_match_id("20260830", 7),
            seed: Some(42),
            difficulty: "hard".into(),
            rounds: vec![RoundRecord {
                round: 1,
                player_board: vec![10, 9, 1],
                dealer_board: vec![8, 7],
                player_total: 20,
                dealer_total: 15,
                outcome: RoundOutcome::Win(Seat::Player, crate::scoring::WinReason::HigherTotal),
            }],
            player_score: 3,
            dealer_score: 1,
            winner: Some(Seat::Player),
            ts: Some("2026-08-30T00:00:00Z".into()),
        };
        let line = serde_json::to_string(&record).unwrap();
        let back: MatchRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back, record);
    }
}
