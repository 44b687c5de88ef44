//! UI helper functions for terminal output formatting.
//!
//! This module provides utility functions for consistent user interface output
//! across CLI commands, plus the [`ConsoleSink`] adapter that feeds engine
//! narration into an output stream.

use std::io::Write;

use pazaak_engine::events::{EventSink, GameSnapshot};

use crate::formatters::format_snapshot;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Forwards engine narration to an output stream. Writes are fire-and-forget
/// since a sink must never fail the game.
pub struct ConsoleSink<'a> {
    out: &'a mut dyn Write,
    render_snapshots: bool,
}

impl<'a> ConsoleSink<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self {
            out,
            render_snapshots: false,
        }
    }

    /// Also print a board/score block after every state change.
    pub fn with_snapshots(out: &'a mut dyn Write) -> Self {
        Self {
            out,
            render_snapshots: true,
        }
    }
}

impl EventSink for ConsoleSink<'_> {
    fn log(&mut self, message: &str) {
        let _ = writeln!(self.out, "{}", message);
    }

    fn warn(&mut self, message: &str) {
        let _ = writeln!(self.out, "WARNING: {}", message);
    }

    fn render(&mut self, snapshot: &GameSnapshot) {
        if self.render_snapshots {
            let _ = writeln!(self.out, "{}", format_snapshot(snapshot));
        }
    }
}
