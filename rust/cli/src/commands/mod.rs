//! Subcommand handlers for the `pazaak` binary.
//!
//! Each handler takes its parsed arguments plus injected output (and, where
//! interactive, input) streams, so the integration tests can drive commands
//! without touching the process's real stdio.

pub mod cfg;
pub mod deck;
pub mod play;
pub mod presets;
pub mod sim;
pub mod stats;

pub use cfg::handle_cfg_command;
pub use deck::handle_deck_command;
pub use play::handle_play_command;
pub use presets::handle_presets_command;
pub use sim::handle_sim_command;
pub use stats::handle_stats_command;
