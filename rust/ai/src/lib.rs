//! # pazaak-ai: Automated Dealer for Pazaak
//!
//! Provides the automated opponent that plays the dealer seat. A brain
//! never mutates the session; it inspects the state and answers with a
//! [`TurnAction`], which the caller routes through the exact same
//! `GameSession` entry points a human uses.
//!
//! ## Core Components
//!
//! - [`DealerBrain`] - Trait defining the decision interface
//! - [`baseline`] - Deterministic rule-based dealer
//! - [`create_brain`] - Factory function for brains by name
//!
//! ## Quick Start
//!
//! ```rust
//! use pazaak_ai::create_brain;
//! use pazaak_engine::events::NullSink;
//! use pazaak_engine::provider::{DealerProfile, Difficulty};
//! use pazaak_engine::session::{GameSession, Phase, Seat};
//!
//! let brain = create_brain("baseline");
//! let mut session = GameSession::new(
//!     Some(42),
//!     Difficulty::Easy.preset(),
//!     DealerProfile::Preset(Difficulty::Hard),
//! )
//! .unwrap();
//! session.start_match(&mut NullSink);
//!
//! if let Phase::AwaitingPlay(seat) = session.phase() {
//!     let action = brain.decide(&session, seat);
//!     session.apply_action(seat, action, &mut NullSink).unwrap();
//! }
//! ```

use pazaak_engine::session::{GameSession, Seat, TurnAction};

pub mod baseline;

/// Decision interface for an automated seat.
///
/// Implementations must be pure with respect to the session: the same
/// state always yields the same action, and nothing is mutated. Timing is
/// not a brain concern; a scripted delay belongs to whoever schedules the
/// returned action.
pub trait DealerBrain: Send + Sync {
    /// Choose the next action for `seat`, which the session currently has
    /// in its play phase.
    fn decide(&self, session: &GameSession, seat: Seat) -> TurnAction;

    /// Name of this brain implementation.
    fn name(&self) -> &str;
}

/// Create a brain by type string. Currently only `"baseline"` exists.
///
/// # Panics
///
/// Panics if an unknown brain type is requested.
pub fn create_brain(kind: &str) -> Box<dyn DealerBrain> {
    match kind {
        "baseline" => Box::new(baseline::BaselineDealer::new()),
        _ => panic!("Unknown brain type: {}", kind),
    }
}
