//! # pazaak-engine: Pazaak Rules Engine Core
//!
//! A deterministic rules engine for two-player Pazaak: alternating forced
//! draws from a shared numeric pile, one optional side-card play per turn,
//! race to a total of 20 without busting, best-of-match to 3 round wins.
//! All shuffles run on seeded RNG for reproducible matches.
//!
//! ## Core Modules
//!
//! - [`cards`] - The closed card set, token encoding, and effect resolution
//! - [`board`] - Per-player board state, totals, flip/double mutations
//! - [`deck`] - The shared 40-card draw pile with deterministic shuffling
//! - [`provider`] - Difficulty presets, random side decks, hand sampling
//! - [`session`] - The turn controller state machine ([`session::GameSession`])
//! - [`scoring`] - Round evaluation and match score tracking
//! - [`schedule`] - Stale-guarded deferral of the dealer's decision
//! - [`events`] - Presentation sink trait and renderable snapshots
//! - [`logger`] - Match record serialization (JSONL)
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use pazaak_engine::events::NullSink;
//! use pazaak_engine::provider::{DealerProfile, Difficulty};
//! use pazaak_engine::session::{GameSession, Phase, Seat};
//!
//! let mut sink = NullSink;
//! let deck = Difficulty::Average.preset();
//! let mut session = GameSession::new(Some(42), deck, DealerProfile::Random).unwrap();
//! session.start_match(&mut sink);
//!
//! // the player has taken their forced draw and may now act
//! match session.phase() {
//!     Phase::AwaitingPlay(Seat::Player) => {
//!         session.stand(Seat::Player, &mut sink).unwrap();
//!     }
//!     _ => {}
//! }
//! ```
//!
//! ## Deterministic Shuffling
//!
//! Same seed, same pile order:
//!
//! ```rust
//! use pazaak_engine::deck::DrawPile;
//!
//! let mut a = DrawPile::new_with_seed(42);
//! let mut b = DrawPile::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.draw(), b.draw());
//! ```

pub mod board;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod events;
pub mod logger;
pub mod provider;
pub mod schedule;
pub mod scoring;
pub mod session;
