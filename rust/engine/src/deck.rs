use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Card values present in the shared draw pile.
pub const PILE_VALUES: std::ops::RangeInclusive<i8> = 1..=10;

/// Copies of each value in a fresh pile (40 cards total).
pub const COPIES_PER_VALUE: usize = 4;

/// A round never needs more than this; a pile below it is rebuilt at round
/// start rather than risking mid-round exhaustion.
pub const REFILL_THRESHOLD: usize = 10;

fn full_pile() -> Vec<i8> {
    let mut v = Vec::with_capacity(PILE_VALUES.count() * COPIES_PER_VALUE);
    for n in PILE_VALUES {
        for _ in 0..COPIES_PER_VALUE {
            v.push(n);
        }
    }
    v
}

/// The shared numeric draw pile: four copies each of 1..=10, shuffled with
/// a seeded RNG and consumed by position.
#[derive(Debug)]
pub struct DrawPile {
    cards: Vec<i8>,
    position: usize,
    rng: ChaCha20Rng,
}

impl DrawPile {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_pile(),
            position: 0,
            rng,
        }
    }

    /// Rebuild a full pile and shuffle it.
    pub fn shuffle(&mut self) {
        self.cards = full_pile();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn draw(&mut self) -> Option<i8> {
        if self.position >= self.cards.len() {
            None
        } else {
            let c = self.cards[self.position];
            self.position += 1;
            Some(c)
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    pub fn needs_refill(&self) -> bool {
        self.remaining() < REFILL_THRESHOLD
    }
}
