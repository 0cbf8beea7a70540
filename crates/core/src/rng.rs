//! RNG module - uniform random piece generation
//!
//! Each piece kind is drawn independently and uniformly; there is no bag or
//! repetition guard. A simple LCG keeps every game reproducible from its seed.

use std::collections::VecDeque;

use crate::pieces::PieceDef;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current generator state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Produces fresh piece definitions.
///
/// Kinds queued with [`PieceFactory::with_sequence`] are handed out first, in
/// order; after that every kind is drawn uniformly at random.
#[derive(Debug, Clone)]
pub struct PieceFactory {
    rng: SimpleRng,
    scripted: VecDeque<PieceKind>,
}

impl PieceFactory {
    /// Create a new factory with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            scripted: VecDeque::new(),
        }
    }

    /// Factory that yields `kinds` before falling back to random draws.
    pub fn with_sequence(seed: u32, kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            scripted: kinds.into_iter().collect(),
        }
    }

    /// Draw a random kind
    pub fn next_kind(&mut self) -> PieceKind {
        if let Some(kind) = self.scripted.pop_front() {
            return kind;
        }
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }

    /// New piece definition with a copy of the catalog shape and no anchor
    pub fn next_piece(&mut self) -> PieceDef {
        PieceDef::new(self.next_kind())
    }

    /// Seed that continues the current random sequence
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceFactory {
    fn default() -> Self {
        Self::new(1)
    }
}
