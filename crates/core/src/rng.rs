//! RNG module - uniform piece generation without triple repeats
//!
//! Pieces are drawn uniformly from the seven kinds, except that a kind which
//! was both of the two previous picks is redrawn. The generator remembers the
//! last four picks; it is created per game session so sessions stay
//! independent.
//!
//! Also provides a simple LCG so that a seed reproduces a whole game.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Number of recent picks remembered by [`PieceGenerator`]
pub const HISTORY_LEN: usize = 4;

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
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits have short periods; use the high half.
        (self.next_u32() >> 16) % max
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Piece generator with a sliding window of recent picks
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
    history: ArrayVec<PieceKind, HISTORY_LEN>,
}

impl PieceGenerator {
    /// Create a generator for a new session
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            history: ArrayVec::new(),
        }
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        let kind = loop {
            let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
            let candidate = PieceKind::ALL[idx];
            if !self.would_triple(candidate) {
                break candidate;
            }
        };

        if self.history.is_full() {
            self.history.remove(0);
        }
        self.history.push(kind);
        kind
    }

    /// True if `kind` equals both of the two most recent picks
    fn would_triple(&self, kind: PieceKind) -> bool {
        let n = self.history.len();
        n >= 2 && self.history[n - 1] == kind && self.history[n - 2] == kind
    }

    /// Recent picks, oldest first
    pub fn history(&self) -> &[PieceKind] {
        &self.history
    }

    /// Get the current RNG state (for restarting a game on the same stream)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
