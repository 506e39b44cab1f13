//! RNG module - injected piece selection
//!
//! The board asks a [`PieceProvider`] for every new queued piece; it never decides the
//! sequence itself. Three providers ship with the crate:
//!
//! - [`SevenBag`]: each bag holds one of every kind, shuffled, drawn until empty
//! - [`UniformRandom`]: independent uniform draws (the classic arcade policy)
//! - [`FixedSequence`]: cycles a caller-supplied list, for deterministic tests
//!
//! Also provides a simple LCG so seeded games are reproducible.

use crate::types::ShapeKind;

/// Source of the next queued piece
pub trait PieceProvider {
    fn next_shape(&mut self) -> ShapeKind;
}

impl<P: PieceProvider + ?Sized> PieceProvider for Box<P> {
    fn next_shape(&mut self) -> ShapeKind {
        (**self).next_shape()
    }
}

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
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits: the low bits of a power-of-two LCG cycle with short periods
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct SevenBag {
    bag: [ShapeKind; 7],
    /// Index into current bag
    bag_index: usize,
    rng: SimpleRng,
}

impl SevenBag {
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            bag: ShapeKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        queue.refill_bag();
        queue
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = ShapeKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> ShapeKind {
        if self.bag_index < self.bag.len() {
            self.bag[self.bag_index]
        } else {
            let mut preview = self.clone();
            preview.refill_bag();
            preview.bag[0]
        }
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> &[ShapeKind] {
        &self.bag[self.bag_index..]
    }
}

impl PieceProvider for SevenBag {
    fn next_shape(&mut self) -> ShapeKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }
        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }
}

impl Default for SevenBag {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Independent uniform draws over the seven kinds
#[derive(Debug, Clone)]
pub struct UniformRandom {
    rng: SimpleRng,
}

impl UniformRandom {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl PieceProvider for UniformRandom {
    fn next_shape(&mut self) -> ShapeKind {
        let idx = self.rng.next_range(ShapeKind::ALL.len() as u32) as usize;
        ShapeKind::ALL[idx]
    }
}

/// Cycles through a fixed list of kinds
#[derive(Debug, Clone)]
pub struct FixedSequence {
    sequence: Vec<ShapeKind>,
    index: usize,
}

impl FixedSequence {
    /// # Panics
    ///
    /// Panics if `sequence` is empty.
    pub fn new(sequence: impl Into<Vec<ShapeKind>>) -> Self {
        let sequence = sequence.into();
        assert!(!sequence.is_empty(), "piece sequence must not be empty");
        Self { sequence, index: 0 }
    }

    /// The same kind forever
    pub fn repeat(kind: ShapeKind) -> Self {
        Self::new(vec![kind])
    }
}

impl PieceProvider for FixedSequence {
    fn next_shape(&mut self) -> ShapeKind {
        let kind = self.sequence[self.index];
        self.index = (self.index + 1) % self.sequence.len();
        kind
    }
}
