//! Random sources for piece selection and food placement.
//!
//! Both simulators take their randomness through [`RandomSource`], so hosts can
//! seed them and tests can script exact outcomes.
//!
//! - [`SimpleRng`]: small LCG, deterministic per seed.
//! - [`SequenceRng`]: replays a fixed list of values (tests and replays).

/// Source of random numbers consumed by the simulators.
pub trait RandomSource {
    /// Generate the next raw value
    fn next_u32(&mut self) -> u32;

    /// Generate a value in `[0, max)`; `max` must be non-zero.
    ///
    /// Uses the high bits of [`RandomSource::next_u32`] (multiply-shift), which
    /// matters for LCGs whose low bits have short periods.
    fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
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
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a scripted list of values, cycling when exhausted.
///
/// `next_range` reduces each value modulo `max`, so a script can name the
/// exact column, row or piece index it wants.
///
/// ```
/// use arcade_core::rng::{RandomSource, SequenceRng};
///
/// let mut rng = SequenceRng::new(vec![3, 12]);
/// assert_eq!(rng.next_range(10), 3);
/// assert_eq!(rng.next_range(10), 2);
/// assert_eq!(rng.next_range(10), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SequenceRng {
    values: Vec<u32>,
    pos: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, pos: 0 }
    }

    /// Number of values handed out so far
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RandomSource for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }

    fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}
