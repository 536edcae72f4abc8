//! Injectable randomness.
//!
//! Phrase selection and typing jitter draw from a [`RandomSource`] owned by the
//! widget, so tests can swap in [`ScriptedRandom`] and get exact outputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// A source of uniform floats in `[0, 1)`.
pub trait RandomSource {
    /// Returns the next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Picks an index in `0..len` uniformly. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index called on an empty pool");
        let index = (self.next_unit() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }
}

/// Picks one element of a non-empty slice.
pub fn pick<'a, T>(random: &mut dyn RandomSource, items: &'a [T]) -> &'a T {
    &items[random.pick_index(items.len())]
}

/// Entropy-seeded generator for live sessions.
pub struct SystemRandom {
    rng: StdRng,
}

impl SystemRandom {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// Reproducible generator, e.g. for replaying a demo conversation.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// Replays a fixed list of values, then repeats `fallback` forever.
///
/// Values are clamped into `[0, 1)`.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback: 0.0,
        }
    }

    /// Always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            values: VecDeque::new(),
            fallback: value,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        let value = self.values.pop_front().unwrap_or(self.fallback);
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
