//! Random source abstraction.
//!
//! Every random decision made while building an order goes through
//! [`RandomSource`], so callers can plug in a seeded RNG for reproducible
//! runs or a [`ScriptedSource`] to assert exact outputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Characters used for random alphanumeric suffixes.
pub const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of uniform randomness.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `[min, max]` (inclusive). Returns `min` when `max < min`.
    fn int_in_range(&mut self, min: i64, max: i64) -> i64;

    /// Returns true with the given probability.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Uniform index into a collection of `len` elements. Returns 0 for empty collections.
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.int_in_range(0, len as i64 - 1) as usize
    }

    /// Random string of `len` characters drawn from [`ALPHANUMERIC`].
    fn alphanumeric(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| ALPHANUMERIC[self.index(ALPHANUMERIC.len())] as char)
            .collect()
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn int_in_range(&mut self, min: i64, max: i64) -> i64 {
        (**self).int_in_range(min, max)
    }
}

/// [`RandomSource`] backed by any `rand` RNG.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Deterministic source: the same seed yields the same orders.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Seeded when a seed is given, OS-seeded otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn int_in_range(&mut self, min: i64, max: i64) -> i64 {
        if max < min {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}

/// Replays a fixed sequence of floats, wrapping around when exhausted.
///
/// Integers are derived from the next float as `min + floor(f * (max - min + 1))`,
/// so a script of `0.0` always yields the lower bound and `0.999` the upper one.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    position: usize,
}

impl ScriptedSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            position: 0,
        }
    }

    /// A source that always returns the same value.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of values consumed so far.
    pub fn consumed(&self) -> usize {
        self.position
    }
}

impl RandomSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }

    fn int_in_range(&mut self, min: i64, max: i64) -> i64 {
        if max < min {
            return min;
        }
        let span = (max - min + 1) as f64;
        let offset = (self.next_f64() * span).floor() as i64;
        (min + offset).min(max)
    }
}
