//! Deterministic PRNG based on the Xorshift64 algorithm.
//!
//! This is the single random stream of a hatching run. It is passed by
//! `&mut` into every call that consumes randomness, so the order of draws is
//! part of the call structure rather than hidden global state. Same seed,
//! same call sequence, same values on every platform.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed of 0 is replaced with
/// a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Fallback seed used when the caller provides 0.
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` for full mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns an integer uniformly drawn from the inclusive range `[lo, hi]`.
    ///
    /// Always consumes exactly one draw. If `hi < lo` the result is `lo`.
    pub fn next_int_inclusive(&mut self, lo: usize, hi: usize) -> usize {
        let draw = self.next_u64();
        match (hi.saturating_sub(lo) as u64).checked_add(1) {
            Some(span) => lo + (draw % span) as usize,
            // The range covers every u64.
            None => lo.wrapping_add(draw as usize),
        }
    }

    /// Draws a normally distributed sample with the given mean and standard
    /// deviation (Box-Muller, cosine branch).
    ///
    /// Always consumes exactly two uniform draws, including when `std_dev` is 0.
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        // 1 - u lies in (0, 1], keeping ln() finite.
        let u1 = 1.0 - self.next_f64();
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
        mean + std_dev * z
    }
}
