//! Hash-based value noise and its fractal (fbm) sum.
//!
//! Three layers, each a pure function:
//! - [`hash2`]: integer lattice point + seed to a scalar in [0, 1)
//! - [`value_noise`]: smoothstep-eased bilinear interpolation of `hash2`
//! - [`fbm`]: amplitude-weighted octave sum, normalized by total amplitude
//!
//! [`GrainField`] bundles a seed with the fbm configuration and is the single
//! source of texture for the hatching generator.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Multipliers mixing the lattice x coordinate, y coordinate, and seed.
const HASH_X: u32 = 374_761_393;
const HASH_Y: u32 = 668_265_263;
const HASH_SEED: u32 = 69_069;
/// Multiplier applied between the two xor-shift rounds.
const HASH_MIX: u32 = 1_274_126_177;
/// 2^32, the normalizer turning a 32-bit hash into [0, 1).
const HASH_RANGE: f64 = 4_294_967_296.0;

/// A deterministic scalar field over the plane.
///
/// Implementations must be pure: same `(x, y)` always gives the same value.
pub trait ScalarField: Send + Sync {
    /// Sample the field at `(x, y)`.
    fn sample(&self, x: f64, y: f64) -> f64;

    /// Sample the field at a point.
    fn sample_at(&self, p: DVec2) -> f64 {
        self.sample(p.x, p.y)
    }
}

/// Hashes an integer lattice point with a seed into [0, 1).
///
/// All arithmetic wraps at 32 bits, so every integer input is valid.
pub fn hash2(ix: i64, iy: i64, seed: u32) -> f64 {
    let mut n = (ix as u32)
        .wrapping_mul(HASH_X)
        .wrapping_add((iy as u32).wrapping_mul(HASH_Y))
        .wrapping_add(seed.wrapping_mul(HASH_SEED));
    n = (n ^ (n >> 13)).wrapping_mul(HASH_MIX);
    (n ^ (n >> 16)) as f64 / HASH_RANGE
}

/// Cubic ease `t² (3 − 2t)` with zero slope at both ends.
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Value noise with lattice spacing `cell`.
///
/// Interpolates [`hash2`] at the four corners of the enclosing cell using
/// smoothstep-eased weights on both axes.
pub fn value_noise(x: f64, y: f64, seed: u32, cell: f64) -> f64 {
    let fx = x / cell;
    let fy = y / cell;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let sx = smoothstep(fx - x0);
    let sy = smoothstep(fy - y0);
    let ix = x0 as i64;
    let iy = y0 as i64;

    let v00 = hash2(ix, iy, seed);
    let v10 = hash2(ix + 1, iy, seed);
    let v01 = hash2(ix, iy + 1, seed);
    let v11 = hash2(ix + 1, iy + 1, seed);

    let a = v00 * (1.0 - sx) + v10 * sx;
    let b = v01 * (1.0 - sx) + v11 * sx;
    a * (1.0 - sy) + b * sy
}

/// Octave layout of a fractal noise sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FbmParams {
    /// Lattice spacing of the first octave.
    pub base_cell: f64,
    /// Number of octaves summed.
    pub octaves: u32,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves.
    pub gain: f64,
    /// Seed increment between octaves.
    pub octave_stride: u32,
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            base_cell: 512.0,
            octaves: 5,
            lacunarity: 2.0,
            gain: 0.5,
            octave_stride: 101,
        }
    }
}

/// Fractal Brownian motion over [`value_noise`].
///
/// Octave `o` samples at frequency `lacunarity^o` with amplitude `gain^o`
/// and seed `seed + octave_stride * o`. The sum is divided by the total
/// amplitude. Zero octaves yields 0.
pub fn fbm(x: f64, y: f64, seed: u32, params: &FbmParams) -> f64 {
    let mut amp = 1.0;
    let mut freq = 1.0;
    let mut sum = 0.0;
    let mut norm = 0.0;
    for o in 0..params.octaves {
        let octave_seed = seed.wrapping_add(params.octave_stride.wrapping_mul(o));
        sum += amp * value_noise(x * freq, y * freq, octave_seed, params.base_cell);
        norm += amp;
        amp *= params.gain;
        freq *= params.lacunarity;
    }
    if norm == 0.0 {
        0.0
    } else {
        sum / norm
    }
}

/// Seeded fbm field used to modulate jitter, gaps, width, and alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct GrainField {
    seed: u32,
    params: FbmParams,
}

impl GrainField {
    /// Creates a field from a run seed.
    ///
    /// The run seed is reduced to its low 31 bits before hashing.
    pub fn new(run_seed: u64, params: FbmParams) -> Self {
        Self {
            seed: (run_seed & 0x7FFF_FFFF) as u32,
            params,
        }
    }

    /// The 31-bit seed actually fed to the hash.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Octave layout of this field.
    pub fn params(&self) -> &FbmParams {
        &self.params
    }
}

impl ScalarField for GrainField {
    fn sample(&self, x: f64, y: f64) -> f64 {
        fbm(x, y, self.seed, &self.params)
    }
}
