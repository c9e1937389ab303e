//! Noise-modulated stroke styling for runs and their ghosts.
//!
//! Width and opacity both rise with the grain value at the run's midpoint,
//! so darker strokes are also the heavier ones.

use crate::config::HatchConfig;
use engrave_core::prng::Xorshift64;
use engrave_core::StrokeStyle;

/// Range of the random width multiplier applied to each run.
pub const WIDTH_JITTER: (f64, f64) = (0.7, 1.3);
/// Width factor at grain 0; grain 1 adds another full `base_stroke`.
const WIDTH_FLOOR: f64 = 0.65;
/// Ghost spread at grain 0; grain 1 adds 1.2 more.
const GHOST_SPREAD_FLOOR: f64 = 0.3;
const GHOST_SPREAD_GAIN: f64 = 1.2;

/// Style of a run whose midpoint grain is `gmid`. Consumes one draw.
pub fn primary_style(cfg: &HatchConfig, gmid: f64, rng: &mut Xorshift64) -> StrokeStyle {
    let jitter = rng.next_range(WIDTH_JITTER.0, WIDTH_JITTER.1);
    let width = cfg.base_stroke * (WIDTH_FLOOR + gmid) * jitter;
    let alpha = cfg.alpha_min + (cfg.alpha_max - cfg.alpha_min) * gmid;
    StrokeStyle {
        width,
        color: cfg.ink,
        alpha: alpha.clamp(0.0, 1.0),
        cap: cfg.line_cap,
        join: cfg.line_join,
    }
}

/// Style of a ghost copy: thinner (floored at `ghost_min_width`) and fainter.
pub fn ghost_style(cfg: &HatchConfig, primary: &StrokeStyle) -> StrokeStyle {
    StrokeStyle {
        width: (primary.width * cfg.ghost_width_scale).max(cfg.ghost_min_width),
        alpha: primary.alpha * cfg.ghost_alpha_scale,
        ..*primary
    }
}

/// Number of ghosts for one run. Consumes one draw.
pub fn ghost_count(cfg: &HatchConfig, rng: &mut Xorshift64) -> usize {
    rng.next_int_inclusive(cfg.ghost_min, cfg.ghost_max)
}

/// Signed displacement of one ghost along the family normal. Consumes one draw.
pub fn ghost_offset(cfg: &HatchConfig, gmid: f64, rng: &mut Xorshift64) -> f64 {
    let spread = GHOST_SPREAD_FLOOR + GHOST_SPREAD_GAIN * gmid;
    rng.next_range(-cfg.ghost_offset, cfg.ghost_offset) * spread
}
