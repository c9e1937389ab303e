//! Orientation sampling from a weighted mixture of wrapped Gaussian modes.
//!
//! Hatching orientation is undirected: a stroke at θ is the same stroke at
//! θ + π, so every draw is reduced into [0, π).

use crate::error::EngraveError;
use crate::prng::Xorshift64;
use std::f64::consts::PI;

/// One component of an [`AngleMixture`]. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleMode {
    pub mean: f64,
    pub sigma: f64,
    pub weight: f64,
}

impl AngleMode {
    /// Builds a mode from degrees (mean and sigma) and a relative weight.
    pub fn from_degrees(mean_deg: f64, sigma_deg: f64, weight: f64) -> Self {
        Self {
            mean: mean_deg.to_radians(),
            sigma: sigma_deg.to_radians(),
            weight,
        }
    }
}

/// Ordered, validated list of [`AngleMode`]s.
///
/// Weights need not sum to one; they are normalized at draw time.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleMixture {
    modes: Vec<AngleMode>,
    total_weight: f64,
}

impl AngleMixture {
    /// Validates and wraps a list of modes.
    ///
    /// Fails with `EmptyMixture` for an empty list, and `InvalidMode` for a
    /// non-finite component, a negative sigma or weight, or when every weight
    /// is zero.
    pub fn new(modes: Vec<AngleMode>) -> Result<Self, EngraveError> {
        if modes.is_empty() {
            return Err(EngraveError::EmptyMixture);
        }
        for (index, m) in modes.iter().enumerate() {
            let reason = if !(m.mean.is_finite() && m.sigma.is_finite() && m.weight.is_finite()) {
                Some("components must be finite")
            } else if m.sigma < 0.0 {
                Some("sigma must be >= 0")
            } else if m.weight < 0.0 {
                Some("weight must be >= 0")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(EngraveError::InvalidMode {
                    index,
                    reason: reason.into(),
                });
            }
        }
        let total_weight: f64 = modes.iter().map(|m| m.weight).sum();
        if total_weight <= 0.0 {
            return Err(EngraveError::InvalidMode {
                index: modes.len() - 1,
                reason: "total weight must be > 0".into(),
            });
        }
        Ok(Self {
            modes,
            total_weight,
        })
    }

    /// Builds a mixture from `[mean_deg, sigma_deg, weight]` triples.
    pub fn from_degrees(triples: &[[f64; 3]]) -> Result<Self, EngraveError> {
        Self::new(
            triples
                .iter()
                .map(|&[mean, sigma, weight]| AngleMode::from_degrees(mean, sigma, weight))
                .collect(),
        )
    }

    pub fn modes(&self) -> &[AngleMode] {
        &self.modes
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Index of the mode selected by a uniform threshold `u` in [0, 1).
    ///
    /// Walks the modes accumulating weight until the running sum reaches
    /// `u * total`. Rounding overshoot falls through to the last mode.
    pub fn select(&self, u: f64) -> usize {
        let threshold = u * self.total_weight;
        let mut acc = 0.0;
        for (i, m) in self.modes.iter().enumerate() {
            acc += m.weight;
            if threshold <= acc {
                return i;
            }
        }
        self.modes.len() - 1
    }

    /// Draws an orientation in [0, π).
    ///
    /// Consumes one uniform draw for mode selection, then two for the
    /// Gaussian sample around the selected mode's mean.
    pub fn draw(&self, rng: &mut Xorshift64) -> f64 {
        let mode = self.modes[self.select(rng.next_f64())];
        wrap_orientation(rng.gaussian(mode.mean, mode.sigma))
    }
}

/// Reduces an angle into [0, π) with floor-modulo semantics.
///
/// Negative angles wrap upward (−10° becomes 170°). A result that rounds to
/// exactly π is folded to 0.
pub fn wrap_orientation(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(PI);
    if wrapped >= PI {
        0.0
    } else {
        wrapped
    }
}
