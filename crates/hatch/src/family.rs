//! Geometry of one stroke family: sweep direction, line count, and the
//! parametric sampling of each swept line.

use crate::config::HatchConfig;
use engrave_core::mixture::AngleMixture;
use engrave_core::prng::Xorshift64;
use glam::DVec2;

/// Range of the per-family spacing multiplier.
pub const SPACING_JITTER: (f64, f64) = (0.75, 1.45);

/// Sweep layout of one family, fixed once its angle and spacing are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FamilyPlan {
    /// Orientation in [0, π).
    pub theta: f64,
    /// Unit vector along the lines.
    pub direction: DVec2,
    /// Unit vector across the lines, `(-dy, dx)`.
    pub normal: DVec2,
    /// Mean distance between neighbouring lines.
    pub spacing: f64,
    /// Page extent projected onto the normal.
    pub span: f64,
    pub line_count: usize,
    /// Lateral offset before the first line's advance.
    pub start_offset: f64,
    pub center: DVec2,
    /// Half-length of each swept segment.
    pub half_length: f64,
    /// Number of parametric steps; the walk visits `n_steps + 1` positions.
    pub n_steps: usize,
}

impl FamilyPlan {
    pub fn new(theta: f64, spacing: f64, cfg: &HatchConfig) -> Self {
        let direction = DVec2::new(theta.cos(), theta.sin());
        let normal = direction.perp();
        let span = normal.x.abs() * cfg.width + normal.y.abs() * cfg.height;
        let half_length = cfg.width.hypot(cfg.height) * cfg.sweep_overshoot;
        let n_steps = ((2.0 * half_length / cfg.step_length) as usize).max(1);
        Self {
            theta,
            direction,
            normal,
            spacing,
            span,
            line_count: ((span / spacing) as usize).saturating_add(cfg.overscan_lines),
            start_offset: -span / 2.0 - cfg.overscan_offset,
            center: DVec2::new(cfg.width / 2.0, cfg.height / 2.0),
            half_length,
            n_steps,
        }
    }

    /// Parametric position of step `s`, running from `-half_length` at 0 to
    /// `+half_length` at `n_steps`.
    pub fn step_t(&self, s: usize) -> f64 {
        let t0 = -self.half_length;
        let t1 = self.half_length;
        t0 + (t1 - t0) * (s as f64 / self.n_steps as f64)
    }

    /// Point where a line at lateral `offset` crosses the family's center line.
    pub fn base_point(&self, offset: f64) -> DVec2 {
        self.center + offset * self.normal
    }
}

/// Draws a family's orientation and spacing, in that order, and lays it out.
pub fn draw_family(mixture: &AngleMixture, cfg: &HatchConfig, rng: &mut Xorshift64) -> FamilyPlan {
    let theta = mixture.draw(rng);
    let spacing = cfg.base_spacing * rng.next_range(SPACING_JITTER.0, SPACING_JITTER.1);
    FamilyPlan::new(theta, spacing, cfg)
}

/// Inclusive test against the page expanded by `pad` on every side.
pub fn in_bounds(p: DVec2, width: f64, height: f64, pad: f64) -> bool {
    (-pad..=width + pad).contains(&p.x) && (-pad..=height + pad).contains(&p.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn page(width: f64, height: f64) -> HatchConfig {
        HatchConfig {
            width,
            height,
            ..HatchConfig::default()
        }
    }

    #[test]
    fn horizontal_family_spans_page_height() {
        let plan = FamilyPlan::new(0.0, 10.0, &page(300.0, 200.0));
        assert!((plan.direction - DVec2::X).length() < 1e-12);
        assert!((plan.normal - DVec2::Y).length() < 1e-12);
        assert!((plan.span - 200.0).abs() < 1e-9);
        assert_eq!(plan.line_count, 20 + 80);
        assert!((plan.start_offset - (-100.0 - 200.0)).abs() < 1e-9);
    }

    #[test]
    fn vertical_family_spans_page_width() {
        let plan = FamilyPlan::new(FRAC_PI_2, 10.0, &page(300.0, 200.0));
        assert!((plan.span - 300.0).abs() < 1e-9);
        assert_eq!(plan.line_count, 30 + 80);
    }

    #[test]
    fn normal_is_unit_and_perpendicular() {
        for deg in [0.0_f64, 17.0, 45.0, 91.0, 179.0] {
            let plan = FamilyPlan::new(deg.to_radians(), 5.0, &page(100.0, 100.0));
            assert!((plan.normal.length() - 1.0).abs() < 1e-12);
            assert!(plan.normal.dot(plan.direction).abs() < 1e-12);
            assert!((plan.normal.x + plan.direction.y).abs() < 1e-12);
        }
    }

    #[test]
    fn sweep_overshoots_page_diagonal() {
        let cfg = page(100.0, 100.0);
        let plan = FamilyPlan::new(0.3, 5.0, &cfg);
        let diag = 100f64.hypot(100.0);
        assert!((plan.half_length - 1.3 * diag).abs() < 1e-9);
        assert!((plan.step_t(0) + plan.half_length).abs() < 1e-9);
        assert!((plan.step_t(plan.n_steps) - plan.half_length).abs() < 1e-9);
        assert_eq!(plan.n_steps, (2.0 * 1.3 * diag / 30.0) as usize);
    }

    #[test]
    fn tiny_page_still_has_one_step() {
        let cfg = HatchConfig {
            width: 1.0,
            height: 1.0,
            step_length: 500.0,
            ..HatchConfig::default()
        };
        let plan = FamilyPlan::new(0.0, 1.0, &cfg);
        assert_eq!(plan.n_steps, 1);
        assert!(plan.step_t(1).is_finite());
    }

    #[test]
    fn line_count_saturates_on_huge_overscan() {
        let cfg = HatchConfig {
            overscan_lines: usize::MAX,
            ..page(100.0, 60.0)
        };
        let plan = FamilyPlan::new(0.0, 10.0, &cfg);
        assert_eq!(plan.line_count, usize::MAX);
    }

    #[test]
    fn base_point_moves_along_normal() {
        let plan = FamilyPlan::new(0.0, 10.0, &page(100.0, 60.0));
        let p = plan.base_point(5.0);
        assert!((p - DVec2::new(50.0, 35.0)).length() < 1e-12);
    }

    #[test]
    fn draw_family_consumes_angle_then_spacing() {
        let cfg = HatchConfig::default();
        let mixture = cfg.mixture().unwrap();
        let mut a = Xorshift64::new(42);
        let plan = draw_family(&mixture, &cfg, &mut a);

        let mut b = Xorshift64::new(42);
        let theta = mixture.draw(&mut b);
        let factor = b.next_range(0.75, 1.45);
        assert_eq!(plan.theta.to_bits(), theta.to_bits());
        assert_eq!(plan.spacing.to_bits(), (cfg.base_spacing * factor).to_bits());
        assert!(plan.spacing >= 18.0 * 0.75 && plan.spacing < 18.0 * 1.45);
    }

    #[test]
    fn in_bounds_is_inclusive_of_padding() {
        assert!(in_bounds(DVec2::new(-80.0, 0.0), 100.0, 100.0, 80.0));
        assert!(in_bounds(DVec2::new(180.0, 180.0), 100.0, 100.0, 80.0));
        assert!(!in_bounds(DVec2::new(180.001, 50.0), 100.0, 100.0, 80.0));
        assert!(!in_bounds(DVec2::new(50.0, -80.5), 100.0, 100.0, 80.0));
        assert!(!in_bounds(DVec2::new(f64::NAN, 50.0), 100.0, 100.0, 80.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn plan_covers_page_for_any_orientation(
                theta in 0.0_f64..std::f64::consts::PI,
                spacing in 3.0_f64..100.0,
                w in 10.0_f64..5000.0,
                h in 10.0_f64..5000.0,
            ) {
                let plan = FamilyPlan::new(theta, spacing, &page(w, h));
                prop_assert!(plan.span > 0.0 && plan.span <= w + h + 1e-9);
                prop_assert!(plan.n_steps >= 1);
                // The last line sits past the far edge of the page.
                let reach = plan.start_offset + plan.line_count as f64 * spacing;
                prop_assert!(reach >= plan.span / 2.0);
                prop_assert!(plan.half_length > w.hypot(h) / 2.0);
            }
        }
    }
}
