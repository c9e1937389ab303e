//! The stroke family sweep.
//!
//! [`Hatcher`] is a lazy iterator of [`StrokeCommand`]s. It owns the run's
//! single random stream and walks families, then lines, then steps, drawing
//! random numbers in one fixed order:
//!
//! 1. per family: orientation (mixture pick + Gaussian), spacing jitter
//! 2. per line: log-normal spacing advance
//! 3. per step: gap test
//! 4. per flushed run: width jitter, ghost count, one offset per ghost
//!
//! Commands are produced a line at a time; dropping the iterator early simply
//! stops generation.

use crate::config::HatchConfig;
use crate::family::{draw_family, in_bounds, FamilyPlan};
use crate::run::{Run, RunBuilder};
use crate::style::{ghost_count, ghost_offset, ghost_style, primary_style};
use engrave_core::error::EngraveError;
use engrave_core::mixture::AngleMixture;
use engrave_core::noise::{GrainField, ScalarField};
use engrave_core::prng::Xorshift64;
use engrave_core::{StrokeCommand, StrokeKind};
use glam::DVec2;
use std::collections::VecDeque;
use std::f64::consts::TAU;

/// Weight of the periodic wiggle in the lateral jitter.
const WIGGLE_WEIGHT: f64 = 0.6;
/// Weight of the grain bias `(g - 0.5)` in the lateral jitter.
const BIAS_WEIGHT: f64 = 0.8;
/// Phase shift of the wiggle per unit of grain.
const WIGGLE_PHASE: f64 = 1000.0;

/// Lateral displacement along the normal at parametric position `t` where the
/// grain is `g`.
pub fn lateral_jitter(t: f64, g: f64, cfg: &HatchConfig) -> f64 {
    let wiggle = ((t + WIGGLE_PHASE * g) / cfg.jitter_freq * TAU).sin();
    (wiggle * WIGGLE_WEIGHT + (g - 0.5) * BIAS_WEIGHT) * cfg.lateral_jitter
}

/// Probability that a step breaks the current run.
///
/// Rises with the grain as `gap_prob * (0.6 + 0.8 g)`. A `gap_prob` of
/// exactly 1 departs from that formula and breaks every step regardless of
/// the grain, so the threshold jumps from at most `0.6 + 0.8 g` just below 1
/// to 1.
pub fn gap_threshold(gap_prob: f64, g: f64) -> f64 {
    if gap_prob >= 1.0 {
        1.0
    } else {
        gap_prob * (0.6 + 0.8 * g)
    }
}

struct FamilyCursor {
    index: usize,
    plan: FamilyPlan,
    next_line: usize,
    offset: f64,
}

/// Lazy generator of hatching strokes for one seed and configuration.
pub struct Hatcher {
    cfg: HatchConfig,
    seed: u64,
    mixture: AngleMixture,
    field: GrainField,
    rng: Xorshift64,
    next_family: usize,
    family: Option<FamilyCursor>,
    pending: VecDeque<StrokeCommand>,
}

impl Hatcher {
    /// Validates `cfg` and prepares a sweep seeded with `seed`.
    ///
    /// `cfg.seed` is ignored here; resolve it with
    /// [`HatchConfig::resolve_seed`] first.
    pub fn new(cfg: HatchConfig, seed: u64) -> Result<Self, EngraveError> {
        cfg.validate()?;
        let mixture = cfg.mixture()?;
        let field = GrainField::new(seed, cfg.fbm_params());
        Ok(Self {
            cfg,
            seed,
            mixture,
            field,
            rng: Xorshift64::new(seed),
            next_family: 0,
            family: None,
            pending: VecDeque::new(),
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &HatchConfig {
        &self.cfg
    }

    /// The grain field that modulates jitter, gaps, width, and alpha.
    pub fn field(&self) -> &GrainField {
        &self.field
    }

    /// Index of the family currently being swept, if any.
    pub fn current_family(&self) -> Option<(usize, &FamilyPlan)> {
        self.family.as_ref().map(|c| (c.index, &c.plan))
    }

    /// Sweeps the next line, starting new families as needed.
    /// Returns `false` once every family is exhausted.
    fn advance(&mut self) -> bool {
        loop {
            if let Some(cursor) = self.family.as_mut() {
                if cursor.next_line < cursor.plan.line_count {
                    let factor = self.rng.gaussian(0.0, self.cfg.log_spacing_sigma).exp();
                    cursor.offset += cursor.plan.spacing * factor;
                    let line = LineSweep {
                        cfg: &self.cfg,
                        field: &self.field,
                        plan: &cursor.plan,
                        family: cursor.index,
                        line: cursor.next_line,
                    };
                    cursor.next_line += 1;
                    line.sweep(cursor.offset, &mut self.rng, &mut self.pending);
                    return true;
                }
                self.family = None;
            }
            if self.next_family >= self.cfg.families {
                return false;
            }
            let plan = draw_family(&self.mixture, &self.cfg, &mut self.rng);
            self.family = Some(FamilyCursor {
                index: self.next_family,
                plan,
                next_line: 0,
                offset: plan.start_offset,
            });
            self.next_family += 1;
        }
    }
}

impl Iterator for Hatcher {
    type Item = StrokeCommand;

    fn next(&mut self) -> Option<StrokeCommand> {
        loop {
            if let Some(cmd) = self.pending.pop_front() {
                return Some(cmd);
            }
            if !self.advance() {
                return None;
            }
        }
    }
}

/// Everything fixed while one line is walked.
struct LineSweep<'a> {
    cfg: &'a HatchConfig,
    field: &'a GrainField,
    plan: &'a FamilyPlan,
    family: usize,
    line: usize,
}

impl LineSweep<'_> {
    /// Walks `n_steps + 1` positions of the line at lateral `offset` and
    /// emits every run it produces.
    fn sweep(&self, offset: f64, rng: &mut Xorshift64, out: &mut VecDeque<StrokeCommand>) {
        let cfg = self.cfg;
        let plan = self.plan;
        let base = plan.base_point(offset);
        let mut builder = RunBuilder::new();

        for s in 0..=plan.n_steps {
            let t = plan.step_t(s);
            let p = base + t * plan.direction;
            let g = self.field.sample_at(p);
            let displaced = p + lateral_jitter(t, g, cfg) * plan.normal;

            let gap = rng.next_f64() < gap_threshold(cfg.gap_prob, g);
            if gap || !in_bounds(displaced, cfg.width, cfg.height, cfg.bounds_padding) {
                if let Some(run) = builder.split() {
                    self.flush(run, true, rng, out);
                }
            } else {
                builder.push(displaced);
            }
        }

        if let Some(run) = builder.finish() {
            self.flush(run, cfg.ghost_trailing_runs, rng, out);
        }
    }

    /// Emits a run followed by its ghosts.
    fn flush(
        &self,
        run: Run,
        with_ghosts: bool,
        rng: &mut Xorshift64,
        out: &mut VecDeque<StrokeCommand>,
    ) {
        let gmid = self.field.sample_at(run.midpoint());
        let style = primary_style(self.cfg, gmid, rng);

        let ghosts = if with_ghosts { ghost_count(self.cfg, rng) } else { 0 };
        let ghost_look = ghost_style(self.cfg, &style);
        let copies: Vec<StrokeCommand> = (0..ghosts)
            .map(|_| {
                let off = ghost_offset(self.cfg, gmid, rng);
                StrokeCommand {
                    points: run.translated(off * self.plan.normal),
                    style: ghost_look,
                    kind: StrokeKind::Ghost,
                    family: self.family,
                    line: self.line,
                    normal_offset: off,
                }
            })
            .collect();

        out.push_back(StrokeCommand {
            points: run.into_points(),
            style,
            kind: StrokeKind::Primary,
            family: self.family,
            line: self.line,
            normal_offset: 0.0,
        });
        out.extend(copies);
    }
}

/// Generates every stroke of a run eagerly.
pub fn generate(cfg: &HatchConfig, seed: u64) -> Result<Vec<StrokeCommand>, EngraveError> {
    Ok(Hatcher::new(cfg.clone(), seed)?.collect())
}
