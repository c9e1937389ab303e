//! Hatching configuration: every tunable of a run, its defaults, JSON
//! overrides, schema, and up-front validation.

use engrave_core::error::EngraveError;
use engrave_core::mixture::AngleMixture;
use engrave_core::noise::FbmParams;
use engrave_core::params::{
    param_bool, param_color, param_enum, param_f64, param_opt_u64, param_triples, param_u32,
    param_usize,
};
use engrave_core::{LineCap, LineJoin, Srgb};
use serde_json::{json, Map, Value};

/// Default page width in page units.
pub const DEFAULT_WIDTH: f64 = 3000.0;
/// Default page height in page units.
pub const DEFAULT_HEIGHT: f64 = 1800.0;
/// Default orientation modes as `[mean_deg, sigma_deg, weight]`.
pub const DEFAULT_ANGLE_MODES: [[f64; 3]; 5] = [
    [45.0, 4.0, 4.0],
    [135.0, 4.0, 4.0],
    [0.0, 6.0, 1.3],
    [90.0, 6.0, 1.3],
    [60.0, 5.0, 1.5],
];
const DEFAULT_FAMILIES: usize = 7;
const DEFAULT_BASE_SPACING: f64 = 18.0;
const DEFAULT_LOG_SPACING_SIGMA: f64 = 0.25;
const DEFAULT_BASE_STROKE: f64 = 1.2;
const DEFAULT_ALPHA_MIN: f64 = 0.18;
const DEFAULT_ALPHA_MAX: f64 = 0.55;
const DEFAULT_GHOST_MIN: usize = 0;
const DEFAULT_GHOST_MAX: usize = 2;
const DEFAULT_GHOST_OFFSET: f64 = 2.2;
const DEFAULT_GHOST_WIDTH_SCALE: f64 = 0.75;
const DEFAULT_GHOST_ALPHA_SCALE: f64 = 0.55;
const DEFAULT_GHOST_MIN_WIDTH: f64 = 0.35;
const DEFAULT_LATERAL_JITTER: f64 = 1.6;
const DEFAULT_JITTER_FREQ: f64 = 120.0;
const DEFAULT_GAP_PROB: f64 = 0.10;
const DEFAULT_GRAIN_CELL: f64 = 520.0;
const DEFAULT_OCTAVES: u32 = 5;
const DEFAULT_LACUNARITY: f64 = 2.0;
const DEFAULT_GAIN: f64 = 0.5;
const DEFAULT_OCTAVE_STRIDE: u32 = 101;
const DEFAULT_STEP_LENGTH: f64 = 30.0;
const DEFAULT_SWEEP_OVERSHOOT: f64 = 1.3;
const DEFAULT_BOUNDS_PADDING: f64 = 80.0;
const DEFAULT_OVERSCAN_LINES: usize = 80;
const DEFAULT_OVERSCAN_OFFSET: f64 = 200.0;

/// All parameters of a hatching run.
///
/// [`Default`] reproduces the classic meteorite-etching look on a
/// 3000x1800 page. `seed: None` means the caller picks a fresh seed.
#[derive(Debug, Clone, PartialEq)]
pub struct HatchConfig {
    pub width: f64,
    pub height: f64,
    pub seed: Option<u64>,
    /// Orientation mixture as `[mean_deg, sigma_deg, weight]` triples.
    pub angle_modes: Vec<[f64; 3]>,
    /// Number of stroke families (sweep directions).
    pub families: usize,
    pub base_spacing: f64,
    /// Sigma of the log-normal multiplier applied to each line advance.
    pub log_spacing_sigma: f64,
    pub base_stroke: f64,
    pub alpha_min: f64,
    pub alpha_max: f64,
    pub ghost_min: usize,
    pub ghost_max: usize,
    pub ghost_offset: f64,
    pub ghost_width_scale: f64,
    pub ghost_alpha_scale: f64,
    pub ghost_min_width: f64,
    /// Draw ghosts for the run flushed at the end of a line, not just for
    /// runs closed by a break.
    pub ghost_trailing_runs: bool,
    pub lateral_jitter: f64,
    /// Period of the wiggle term along the sweep, in page units.
    pub jitter_freq: f64,
    pub gap_prob: f64,
    /// Lattice spacing of the first grain octave.
    pub grain_cell: f64,
    pub octaves: u32,
    pub lacunarity: f64,
    pub gain: f64,
    pub octave_stride: u32,
    /// Parametric distance between sampled points along a line.
    pub step_length: f64,
    /// Half-length of each swept segment as a multiple of the page diagonal.
    pub sweep_overshoot: f64,
    /// How far outside the page a point may sit and still be drawn.
    pub bounds_padding: f64,
    /// Extra lines per family beyond those needed to span the page.
    pub overscan_lines: usize,
    /// Distance before `-span/2` at which the first line starts.
    pub overscan_offset: f64,
    pub ink: Srgb,
    pub paper: Srgb,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

impl Default for HatchConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            angle_modes: DEFAULT_ANGLE_MODES.to_vec(),
            families: DEFAULT_FAMILIES,
            base_spacing: DEFAULT_BASE_SPACING,
            log_spacing_sigma: DEFAULT_LOG_SPACING_SIGMA,
            base_stroke: DEFAULT_BASE_STROKE,
            alpha_min: DEFAULT_ALPHA_MIN,
            alpha_max: DEFAULT_ALPHA_MAX,
            ghost_min: DEFAULT_GHOST_MIN,
            ghost_max: DEFAULT_GHOST_MAX,
            ghost_offset: DEFAULT_GHOST_OFFSET,
            ghost_width_scale: DEFAULT_GHOST_WIDTH_SCALE,
            ghost_alpha_scale: DEFAULT_GHOST_ALPHA_SCALE,
            ghost_min_width: DEFAULT_GHOST_MIN_WIDTH,
            ghost_trailing_runs: true,
            lateral_jitter: DEFAULT_LATERAL_JITTER,
            jitter_freq: DEFAULT_JITTER_FREQ,
            gap_prob: DEFAULT_GAP_PROB,
            grain_cell: DEFAULT_GRAIN_CELL,
            octaves: DEFAULT_OCTAVES,
            lacunarity: DEFAULT_LACUNARITY,
            gain: DEFAULT_GAIN,
            octave_stride: DEFAULT_OCTAVE_STRIDE,
            step_length: DEFAULT_STEP_LENGTH,
            sweep_overshoot: DEFAULT_SWEEP_OVERSHOOT,
            bounds_padding: DEFAULT_BOUNDS_PADDING,
            overscan_lines: DEFAULT_OVERSCAN_LINES,
            overscan_offset: DEFAULT_OVERSCAN_OFFSET,
            ink: Srgb::INK,
            paper: Srgb::PAPER,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
        }
    }
}

impl HatchConfig {
    /// Reads overrides from a JSON object.
    ///
    /// Missing keys keep their defaults. A key that is present with the wrong
    /// type is an [`EngraveError::InvalidConfig`] naming it. Ranges are left
    /// to [`HatchConfig::validate`].
    pub fn from_json(params: &Value) -> Result<Self, EngraveError> {
        let d = Self::default();
        Ok(Self {
            width: param_f64(params, "width", d.width)?,
            height: param_f64(params, "height", d.height)?,
            seed: param_opt_u64(params, "seed", d.seed)?,
            angle_modes: param_triples(params, "angle_modes", &d.angle_modes)?,
            families: param_usize(params, "families", d.families)?,
            base_spacing: param_f64(params, "base_spacing", d.base_spacing)?,
            log_spacing_sigma: param_f64(params, "log_spacing_sigma", d.log_spacing_sigma)?,
            base_stroke: param_f64(params, "base_stroke", d.base_stroke)?,
            alpha_min: param_f64(params, "alpha_min", d.alpha_min)?,
            alpha_max: param_f64(params, "alpha_max", d.alpha_max)?,
            ghost_min: param_usize(params, "ghost_min", d.ghost_min)?,
            ghost_max: param_usize(params, "ghost_max", d.ghost_max)?,
            ghost_offset: param_f64(params, "ghost_offset", d.ghost_offset)?,
            ghost_width_scale: param_f64(params, "ghost_width_scale", d.ghost_width_scale)?,
            ghost_alpha_scale: param_f64(params, "ghost_alpha_scale", d.ghost_alpha_scale)?,
            ghost_min_width: param_f64(params, "ghost_min_width", d.ghost_min_width)?,
            ghost_trailing_runs: param_bool(params, "ghost_trailing_runs", d.ghost_trailing_runs)?,
            lateral_jitter: param_f64(params, "lateral_jitter", d.lateral_jitter)?,
            jitter_freq: param_f64(params, "jitter_freq", d.jitter_freq)?,
            gap_prob: param_f64(params, "gap_prob", d.gap_prob)?,
            grain_cell: param_f64(params, "grain_cell", d.grain_cell)?,
            octaves: param_u32(params, "octaves", d.octaves)?,
            lacunarity: param_f64(params, "lacunarity", d.lacunarity)?,
            gain: param_f64(params, "gain", d.gain)?,
            octave_stride: param_u32(params, "octave_stride", d.octave_stride)?,
            step_length: param_f64(params, "step_length", d.step_length)?,
            sweep_overshoot: param_f64(params, "sweep_overshoot", d.sweep_overshoot)?,
            bounds_padding: param_f64(params, "bounds_padding", d.bounds_padding)?,
            overscan_lines: param_usize(params, "overscan_lines", d.overscan_lines)?,
            overscan_offset: param_f64(params, "overscan_offset", d.overscan_offset)?,
            ink: param_color(params, "ink", d.ink)?,
            paper: param_color(params, "paper", d.paper)?,
            line_cap: param_enum(params, "line_cap", d.line_cap)?,
            line_join: param_enum(params, "line_join", d.line_join)?,
        })
    }

    /// Current values as a JSON object accepted by [`HatchConfig::from_json`].
    pub fn to_json(&self) -> Value {
        json!({
            "width": self.width,
            "height": self.height,
            "seed": self.seed,
            "angle_modes": self.angle_modes,
            "families": self.families,
            "base_spacing": self.base_spacing,
            "log_spacing_sigma": self.log_spacing_sigma,
            "base_stroke": self.base_stroke,
            "alpha_min": self.alpha_min,
            "alpha_max": self.alpha_max,
            "ghost_min": self.ghost_min,
            "ghost_max": self.ghost_max,
            "ghost_offset": self.ghost_offset,
            "ghost_width_scale": self.ghost_width_scale,
            "ghost_alpha_scale": self.ghost_alpha_scale,
            "ghost_min_width": self.ghost_min_width,
            "ghost_trailing_runs": self.ghost_trailing_runs,
            "lateral_jitter": self.lateral_jitter,
            "jitter_freq": self.jitter_freq,
            "gap_prob": self.gap_prob,
            "grain_cell": self.grain_cell,
            "octaves": self.octaves,
            "lacunarity": self.lacunarity,
            "gain": self.gain,
            "octave_stride": self.octave_stride,
            "step_length": self.step_length,
            "sweep_overshoot": self.sweep_overshoot,
            "bounds_padding": self.bounds_padding,
            "overscan_lines": self.overscan_lines,
            "overscan_offset": self.overscan_offset,
            "ink": self.ink,
            "paper": self.paper,
            "line_cap": self.line_cap,
            "line_join": self.line_join,
        })
    }

    /// The configured seed, or `fresh()` when none was given.
    pub fn resolve_seed(&self, fresh: impl FnOnce() -> u64) -> u64 {
        self.seed.unwrap_or_else(fresh)
    }

    /// Octave layout of the grain field.
    pub fn fbm_params(&self) -> FbmParams {
        FbmParams {
            base_cell: self.grain_cell,
            octaves: self.octaves,
            lacunarity: self.lacunarity,
            gain: self.gain,
            octave_stride: self.octave_stride,
        }
    }

    /// Builds the validated orientation mixture.
    pub fn mixture(&self) -> Result<AngleMixture, EngraveError> {
        AngleMixture::from_degrees(&self.angle_modes)
    }

    /// Every numeric parameter with its accepted range.
    ///
    /// Both [`HatchConfig::validate`] and [`HatchConfig::param_schema`] read
    /// their limits from here.
    fn bounded(&self) -> [Bounded; 27] {
        [
            number(
                "width",
                self.width,
                1.0,
                20000.0,
                "Page width in page units",
            ),
            number(
                "height",
                self.height,
                1.0,
                20000.0,
                "Page height in page units",
            ),
            integer(
                "families",
                self.families,
                0,
                64,
                "Number of stroke families",
            ),
            number(
                "base_spacing",
                self.base_spacing,
                1.0,
                200.0,
                "Mean distance between lines",
            ),
            number(
                "log_spacing_sigma",
                self.log_spacing_sigma,
                0.0,
                2.0,
                "Log-normal sigma of per-line spacing",
            ),
            number(
                "base_stroke",
                self.base_stroke,
                0.05,
                20.0,
                "Base stroke width",
            ),
            number(
                "alpha_min",
                self.alpha_min,
                0.0,
                1.0,
                "Opacity where the grain is lowest",
            ),
            number(
                "alpha_max",
                self.alpha_max,
                0.0,
                1.0,
                "Opacity where the grain is highest",
            ),
            integer(
                "ghost_min",
                self.ghost_min,
                0,
                16,
                "Minimum ghost copies per run",
            ),
            integer(
                "ghost_max",
                self.ghost_max,
                0,
                16,
                "Maximum ghost copies per run",
            ),
            number(
                "ghost_offset",
                self.ghost_offset,
                0.0,
                50.0,
                "Maximum ghost displacement along the normal",
            ),
            number(
                "ghost_width_scale",
                self.ghost_width_scale,
                0.0,
                2.0,
                "Ghost width relative to its run",
            ),
            number(
                "ghost_alpha_scale",
                self.ghost_alpha_scale,
                0.0,
                1.0,
                "Ghost opacity relative to its run",
            ),
            number(
                "ghost_min_width",
                self.ghost_min_width,
                0.0,
                10.0,
                "Lower bound on ghost width",
            ),
            number(
                "lateral_jitter",
                self.lateral_jitter,
                0.0,
                50.0,
                "Amplitude of lateral wiggle",
            ),
            number(
                "jitter_freq",
                self.jitter_freq,
                1.0,
                5000.0,
                "Wavelength of lateral wiggle",
            ),
            number(
                "gap_prob",
                self.gap_prob,
                0.0,
                1.0,
                "Base probability of a break at each step",
            ),
            number(
                "grain_cell",
                self.grain_cell,
                1.0,
                10000.0,
                "Lattice spacing of the grain noise",
            ),
            integer(
                "octaves",
                self.octaves as usize,
                1,
                12,
                "Grain noise octaves",
            ),
            number(
                "lacunarity",
                self.lacunarity,
                1.0,
                4.0,
                "Frequency multiplier per octave",
            ),
            number(
                "gain",
                self.gain,
                0.05,
                1.0,
                "Amplitude multiplier per octave",
            ),
            integer(
                "octave_stride",
                self.octave_stride as usize,
                0,
                100_000,
                "Seed increment per octave",
            ),
            number(
                "step_length",
                self.step_length,
                0.5,
                500.0,
                "Distance between sampled points",
            ),
            number(
                "sweep_overshoot",
                self.sweep_overshoot,
                0.5,
                4.0,
                "Line half-length in page diagonals",
            ),
            number(
                "bounds_padding",
                self.bounds_padding,
                0.0,
                1000.0,
                "Drawable margin outside the page",
            ),
            integer(
                "overscan_lines",
                self.overscan_lines,
                0,
                1000,
                "Extra lines per family",
            ),
            number(
                "overscan_offset",
                self.overscan_offset,
                0.0,
                5000.0,
                "Start distance before the page",
            ),
        ]
    }

    /// Checks every precondition of generation.
    ///
    /// Called once before the first stroke; generation itself never fails.
    /// Each numeric parameter must sit inside the range its schema entry
    /// declares.
    pub fn validate(&self) -> Result<(), EngraveError> {
        if !(positive(self.width) && positive(self.height)) {
            return Err(EngraveError::InvalidDimensions);
        }
        self.mixture()?;

        // NaN is outside every range.
        if let Some(p) = self
            .bounded()
            .iter()
            .find(|p| !(p.min..=p.max).contains(&p.value))
        {
            return Err(EngraveError::InvalidConfig(format!(
                "{} must be in [{}, {}], got {}",
                p.key, p.min, p.max, p.value
            )));
        }
        if self.alpha_min > self.alpha_max {
            return Err(EngraveError::InvalidConfig("alpha_min must be <= alpha_max".into()));
        }
        if self.ghost_min > self.ghost_max {
            return Err(EngraveError::InvalidConfig("ghost_min must be <= ghost_max".into()));
        }
        Ok(())
    }

    /// Schema describing each parameter's type, default, range, and meaning.
    pub fn param_schema() -> Value {
        let mut schema = Map::new();
        for p in Self::default().bounded() {
            schema.insert(p.key.to_string(), p.schema_entry());
        }
        let extra = json!({
            "seed": {
                "type": "integer",
                "default": null,
                "description": "Run seed; absent means a fresh seed is drawn"
            },
            "angle_modes": {
                "type": "array",
                "default": DEFAULT_ANGLE_MODES,
                "description": "Orientation mixture as [mean_deg, sigma_deg, weight] triples"
            },
            "ghost_trailing_runs": {
                "type": "boolean",
                "default": true,
                "description": "Also draw ghosts for the last run of each line"
            },
            "ink": { "type": "color", "default": Srgb::INK, "description": "Stroke color" },
            "paper": {
                "type": "color",
                "default": Srgb::PAPER,
                "description": "Page background color"
            },
            "line_cap": {
                "type": "string",
                "default": "round",
                "description": "butt, round, or square"
            },
            "line_join": {
                "type": "string",
                "default": "round",
                "description": "miter, round, or bevel"
            }
        });
        if let Value::Object(extra) = extra {
            schema.extend(extra);
        }
        Value::Object(schema)
    }
}

/// A numeric parameter, its current value, and its inclusive range.
struct Bounded {
    key: &'static str,
    value: f64,
    min: f64,
    max: f64,
    integer: bool,
    description: &'static str,
}

impl Bounded {
    fn schema_entry(&self) -> Value {
        if self.integer {
            json!({
                "type": "integer",
                "default": self.value as u64,
                "min": self.min as u64,
                "max": self.max as u64,
                "description": self.description,
            })
        } else {
            json!({
                "type": "number",
                "default": self.value,
                "min": self.min,
                "max": self.max,
                "description": self.description,
            })
        }
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn number(
    key: &'static str,
    value: f64,
    min: f64,
    max: f64,
    description: &'static str,
) -> Bounded {
    Bounded {
        key,
        value,
        min,
        max,
        integer: false,
        description,
    }
}

fn integer(
    key: &'static str,
    value: usize,
    min: usize,
    max: usize,
    description: &'static str,
) -> Bounded {
    Bounded {
        key,
        value: value as f64,
        min: min as f64,
        max: max as f64,
        integer: true,
        description,
    }
}
