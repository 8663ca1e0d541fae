use serde::{Deserialize, Serialize};

use crate::algorithms::edges::{EdgeParams, EdgeProfile};
use crate::algorithms::tabs::TabParams;
use crate::geometry::limits;
use crate::geometry::tolerance::FILL_REACH_PCT;
use crate::model::{Bounds, Vec2};

pub const DEFAULT_SEED_VALUE: u64 = 12345;

/// Why a parameter record was rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamError {
    NonFinite(&'static str),
    OutOfRange { param: &'static str, min: f64, max: f64, got: f64 },
    InvalidJson(String),
}

impl ParamError {
    fn range(param: &'static str, min: f64, max: f64, got: f64) -> ParamError {
        ParamError::OutOfRange { param, min, max, got }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ParamError::NonFinite(_) => "non_finite",
            ParamError::OutOfRange { .. } => "out_of_range",
            ParamError::InvalidJson(_) => "invalid_json",
        }
    }
}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::NonFinite(p) => write!(f, "parameter '{}' must be finite", p),
            ParamError::OutOfRange { param, .. } => write!(f, "parameter '{}' out of range", param),
            ParamError::InvalidJson(msg) => write!(f, "invalid parameter document: {}", msg),
        }
    }
}

impl std::error::Error for ParamError {}

/// Parameter record handed over by the control surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleParams {
    pub grid_width: u32,
    pub grid_height: u32,
    pub cell_size: f64,
    pub stroke_width: f64,
    pub corner_radius: f64,
    /// Focal point in mm; `None` means horizontal center, 75% down.
    pub origin: Option<Vec2>,
    pub seed: u64,
    pub angle_count: i64,
    pub ring_count: i64,
    pub growth_factor: f64,
    pub min_radius_pct: f64,
    pub max_radius_pct: f64,
    /// Fraction of the shorter canvas side.
    pub jitter_radius: f64,
    /// Radians.
    pub jitter_angle: f64,
    pub bias_scalar: f64,
    pub edge_segments: i64,
    pub noise_enabled: bool,
    pub edge_amplitude: f64,
    pub edge_frequency: f64,
    pub edge_profile: EdgeProfile,
    pub tab: TabParams,
    pub highlight_tabs: bool,
    pub merge_center: bool,
}

impl Default for PuzzleParams {
    fn default() -> Self {
        PuzzleParams {
            grid_width: 24,
            grid_height: 12,
            cell_size: 10.0,
            stroke_width: 0.2,
            corner_radius: 1.5,
            origin: None,
            seed: DEFAULT_SEED_VALUE,
            angle_count: 18,
            ring_count: 8,
            growth_factor: 1.25,
            min_radius_pct: 0.095,
            max_radius_pct: FILL_REACH_PCT,
            jitter_radius: 0.06,
            jitter_angle: std::f64::consts::PI / 16.0,
            bias_scalar: 1.4,
            edge_segments: 8,
            noise_enabled: false,
            edge_amplitude: 3.0,
            edge_frequency: 0.05,
            edge_profile: EdgeProfile::Wave,
            tab: TabParams::default(),
            highlight_tabs: false,
            merge_center: true,
        }
    }
}

impl PuzzleParams {
    pub fn bounds(&self) -> Bounds {
        Bounds {
            width: self.grid_width as f64 * self.cell_size,
            height: self.grid_height as f64 * self.cell_size,
        }
    }

    pub fn origin(&self) -> Vec2 {
        match self.origin {
            Some(o) => o,
            None => {
                let b = self.bounds();
                Vec2 { x: b.width / 2.0, y: b.height * 0.75 }
            }
        }
    }

    pub fn min_radius(&self) -> f64 {
        self.bounds().min_side() * self.min_radius_pct
    }

    pub fn max_radius(&self) -> f64 {
        self.bounds().min_side() * self.max_radius_pct
    }

    pub fn jitter_radius_mm(&self) -> f64 {
        self.jitter_radius * self.bounds().min_side()
    }

    /// Seed value used by hashing and the fill LCG; 0 falls back to the default.
    pub fn seed_value(&self) -> u64 {
        if self.seed == 0 { DEFAULT_SEED_VALUE } else { self.seed }
    }

    pub fn edge_params(&self) -> EdgeParams {
        EdgeParams {
            segments: self.edge_segments,
            amplitude: if self.noise_enabled { self.edge_amplitude } else { 0.0 },
            frequency: self.edge_frequency,
            profile: self.edge_profile,
        }
    }

    /// First parameter that is non-finite or outside `limits`, if any.
    pub fn check(&self) -> Result<(), ParamError> {
        let numbers = [
            ("cell_size", self.cell_size),
            ("stroke_width", self.stroke_width),
            ("corner_radius", self.corner_radius),
            ("growth_factor", self.growth_factor),
            ("min_radius_pct", self.min_radius_pct),
            ("max_radius_pct", self.max_radius_pct),
            ("jitter_radius", self.jitter_radius),
            ("jitter_angle", self.jitter_angle),
            ("bias_scalar", self.bias_scalar),
            ("edge_amplitude", self.edge_amplitude),
            ("edge_frequency", self.edge_frequency),
            ("tab.min_size", self.tab.min_size),
            ("tab.relative_width", self.tab.relative_width),
            ("tab.relative_height", self.tab.relative_height),
            ("tab.angle_degrees", self.tab.angle_degrees),
            ("tab.position_jitter", self.tab.position_jitter),
        ];
        for (name, v) in numbers {
            if !v.is_finite() {
                return Err(ParamError::NonFinite(name));
            }
            if !limits::in_coord_bounds(v) {
                return Err(ParamError::range(name, limits::COORD_MIN, limits::COORD_MAX, v));
            }
        }
        if let Some(o) = self.origin {
            for (name, v) in [("origin.x", o.x), ("origin.y", o.y)] {
                if !v.is_finite() {
                    return Err(ParamError::NonFinite(name));
                }
                if !limits::in_coord_bounds(v) {
                    return Err(ParamError::range(name, limits::COORD_MIN, limits::COORD_MAX, v));
                }
            }
        }
        if !limits::in_cell_size_bounds(self.cell_size) {
            return Err(ParamError::range("cell_size", 0.0, limits::CELL_SIZE_MAX, self.cell_size));
        }
        let counts = [
            ("grid_width", self.grid_width as i64, limits::MAX_GRID_CELLS),
            ("grid_height", self.grid_height as i64, limits::MAX_GRID_CELLS),
            ("angle_count", self.angle_count, limits::MAX_ANGLES),
            ("ring_count", self.ring_count, limits::MAX_RINGS),
            ("edge_segments", self.edge_segments, limits::MAX_EDGE_SEGMENTS),
        ];
        for (name, n, max) in counts {
            // non-positive counts are legal and yield an empty stage
            if n > max {
                return Err(ParamError::range(name, 0.0, max as f64, n as f64));
            }
        }
        if self.growth_factor.abs() > limits::GROWTH_MAX {
            return Err(ParamError::range("growth_factor", -limits::GROWTH_MAX, limits::GROWTH_MAX, self.growth_factor));
        }
        if self.tab.angle_degrees.abs() > limits::TAB_ANGLE_MAX_DEG {
            return Err(ParamError::range(
                "tab.angle_degrees",
                -limits::TAB_ANGLE_MAX_DEG,
                limits::TAB_ANGLE_MAX_DEG,
                self.tab.angle_degrees,
            ));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    /// Copy with counts clamped to `limits` and non-finite numbers replaced by defaults.
    /// The pipeline runs on this so hostile input cannot exceed the cost bound.
    pub fn sanitized(&self) -> PuzzleParams {
        let d = PuzzleParams::default();
        let fin = |v: f64, fallback: f64| if limits::in_coord_bounds(v) { v } else { fallback };
        let mut p = self.clone();
        p.grid_width = p.grid_width.min(limits::MAX_GRID_CELLS as u32);
        p.grid_height = p.grid_height.min(limits::MAX_GRID_CELLS as u32);
        p.cell_size = if limits::in_cell_size_bounds(p.cell_size) { p.cell_size } else { d.cell_size };
        p.stroke_width = fin(p.stroke_width, d.stroke_width);
        p.corner_radius = fin(p.corner_radius, d.corner_radius);
        p.origin = p.origin.filter(|o| limits::in_coord_bounds(o.x) && limits::in_coord_bounds(o.y));
        p.angle_count = p.angle_count.min(limits::MAX_ANGLES);
        p.ring_count = p.ring_count.min(limits::MAX_RINGS);
        p.edge_segments = p.edge_segments.min(limits::MAX_EDGE_SEGMENTS);
        p.growth_factor = fin(p.growth_factor, d.growth_factor)
            .clamp(-limits::GROWTH_MAX, limits::GROWTH_MAX);
        p.min_radius_pct = fin(p.min_radius_pct, d.min_radius_pct);
        p.max_radius_pct = fin(p.max_radius_pct, d.max_radius_pct);
        p.jitter_radius = fin(p.jitter_radius, d.jitter_radius);
        p.jitter_angle = fin(p.jitter_angle, d.jitter_angle);
        p.bias_scalar = fin(p.bias_scalar, d.bias_scalar);
        p.edge_amplitude = fin(p.edge_amplitude, d.edge_amplitude);
        p.edge_frequency = fin(p.edge_frequency, d.edge_frequency);
        p.tab.min_size = fin(p.tab.min_size, d.tab.min_size);
        p.tab.relative_width = fin(p.tab.relative_width, d.tab.relative_width);
        p.tab.relative_height = fin(p.tab.relative_height, d.tab.relative_height);
        p.tab.angle_degrees = fin(p.tab.angle_degrees, d.tab.angle_degrees)
            .clamp(-limits::TAB_ANGLE_MAX_DEG, limits::TAB_ANGLE_MAX_DEG);
        p.tab.position_jitter = fin(p.tab.position_jitter, d.tab.position_jitter);
        p
    }

    /// Parses and validates a JSON parameter document; missing fields take defaults.
    pub fn from_json_str(s: &str) -> Option<PuzzleParams> {
        PuzzleParams::from_json_str_strict(s).ok()
    }

    pub fn from_json_value(v: serde_json::Value) -> Option<PuzzleParams> {
        PuzzleParams::from_json_value_strict(v).ok()
    }

    pub fn from_json_str_strict(s: &str) -> Result<PuzzleParams, ParamError> {
        let p: PuzzleParams = serde_json::from_str(s).map_err(|e| ParamError::InvalidJson(e.to_string()))?;
        p.check()?;
        Ok(p)
    }

    pub fn from_json_value_strict(v: serde_json::Value) -> Result<PuzzleParams, ParamError> {
        let p: PuzzleParams = serde_json::from_value(v).map_err(|e| ParamError::InvalidJson(e.to_string()))?;
        p.check()?;
        Ok(p)
    }

    /// Suggested export file name.
    pub fn file_name(&self) -> String {
        format!("puzzle_cristal_{}x{}.svg", self.grid_width, self.grid_height)
    }
}
