// Centralized tolerances and helpers for robust geometry (units: mm)

pub const EPS_POS: f64 = 1e-6;            // frame-side / point coincidence threshold
pub const EPS_LEN: f64 = 1e-9;            // zero-length vector threshold
pub const EPS_DENOM: f64 = 1e-12;         // denominator guard for line/plane solves
pub const EPS_CELL_AREA: f64 = 1e-6;      // ~zero area cells are dropped (mm^2)
pub const EPS_RING: f64 = 1e-6;           // last ring must match max radius within this

// Vertex normalization grid: 6 decimals
pub const QUANT_SCALE: f64 = 1e6;
pub const EPS_WELD: f64 = 4e-6;           // clipped vertices closer than this are one vertex

// Outer-fill and splitting heuristics
pub const FILL_REACH_PCT: f64 = 0.48;     // fill until this fraction of the shorter side
pub const FILL_RING_STEP: f64 = 6.0;      // mm per synthetic ring
pub const FILL_MIN_RINGS: usize = 4;
pub const FILL_ANGLE_DENSITY: usize = 6;
pub const FILL_ANGLE_SPREAD: f64 = 0.1;   // radians, scaled by the LCG sample
pub const MAX_PIECE_AREA_PCT: f64 = 0.12;

// Tabs
pub const TAB_MAX_ABS_HEIGHT: f64 = 6.0;
pub const TAB_OFFSET_SCALE: f64 = 0.2;
pub const TAB_Z_HEIGHT: f64 = 0.8;
pub const TAB_VISUAL_SCALE: f64 = 0.6;

#[inline] pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 { x.max(lo).min(hi) }
#[inline] pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool { (a - b).abs() <= eps }

/// Round to the vertex normalization grid.
#[inline]
pub fn quantize(x: f64) -> f64 {
    let q = (x * QUANT_SCALE).round() / QUANT_SCALE;
    // avoid emitting "-0"
    if q == 0.0 { 0.0 } else { q }
}

#[inline]
pub fn quant_key(x: f64) -> i64 { (x * QUANT_SCALE).round() as i64 }

#[inline]
pub fn norm2(mut x: f64, mut y: f64) -> ((f64, f64), f64) {
    let len = (x * x + y * y).sqrt();
    if len > EPS_LEN { x /= len; y /= len; ((x, y), len) } else { ((0.0, 0.0), 0.0) }
}

