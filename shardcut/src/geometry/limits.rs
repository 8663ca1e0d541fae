// Centralized parameter limits to harden against untrusted input (JSON/wasm)

// Sampling plan caps
pub const MAX_ANGLES: i64 = 720;
pub const MAX_RINGS: i64 = 200;
pub const MAX_EDGE_SEGMENTS: i64 = 256;
pub const MAX_FILL_RINGS: usize = 400;

// Canvas
pub const MAX_GRID_CELLS: i64 = 1_000;
pub const CELL_SIZE_MAX: f64 = 1_000.0;

// Numeric bounds
pub const COORD_MIN: f64 = -10_000_000.0;
pub const COORD_MAX: f64 = 10_000_000.0;
pub const GROWTH_MAX: f64 = 100.0;
pub const TAB_ANGLE_MAX_DEG: f64 = 89.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn in_cell_size_bounds(s: f64) -> bool { s.is_finite() && s > 0.0 && s <= CELL_SIZE_MAX }
