use serde::{Deserialize, Serialize};

use crate::geometry::hash::{edge_hash, field};
use crate::geometry::math::{frame_of, lerp};
use crate::geometry::tolerance::{clamp, TAB_MAX_ABS_HEIGHT, TAB_OFFSET_SCALE, TAB_Z_HEIGHT};
use crate::model::{EdgeKey, Tab, TabShape, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabParams {
    /// Shortest edge (and smallest tab extent) worth carving, mm.
    pub min_size: f64,
    /// Tab base width as a fraction of edge length.
    pub relative_width: f64,
    /// Tab height as a fraction of edge length, capped at ±6 mm.
    pub relative_height: f64,
    pub angle_degrees: f64,
    pub position_jitter: f64,
}

impl Default for TabParams {
    fn default() -> Self {
        TabParams {
            min_size: 1.3,
            relative_width: 0.35,
            relative_height: 0.15,
            angle_degrees: -30.0,
            position_jitter: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffsetMode {
    Centered,
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    ThreeArm,
    Triangle,
    ZShape,
}

/// Decisions drawn from disjoint bit-fields of one edge hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabChoice {
    pub offset: OffsetMode,
    pub shape: ShapeKind,
    /// ZShape: displace the 2/3 point instead of the 1/3 point.
    pub z_second: bool,
    /// ZShape: displace against the normal.
    pub z_flip: bool,
}

impl TabChoice {
    pub fn from_hash(h: u64) -> TabChoice {
        let offset = match field(h, 0, 21, 3) {
            0 => OffsetMode::Centered,
            1 => OffsetMode::Forward,
            _ => OffsetMode::Backward,
        };
        let shape = match field(h, 21, 21, 6) {
            0..=3 => ShapeKind::ThreeArm,
            4 => ShapeKind::Triangle,
            _ => ShapeKind::ZShape,
        };
        TabChoice { offset, shape, z_second: (h >> 42) & 1 == 1, z_flip: (h >> 43) & 1 == 1 }
    }

    pub fn for_edge(p0: Vec2, p1: Vec2) -> TabChoice {
        let (key, _) = EdgeKey::canonical(p0, p1);
        TabChoice::from_hash(edge_hash(&key))
    }
}

/// Connector for the edge `p0 -> p1`, or `None` when the edge is shorter than `min_size`.
/// The result may still be `too_small`; callers then keep the plain edge.
pub fn synthesize(p0: Vec2, p1: Vec2, params: &TabParams) -> Option<Tab> {
    let (tangent, normal, length) = frame_of(p0, p1);
    if !(length >= params.min_size) || length <= 0.0 {
        return None;
    }
    let choice = TabChoice::for_edge(p0, p1);
    let shift = match choice.offset {
        OffsetMode::Centered => 0.0,
        OffsetMode::Forward => params.position_jitter * TAB_OFFSET_SCALE * length,
        OffsetMode::Backward => -params.position_jitter * TAB_OFFSET_SCALE * length,
    };
    let center = Vec2 {
        x: 0.5 * (p0.x + p1.x) + tangent.x * shift,
        y: 0.5 * (p0.y + p1.y) + tangent.y * shift,
    };
    let base_width = params.relative_width * length;
    let height = clamp(params.relative_height * length, -TAB_MAX_ABS_HEIGHT, TAB_MAX_ABS_HEIGHT);
    let lateral_skew = params.angle_degrees.to_radians().tan() * height.abs();

    let along = |d: f64, up: f64| Vec2 {
        x: center.x + tangent.x * d + normal.x * up,
        y: center.y + tangent.y * d + normal.y * up,
    };
    let half = base_width / 2.0;
    let start = along(-half, 0.0);
    let end = along(half, 0.0);
    let shape = match choice.shape {
        ShapeKind::ThreeArm => TabShape::ThreeArm {
            left_tip: along(-(half - lateral_skew), height),
            right_tip: along(half - lateral_skew, height),
        },
        ShapeKind::Triangle => TabShape::Triangle { tip: along(0.0, height) },
        ShapeKind::ZShape => {
            let up = TAB_Z_HEIGHT * height * if choice.z_flip { -1.0 } else { 1.0 };
            let m1 = lerp(start, end, 1.0 / 3.0);
            let m2 = lerp(start, end, 2.0 / 3.0);
            let lift = |m: Vec2| Vec2 { x: m.x + normal.x * up, y: m.y + normal.y * up };
            if choice.z_second {
                TabShape::ZShape { mid1: m1, mid2: lift(m2) }
            } else {
                TabShape::ZShape { mid1: lift(m1), mid2: m2 }
            }
        }
    };
    let too_small = base_width.min(height.abs()) < params.min_size;
    Some(Tab { start, end, shape, too_small })
}
