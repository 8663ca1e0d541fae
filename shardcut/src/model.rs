use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::tolerance::quant_key;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Vec2 {
        Vec2 { x, y }
    }
}

/// Frame rectangle `[0,width] x [0,height]` in millimeters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[inline]
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
    #[inline]
    pub fn contains_strict(&self, p: Vec2) -> bool {
        p.x > 0.0 && p.x < self.width && p.y > 0.0 && p.y < self.height
    }
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Angles and ring radii for one pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SamplePlan {
    pub angles: Vec<f64>,
    pub rings: Vec<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RingRole {
    Primary { ring: usize },
    Fill,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    pub pos: Vec2,
    pub radius: f64,
    pub angle: f64,
    pub role: RingRole,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub seed: usize,
    pub role: RingRole,
    pub polygon: Vec<Vec2>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtraCut {
    pub cell: usize,
    pub a: Vec2,
    pub b: Vec2,
}

/// Canonical identity of an undirected segment: endpoints on the 1e-6 grid,
/// lexicographically ordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub a: (i64, i64),
    pub b: (i64, i64),
}

impl EdgeKey {
    /// Returns the key and whether `(p0, p1)` already is in canonical order.
    pub fn canonical(p0: Vec2, p1: Vec2) -> (EdgeKey, bool) {
        let k0 = (quant_key(p0.x), quant_key(p0.y));
        let k1 = (quant_key(p1.x), quant_key(p1.y));
        if k0 <= k1 {
            (EdgeKey { a: k0, b: k1 }, true)
        } else {
            (EdgeKey { a: k1, b: k0 }, false)
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = crate::geometry::tolerance::QUANT_SCALE;
        write!(
            f,
            "{},{}|{},{}",
            self.a.0 as f64 / s,
            self.a.1 as f64 / s,
            self.b.0 as f64 / s,
            self.b.1 as f64 / s
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TabShape {
    ThreeArm { left_tip: Vec2, right_tip: Vec2 },
    Triangle { tip: Vec2 },
    ZShape { mid1: Vec2, mid2: Vec2 },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub start: Vec2,
    pub end: Vec2,
    pub shape: TabShape,
    pub too_small: bool,
}

impl Tab {
    /// Anchor, interior points, anchor; in edge direction.
    pub fn outline(&self) -> Vec<Vec2> {
        let mut pts = vec![self.start];
        match self.shape {
            TabShape::ThreeArm { left_tip, right_tip } => {
                pts.push(left_tip);
                pts.push(right_tip);
            }
            TabShape::Triangle { tip } => pts.push(tip),
            TabShape::ZShape { mid1, mid2 } => {
                pts.push(mid1);
                pts.push(mid2);
            }
        }
        pts.push(self.end);
        pts
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathKind {
    Normal,
    AdvisoryCut,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CutPath {
    pub kind: PathKind,
    pub points: Vec<Vec2>,
    /// Inclusive index range of the spliced tab inside `points`.
    pub tab_span: Option<(usize, usize)>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub width: f64,
    pub height: f64,
    pub stroke_width: f64,
    pub corner_radius: f64,
    pub highlight_tabs: bool,
    pub paths: Vec<CutPath>,
}
