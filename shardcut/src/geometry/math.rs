use super::tolerance::{approx_eq, norm2, EPS_POS};
use crate::model::{Bounds, Vec2};

#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    Vec2 { x: a.x + (b.x - a.x) * t, y: a.y + (b.y - a.y) * t }
}

#[inline]
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    Vec2 { x: 0.5 * (a.x + b.x), y: 0.5 * (a.y + b.y) }
}

#[inline]
pub fn dist(a: Vec2, b: Vec2) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

#[inline]
pub fn dist_sq(a: Vec2, b: Vec2) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dx * dx + dy * dy
}

/// Unit tangent, unit left normal and length of `a -> b`. Zero vectors for degenerate input.
#[inline]
pub fn frame_of(a: Vec2, b: Vec2) -> (Vec2, Vec2, f64) {
    let ((tx, ty), len) = norm2(b.x - a.x, b.y - a.y);
    (Vec2 { x: tx, y: ty }, Vec2 { x: -ty, y: tx }, len)
}

pub fn polygon_signed_area(poly: &[Vec2]) -> f64 {
    let mut a = 0.0f64;
    for i in 0..poly.len() {
        let j = (i + 1) % poly.len();
        a += poly[i].x * poly[j].y - poly[j].x * poly[i].y;
    }
    0.5 * a
}

/// Shoelace area.
#[inline]
pub fn polygon_area(poly: &[Vec2]) -> f64 {
    polygon_signed_area(poly).abs()
}

/// Polar -> cartesian around `origin`.
#[inline]
pub fn from_polar(origin: Vec2, r: f64, angle: f64) -> Vec2 {
    Vec2 { x: origin.x + r * angle.cos(), y: origin.y + r * angle.sin() }
}

/// True when both endpoints sit on the same side of the frame.
pub fn is_frame_edge(a: Vec2, b: Vec2, bounds: &Bounds) -> bool {
    let on = |u: f64, v: f64, side: f64| approx_eq(u, side, EPS_POS) && approx_eq(v, side, EPS_POS);
    on(a.x, b.x, 0.0) || on(a.y, b.y, 0.0) || on(a.x, b.x, bounds.width) || on(a.y, b.y, bounds.height)
}

/// Index of the sample closest to `p` (first wins on ties).
pub fn closest_index(points: &[Vec2], p: Vec2) -> usize {
    let mut best = 0usize;
    let mut best_d2 = f64::INFINITY;
    for (i, q) in points.iter().enumerate() {
        let d2 = dist_sq(*q, p);
        if d2 < best_d2 {
            best_d2 = d2;
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_of_unit_square_either_winding() {
        let sq = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)];
        assert!((polygon_area(&sq) - 1.0).abs() < 1e-12);
        let mut rev = sq.to_vec();
        rev.reverse();
        assert!((polygon_area(&rev) - 1.0).abs() < 1e-12);
        assert!(polygon_signed_area(&rev) < 0.0);
    }

    #[test]
    fn frame_edges_detected_per_side() {
        let b = Bounds { width: 240.0, height: 120.0 };
        assert!(is_frame_edge(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), &b));
        assert!(is_frame_edge(Vec2::new(240.0, 10.0), Vec2::new(240.0, 50.0), &b));
        assert!(is_frame_edge(Vec2::new(0.0, 120.0), Vec2::new(3.0, 120.0), &b));
        assert!(!is_frame_edge(Vec2::new(0.0, 0.0), Vec2::new(100.0, 1.0), &b));
        // corner to corner diagonal touches two sides but lies on none
        assert!(!is_frame_edge(Vec2::new(0.0, 120.0), Vec2::new(240.0, 0.0), &b));
    }

    #[test]
    fn closest_prefers_first_on_tie() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)];
        assert_eq!(closest_index(&pts, Vec2::new(1.0, 0.0)), 0);
        assert_eq!(closest_index(&pts, Vec2::new(1.5, 0.0)), 1);
    }
}
